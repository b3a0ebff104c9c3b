//! Per-run ceremony reporting: the ordered transition log, the status
//! surface, the diagnostic artifacts and the phase of the run.

use std::fmt;
use std::time::{Duration, Instant};

use ceremony_types::{
    CeremonyKind, CeremonyOptions, CeremonyPhase, CeremonyResponse, VerificationResult,
};

/// One timestamped transition event in a ceremony run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Time since the run started. Offsets are monotonically non-decreasing
    /// across the log of one run.
    pub offset: Duration,
    /// The transition that occurred.
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "+{}.{:03}s: {}",
            self.offset.as_secs(),
            self.offset.subsec_millis(),
            self.message
        )
    }
}

/// Records one ceremony run for display: every transition as an ordered,
/// timestamped log, the terminal outcome, and the raw payloads exchanged
/// along the way.
///
/// A reporter is scoped to the flow that owns it and injected per run. It is
/// reset at the start of every run, so nothing accumulates across runs and
/// concurrent flows with their own reporters cannot corrupt each other.
#[derive(Debug)]
pub struct CeremonyReporter {
    started: Instant,
    phase: CeremonyPhase,
    entries: Vec<LogEntry>,
    notices: Vec<String>,
    options: Option<CeremonyOptions>,
    response: Option<CeremonyResponse>,
    result: Option<VerificationResult>,
}

impl Default for CeremonyReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CeremonyReporter {
    /// A reporter with no recorded run.
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            phase: CeremonyPhase::Idle,
            entries: Vec::new(),
            notices: Vec::new(),
            options: None,
            response: None,
            result: None,
        }
    }

    /// Discard the previous run and restart the clock.
    ///
    /// Called at the start of every ceremony; this is what overwrites the
    /// status surface instead of appending to it.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Time elapsed since the run started, for entries whose timestamp must
    /// be captured before their outcome is known.
    pub fn stamp(&self) -> Duration {
        self.started.elapsed()
    }

    /// Append a transition entry timestamped now.
    pub fn record(&mut self, message: impl Into<String>) {
        let at = self.stamp();
        self.record_at(at, message);
    }

    /// Append a transition entry with a previously captured timestamp.
    pub fn record_at(&mut self, offset: Duration, message: impl Into<String>) {
        let entry = LogEntry {
            offset,
            message: message.into(),
        };
        log::debug!("{entry}");
        self.entries.push(entry);
    }

    /// Move the run to the given phase.
    pub fn transition(&mut self, phase: CeremonyPhase) {
        self.phase = phase;
    }

    /// Append an untimestamped line to the status surface.
    pub fn notice(&mut self, line: impl Into<String>) {
        self.notices.push(line.into());
    }

    /// Record a fatal step failure: the raw diagnostic joins the status
    /// surface and the run terminates in [`CeremonyPhase::Failed`].
    pub fn fail(&mut self, diagnostic: impl fmt::Display) {
        log::warn!("ceremony failed: {diagnostic}");
        self.notices.push(diagnostic.to_string());
        self.phase = CeremonyPhase::Failed;
    }

    /// Keep the ceremony options around for diagnostic display.
    pub fn expose_options(&mut self, options: &CeremonyOptions) {
        self.options = Some(options.clone());
    }

    /// Keep the raw authenticator response around for diagnostic display.
    ///
    /// This happens before verification is attempted, so the payload stays
    /// inspectable when the verification step fails.
    pub fn expose_response(&mut self, response: &CeremonyResponse) {
        self.response = Some(response.clone());
    }

    /// Terminal bookkeeping for a decoded verdict: stores the artifact,
    /// branches the phase on `verified`, and appends the terminal status
    /// line — the per-kind success line, or the service's message verbatim.
    pub fn finalize(&mut self, kind: CeremonyKind, result: &VerificationResult) {
        self.result = Some(result.clone());
        if result.verified {
            self.phase = CeremonyPhase::Verified;
            self.notices.push(success_line(kind).into());
        } else {
            self.phase = CeremonyPhase::Rejected;
            self.notices.push(result.message.clone().unwrap_or_else(|| {
                "verification was rejected by the server".into()
            }));
        }
    }

    /// Current phase of the run.
    pub fn phase(&self) -> CeremonyPhase {
        self.phase
    }

    /// The ordered transition log of the run.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Ceremony options as last exposed, if the run got that far.
    pub fn options(&self) -> Option<&CeremonyOptions> {
        self.options.as_ref()
    }

    /// Raw authenticator response as last exposed, if the run got that far.
    pub fn response(&self) -> Option<&CeremonyResponse> {
        self.response.as_ref()
    }

    /// The decoded verdict, if the run reached one.
    pub fn result(&self) -> Option<&VerificationResult> {
        self.result.as_ref()
    }

    /// The full status surface: transition lines first, terminal and notice
    /// lines after, one string per line.
    pub fn status_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(ToString::to_string)
            .chain(self.notices.iter().cloned())
            .collect()
    }

    /// The line a display surface shows as the ceremony's outcome: the last
    /// notice, if the run has reached one.
    pub fn terminal_line(&self) -> Option<&str> {
        self.notices.last().map(String::as_str)
    }
}

/// Terminal status line for a successful ceremony of the given kind.
fn success_line(kind: CeremonyKind) -> &'static str {
    match kind {
        CeremonyKind::Registration => {
            "Verified successfully. The user has been added to the server."
        }
        CeremonyKind::Authentication => "Verified successfully.",
    }
}
