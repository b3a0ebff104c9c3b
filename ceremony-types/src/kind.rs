use serde::{Deserialize, Serialize};
use typeshare::typeshare;

/// The two credential ceremonies a client can run against a Relying Party.
///
/// The kind selects which pair of Relying Party endpoints the run talks to
/// and which operation the authenticator capability is asked to perform.
/// Beyond that, both ceremonies share the same control structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum CeremonyKind {
    /// Enroll a new credential with the Relying Party.
    Registration,
    /// Prove possession of a previously enrolled credential.
    Authentication,
}

/// Progress of a single ceremony run.
///
/// A run moves strictly forward: no transition skips a state and no step is
/// retried. [`Verified`](Self::Verified), [`Rejected`](Self::Rejected) and
/// [`Failed`](Self::Failed) are terminal; re-invoking a flow starts a fresh
/// run from [`Idle`](Self::Idle).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum CeremonyPhase {
    /// No ceremony step has started.
    #[default]
    Idle,
    /// Waiting on the Relying Party options endpoint.
    Fetching,
    /// Waiting on the authenticator capability, possibly on user
    /// interaction of unbounded duration.
    Invoking,
    /// Waiting on the Relying Party verification endpoint.
    Submitting,
    /// The Relying Party accepted the ceremony response.
    Verified,
    /// The Relying Party declined the ceremony response. This is a valid
    /// business outcome, not a failure.
    Rejected,
    /// A step failed before a verdict was reached.
    Failed,
}

impl CeremonyPhase {
    /// Whether the run has reached a state from which no further transition
    /// occurs.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Verified | Self::Rejected | Self::Failed)
    }
}
