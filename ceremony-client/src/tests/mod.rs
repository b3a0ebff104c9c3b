use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use ceremony_types::{
    CeremonyKind, CeremonyOptions, CeremonyPhase, CeremonyResponse, VerificationRequest,
    VerificationResult,
};
use serde_json::json;

use super::*;

/// Relying Party double answering from canned payloads while counting calls
/// and capturing the last verification request.
struct StubRelyingParty {
    options: Result<serde_json::Value, String>,
    verdict: Result<serde_json::Value, String>,
    options_calls: AtomicUsize,
    verification_calls: AtomicUsize,
    last_request: Mutex<Option<VerificationRequest>>,
}

impl StubRelyingParty {
    fn answering(options: serde_json::Value, verdict: serde_json::Value) -> Self {
        Self {
            options: Ok(options),
            verdict: Ok(verdict),
            options_calls: AtomicUsize::new(0),
            verification_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn failing_options(message: &str) -> Self {
        Self {
            options: Err(message.into()),
            verdict: Err("unreachable".into()),
            options_calls: AtomicUsize::new(0),
            verification_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn failing_verification(options: serde_json::Value, message: &str) -> Self {
        Self {
            options: Ok(options),
            verdict: Err(message.into()),
            options_calls: AtomicUsize::new(0),
            verification_calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    fn options_calls(&self) -> usize {
        self.options_calls.load(Ordering::SeqCst)
    }

    fn verification_calls(&self) -> usize {
        self.verification_calls.load(Ordering::SeqCst)
    }

    fn last_request(&self) -> Option<VerificationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl RelyingParty for StubRelyingParty {
    async fn request_options(
        &self,
        _kind: CeremonyKind,
        _identity: &str,
    ) -> Result<CeremonyOptions, TransportError> {
        self.options_calls.fetch_add(1, Ordering::SeqCst);
        self.options
            .clone()
            .map(CeremonyOptions::new)
            .map_err(TransportError)
    }

    async fn submit_verification(
        &self,
        _kind: CeremonyKind,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, TransportError> {
        self.verification_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        let verdict = self.verdict.clone().map_err(TransportError)?;
        serde_json::from_value(verdict).map_err(|err| TransportError(err.to_string()))
    }
}

/// Capability double answering both operations from one canned payload.
struct ScriptedCapability {
    outcome: Result<serde_json::Value, String>,
}

impl ScriptedCapability {
    fn returning(response: serde_json::Value) -> Self {
        Self {
            outcome: Ok(response),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait::async_trait]
impl AuthenticatorCapability for ScriptedCapability {
    async fn create_credential(
        &self,
        _options: CeremonyOptions,
    ) -> Result<CeremonyResponse, CapabilityError> {
        self.outcome
            .clone()
            .map(CeremonyResponse::new)
            .map_err(CapabilityError)
    }

    async fn get_assertion(
        &self,
        _options: CeremonyOptions,
    ) -> Result<CeremonyResponse, CapabilityError> {
        self.outcome
            .clone()
            .map(CeremonyResponse::new)
            .map_err(CapabilityError)
    }
}

fn good_options() -> serde_json::Value {
    json!({
        "challenge": "c1",
        "rp": { "id": "localhost", "name": "Sample Relying Party" },
        "timeout": 60000,
    })
}

fn good_response() -> serde_json::Value {
    json!({
        "id": "cred1",
        "rawId": "cred1",
        "type": "public-key",
    })
}

const SUCCESS_ENTRIES: [&str; 6] = [
    "initiate registration by sending a POST request",
    "received ceremony options",
    "authenticator invoked",
    "authenticator responded",
    "verification requested",
    "verification result received",
];

#[tokio::test]
async fn registration_success_records_six_ordered_entries() {
    let client = Client::new(
        ScriptedCapability::returning(good_response()),
        StubRelyingParty::answering(good_options(), json!({"verified": true})),
    );
    let mut reporter = CeremonyReporter::new();

    let result = client
        .register("alice", &mut reporter)
        .await
        .expect("ceremony should verify");

    assert!(result.verified);
    assert_eq!(reporter.phase(), CeremonyPhase::Verified);
    let messages: Vec<_> = reporter
        .entries()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    assert_eq!(messages, SUCCESS_ENTRIES);
    assert!(reporter
        .entries()
        .windows(2)
        .all(|pair| pair[0].offset <= pair[1].offset));
    assert_eq!(
        reporter.terminal_line(),
        Some("Verified successfully. The user has been added to the server.")
    );
    assert!(reporter.options().is_some());
    assert!(reporter.response().is_some());
    assert!(reporter.result().is_some());
}

#[tokio::test]
async fn empty_identity_never_touches_the_network() {
    // Mocks with no expectations panic on any call, so reaching either
    // collaborator would fail this test.
    let client = Client::new(MockAuthenticatorCapability::new(), MockRelyingParty::new());
    let mut reporter = CeremonyReporter::new();

    let err = client
        .register("", &mut reporter)
        .await
        .expect_err("empty identity must short-circuit");

    assert_eq!(err, CeremonyError::EmptyIdentity);
    assert_eq!(reporter.phase(), CeremonyPhase::Idle);
    assert!(reporter.entries().is_empty());
    assert_eq!(reporter.terminal_line(), Some("identity cannot be empty"));
}

#[tokio::test]
async fn fetch_failure_aborts_before_the_authenticator() {
    let mut capability = MockAuthenticatorCapability::new();
    capability.expect_create_credential().times(0);
    capability.expect_get_assertion().times(0);
    let client = Client::new(
        capability,
        StubRelyingParty::failing_options("connection refused"),
    );
    let mut reporter = CeremonyReporter::new();

    let err = client
        .register("alice", &mut reporter)
        .await
        .expect_err("fetch failure must abort the run");

    assert_eq!(err, CeremonyError::ChallengeFetch("connection refused".into()));
    assert_eq!(reporter.phase(), CeremonyPhase::Failed);
    let messages: Vec<_> = reporter
        .entries()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    assert_eq!(messages, [SUCCESS_ENTRIES[0]]);
    assert_eq!(client.relying_party().verification_calls(), 0);
    assert_eq!(reporter.terminal_line(), Some("connection refused"));
}

#[tokio::test]
async fn authenticator_cancellation_aborts_before_verification() {
    let client = Client::new(
        ScriptedCapability::failing("user cancelled"),
        StubRelyingParty::answering(good_options(), json!({"verified": true})),
    );
    let mut reporter = CeremonyReporter::new();

    let err = client
        .register("carol", &mut reporter)
        .await
        .expect_err("cancellation must abort the run");

    assert_eq!(err, CeremonyError::Authenticator("user cancelled".into()));
    assert_eq!(reporter.phase(), CeremonyPhase::Failed);
    assert_eq!(reporter.entries().len(), 2);
    let messages: Vec<_> = reporter
        .entries()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    assert_eq!(messages, SUCCESS_ENTRIES[..2]);
    assert_eq!(client.relying_party().options_calls(), 1);
    assert_eq!(client.relying_party().verification_calls(), 0);
    assert_eq!(reporter.terminal_line(), Some("user cancelled"));
}

#[tokio::test]
async fn negative_verdict_is_not_an_error() {
    let client = Client::new(
        ScriptedCapability::returning(good_response()),
        StubRelyingParty::answering(
            good_options(),
            json!({"verified": false, "msg": "unknown credential"}),
        ),
    );
    let mut reporter = CeremonyReporter::new();

    let result = client
        .authenticate("bob", &mut reporter)
        .await
        .expect("a rejection is a valid terminal outcome");

    assert!(!result.verified);
    assert_eq!(reporter.phase(), CeremonyPhase::Rejected);
    assert_eq!(reporter.entries().len(), 6);
    assert_eq!(reporter.terminal_line(), Some("unknown credential"));
}

#[tokio::test]
async fn verification_transport_failure_keeps_the_response_exposed() {
    let client = Client::new(
        ScriptedCapability::returning(good_response()),
        StubRelyingParty::failing_verification(good_options(), "connection reset"),
    );
    let mut reporter = CeremonyReporter::new();

    let err = client
        .register("alice", &mut reporter)
        .await
        .expect_err("transport failure must abort the run");

    assert_eq!(
        err,
        CeremonyError::VerificationTransport("connection reset".into())
    );
    assert_eq!(reporter.phase(), CeremonyPhase::Failed);
    let messages: Vec<_> = reporter
        .entries()
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    assert_eq!(messages, SUCCESS_ENTRIES[..5]);
    // The raw response stays inspectable even though verification failed.
    assert!(reporter.response().is_some());
}

#[tokio::test]
async fn submitted_response_matches_the_exposed_response() {
    let client = Client::new(
        ScriptedCapability::returning(good_response()),
        StubRelyingParty::answering(good_options(), json!({"verified": true})),
    );
    let mut reporter = CeremonyReporter::new();

    client
        .register("alice", &mut reporter)
        .await
        .expect("ceremony should verify");

    let sent = client
        .relying_party()
        .last_request()
        .expect("a verification request was submitted");
    assert_eq!(sent.identity, "alice");
    assert_eq!(
        sent.original_json,
        reporter.response().expect("response exposed").to_wire_json()
    );
}

#[tokio::test]
async fn registration_asks_the_capability_to_create() {
    let mut capability = MockAuthenticatorCapability::new();
    capability
        .expect_create_credential()
        .times(1)
        .returning(|_| Ok(CeremonyResponse::new(json!({"id": "cred1"}))));
    capability.expect_get_assertion().times(0);
    let client = Client::new(
        capability,
        StubRelyingParty::answering(good_options(), json!({"verified": true})),
    );
    let mut reporter = CeremonyReporter::new();

    client
        .register("alice", &mut reporter)
        .await
        .expect("ceremony should verify");
}

#[tokio::test]
async fn authentication_asks_the_capability_for_an_assertion() {
    let mut capability = MockAuthenticatorCapability::new();
    capability.expect_create_credential().times(0);
    capability
        .expect_get_assertion()
        .times(1)
        .returning(|_| Ok(CeremonyResponse::new(json!({"id": "cred1"}))));
    let client = Client::new(
        capability,
        StubRelyingParty::answering(good_options(), json!({"verified": true})),
    );
    let mut reporter = CeremonyReporter::new();

    client
        .authenticate("bob", &mut reporter)
        .await
        .expect("ceremony should verify");
}

#[tokio::test]
async fn reruns_start_from_a_clean_surface() {
    let failing = Client::new(
        ScriptedCapability::failing("user cancelled"),
        StubRelyingParty::answering(good_options(), json!({"verified": true})),
    );
    let succeeding = Client::new(
        ScriptedCapability::returning(good_response()),
        StubRelyingParty::answering(good_options(), json!({"verified": true})),
    );
    let mut reporter = CeremonyReporter::new();

    failing
        .register("alice", &mut reporter)
        .await
        .expect_err("first run fails");
    assert_eq!(reporter.phase(), CeremonyPhase::Failed);

    succeeding
        .register("alice", &mut reporter)
        .await
        .expect("second run verifies");
    assert_eq!(reporter.phase(), CeremonyPhase::Verified);
    assert_eq!(reporter.entries().len(), 6);
    // The cancelled run's diagnostic did not survive the reset.
    assert_eq!(
        reporter.terminal_line(),
        Some("Verified successfully. The user has been added to the server.")
    );
}
