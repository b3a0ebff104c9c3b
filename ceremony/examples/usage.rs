//! Sample app driving both passkey ceremonies end to end.
use std::collections::HashMap;
use std::sync::Mutex;

use ceremony::{
    client::{
        AuthenticatorCapability, CapabilityError, CeremonyError, CeremonyReporter, Client,
        RelyingParty, TransportError,
    },
    types::{
        CeremonyKind, CeremonyOptions, CeremonyResponse, VerificationRequest, VerificationResult,
    },
};
use serde_json::json;

// EchoCapability stands in for a platform authenticator: it signs nothing,
// but echoes the challenge back the way a real capability would embed it in
// the client data of its response.
struct EchoCapability;

#[async_trait::async_trait]
impl AuthenticatorCapability for EchoCapability {
    async fn create_credential(
        &self,
        options: CeremonyOptions,
    ) -> Result<CeremonyResponse, CapabilityError> {
        let challenge = options.as_value()["challenge"].clone();
        Ok(CeremonyResponse::new(json!({
            "id": "demo-credential",
            "rawId": "demo-credential",
            "type": "public-key",
            "response": { "clientData": { "challenge": challenge } },
        })))
    }

    async fn get_assertion(
        &self,
        options: CeremonyOptions,
    ) -> Result<CeremonyResponse, CapabilityError> {
        let challenge = options.as_value()["challenge"].clone();
        Ok(CeremonyResponse::new(json!({
            "id": "demo-credential",
            "rawId": "demo-credential",
            "type": "public-key",
            "response": {
                "clientData": { "challenge": challenge },
                "signature": "demo-signature",
            },
        })))
    }
}

// A capability whose user always dismisses the platform prompt.
struct CancellingCapability;

#[async_trait::async_trait]
impl AuthenticatorCapability for CancellingCapability {
    async fn create_credential(
        &self,
        _options: CeremonyOptions,
    ) -> Result<CeremonyResponse, CapabilityError> {
        Err(CapabilityError::from("user cancelled"))
    }

    async fn get_assertion(
        &self,
        _options: CeremonyOptions,
    ) -> Result<CeremonyResponse, CapabilityError> {
        Err(CapabilityError::from("user cancelled"))
    }
}

// An in-process Relying Party: issues one challenge per identity and checks
// that the submitted response echoes it. A real deployment would use
// `HttpRelyingParty` pointed at the service instead.
struct DemoRelyingParty {
    sessions: Mutex<HashMap<String, String>>,
}

impl DemoRelyingParty {
    fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl RelyingParty for DemoRelyingParty {
    async fn request_options(
        &self,
        kind: CeremonyKind,
        identity: &str,
    ) -> Result<CeremonyOptions, TransportError> {
        let challenge = format!("{identity}-{kind}-challenge");
        self.sessions
            .lock()
            .expect("demo sessions are never poisoned")
            .insert(identity.to_owned(), challenge.clone());

        let options = match kind {
            CeremonyKind::Registration => json!({
                "challenge": challenge,
                "rp": { "id": "localhost", "name": "Demo Relying Party" },
                "user": { "id": identity, "name": identity, "displayName": identity },
                "pubKeyCredParams": [{ "type": "public-key", "alg": -7 }],
            }),
            CeremonyKind::Authentication => json!({
                "challenge": challenge,
                "rpId": "localhost",
                "allowCredentials": [{ "type": "public-key", "id": "demo-credential" }],
                "userVerification": "required",
            }),
        };
        Ok(CeremonyOptions::new(options))
    }

    async fn submit_verification(
        &self,
        _kind: CeremonyKind,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, TransportError> {
        let response: serde_json::Value = serde_json::from_str(&request.original_json)
            .map_err(|err| TransportError(err.to_string()))?;
        let expected = self
            .sessions
            .lock()
            .expect("demo sessions are never poisoned")
            .remove(&request.identity);

        let verified =
            expected.is_some_and(|c| response["response"]["clientData"]["challenge"] == json!(c));
        Ok(VerificationResult {
            verified,
            message: (!verified).then(|| "unknown or replayed challenge".to_owned()),
            details: serde_json::Map::new(),
        })
    }
}

fn print_run(title: &str, reporter: &CeremonyReporter) {
    println!("== {title} ({}) ==", reporter.phase());
    for line in reporter.status_lines() {
        println!("{line}");
    }
    if let Some(options) = reporter.options() {
        println!("-- ceremony options --\n{}", options.to_pretty_json());
    }
    if let Some(response) = reporter.response() {
        println!("-- authenticator response --\n{}", response.to_pretty_json());
    }
    if let Some(result) = reporter.result() {
        println!("-- verification result --\n{}", result.to_pretty_json());
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), CeremonyError> {
    let client = Client::new(EchoCapability, DemoRelyingParty::new());
    let mut reporter = CeremonyReporter::new();

    // Enroll a credential, then prove possession of it.
    client.register("jpasskey@example.org", &mut reporter).await?;
    print_run("registration", &reporter);

    client
        .authenticate("jpasskey@example.org", &mut reporter)
        .await?;
    print_run("authentication", &reporter);

    // A dismissed platform prompt surfaces as a distinct ceremony error and
    // never reaches the verification endpoint.
    let cancelled = Client::new(CancellingCapability, DemoRelyingParty::new());
    match cancelled.register("jpasskey@example.org", &mut reporter).await {
        Err(CeremonyError::Authenticator(message)) => {
            print_run("cancelled registration", &reporter);
            println!("authenticator declined: {message}");
        }
        outcome => println!("unexpected outcome: {outcome:?}"),
    }

    Ok(())
}
