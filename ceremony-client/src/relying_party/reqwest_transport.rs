use ceremony_types::{CeremonyKind, CeremonyOptions, VerificationRequest, VerificationResult};
use reqwest::header::ACCEPT;
use url::Url;

use super::{RelyingParty, TransportError};

/// A [`RelyingParty`] over HTTP: options are requested with a form-encoded
/// `username` field and ceremony responses are submitted as JSON.
///
/// Endpoint paths are joined onto the base URL, so the base should end with
/// a trailing slash (`https://rp.example.com/`).
#[derive(Debug, Clone)]
pub struct HttpRelyingParty {
    base: Url,
    http: reqwest::Client,
}

impl HttpRelyingParty {
    /// Address a Relying Party at the given base URL with a default HTTP
    /// client.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    /// Address a Relying Party with a caller-configured HTTP client, for
    /// callers that need their own timeout, proxy or TLS behavior.
    pub fn with_client(base: Url, http: reqwest::Client) -> Self {
        Self { base, http }
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|err| TransportError(err.to_string()))
    }
}

fn options_path(kind: CeremonyKind) -> &'static str {
    match kind {
        CeremonyKind::Registration => "register",
        CeremonyKind::Authentication => "authenticate",
    }
}

fn verification_path(kind: CeremonyKind) -> &'static str {
    match kind {
        CeremonyKind::Registration => "verify-registration",
        CeremonyKind::Authentication => "verify-authentication",
    }
}

#[async_trait::async_trait]
impl RelyingParty for HttpRelyingParty {
    async fn request_options(
        &self,
        kind: CeremonyKind,
        identity: &str,
    ) -> Result<CeremonyOptions, TransportError> {
        let response = self
            .http
            .post(self.endpoint(options_path(kind))?)
            .header(ACCEPT, "application/json")
            .form(&[("username", identity)])
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError(format!(
                "options endpoint answered {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        serde_json::from_slice(&body)
            .map(CeremonyOptions::new)
            .map_err(|err| TransportError(err.to_string()))
    }

    async fn submit_verification(
        &self,
        kind: CeremonyKind,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, TransportError> {
        let response = self
            .http
            .post(self.endpoint(verification_path(kind))?)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        // The service answers rejected ceremonies with a non-2xx status and
        // a verdict body, so the status code is not inspected here: a body
        // that decodes as a verdict is a verdict.
        let body = response
            .bytes()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        serde_json::from_slice(&body).map_err(|err| TransportError(err.to_string()))
    }
}
