//! The Relying Party service contract: one options endpoint and one
//! verification endpoint per ceremony kind.

use ceremony_types::{CeremonyKind, CeremonyOptions, VerificationRequest, VerificationResult};

mod reqwest_transport;

pub use self::reqwest_transport::HttpRelyingParty;

#[cfg(doc)]
use crate::Client;

/// Failure at the transport layer of a Relying Party exchange: the request
/// could not be sent, the endpoint answered outside its contract, or the
/// body could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<&str> for TransportError {
    fn from(message: &str) -> Self {
        Self(message.into())
    }
}

impl From<String> for TransportError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Narrow contract over the two Relying Party endpoint pairs.
///
/// Implementations own their networking, timeout and encoding behavior; the
/// [`Client`] only sequences the calls and never retries either of them.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait RelyingParty {
    /// Request ceremony options (a one-time challenge plus ceremony
    /// parameters) for the given identity from the options endpoint of
    /// `kind`.
    async fn request_options(
        &self,
        kind: CeremonyKind,
        identity: &str,
    ) -> Result<CeremonyOptions, TransportError>;

    /// Submit a ceremony response to the verification endpoint of `kind`
    /// and decode the verdict.
    async fn submit_verification(
        &self,
        kind: CeremonyKind,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, TransportError>;
}
