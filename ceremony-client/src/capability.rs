use ceremony_types::{CeremonyOptions, CeremonyResponse};

#[cfg(doc)]
use crate::Client;

/// Failure reported by an [`AuthenticatorCapability`].
///
/// Capabilities guarantee no error taxonomy beyond "it failed, here is a
/// message": user cancellation, a platform denial, an already registered
/// authenticator and a timeout all surface here as their diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct CapabilityError(pub String);

impl From<&str> for CapabilityError {
    fn from(message: &str) -> Self {
        Self(message.into())
    }
}

impl From<String> for CapabilityError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

/// Pluggable contract for the local authenticator capability that holds the
/// key material and signs challenges on behalf of the user.
///
/// The capability is polymorphic over the ceremony kind: registration asks
/// it to create a credential, authentication asks it for an assertion over
/// an existing one. Both operations take the Relying Party's options
/// verbatim and may suspend for as long as the underlying platform needs,
/// which includes user interaction of unbounded duration. The [`Client`]
/// imposes no timeout of its own on either operation.
#[cfg_attr(any(test, feature = "testable"), mockall::automock)]
#[async_trait::async_trait]
pub trait AuthenticatorCapability {
    /// Create a new credential from the given creation options.
    async fn create_credential(
        &self,
        options: CeremonyOptions,
    ) -> Result<CeremonyResponse, CapabilityError>;

    /// Produce an assertion over the given request options.
    async fn get_assertion(
        &self,
        options: CeremonyOptions,
    ) -> Result<CeremonyResponse, CapabilityError>;
}
