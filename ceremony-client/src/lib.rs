//! # Ceremony Client
//!
//! [![github]](https://github.com/1Password/ceremony-rs/tree/main/ceremony-client)
//! [![version]](https://crates.io/crates/ceremony-client)
//! [![documentation]](https://docs.rs/ceremony-client/)
//!
//! This crate defines a [`Client`] type that drives the two public-key
//! credential ceremonies — registration and authentication — against a
//! Relying Party. The [`Client`] uses an [`AuthenticatorCapability`] to
//! perform the actual cryptographic operations and a [`RelyingParty`] to
//! exchange challenges and verdicts, while the Client itself sequences the
//! steps, keeps the failure mode of each step distinct, and reports every
//! transition through a per-run [`CeremonyReporter`].
//!
//! This crate does not implement any cryptography: key generation, signing
//! and verification belong to the capability and the Relying Party.
//!
//! [github]: https://img.shields.io/badge/GitHub-1Password%2Fceremony--rs%2Fceremony--client-informational?logo=github&style=flat
//! [version]: https://img.shields.io/crates/v/ceremony-client?logo=rust&style=flat
//! [documentation]: https://img.shields.io/docsrs/ceremony-client/latest?logo=docs.rs&style=flat

use ceremony_types::{CeremonyKind, CeremonyPhase, VerificationRequest, VerificationResult};
use typeshare::typeshare;

mod capability;
mod relying_party;
mod reporter;

#[cfg(test)]
mod tests;

pub use self::{
    capability::{AuthenticatorCapability, CapabilityError},
    relying_party::{HttpRelyingParty, RelyingParty, TransportError},
    reporter::{CeremonyReporter, LogEntry},
};

#[cfg(any(test, feature = "testable"))]
pub use self::{capability::MockAuthenticatorCapability, relying_party::MockRelyingParty};

/// Errors produced by ceremony runs.
///
/// Every member is fatal to its run: the remaining steps are skipped, the
/// diagnostic is recorded on the run's [`CeremonyReporter`], and the error
/// is re-signaled to the caller so upstream code can alert the user or
/// retry manually. A negative verdict is deliberately absent here — it is a
/// valid terminal outcome, returned as `Ok` with `verified == false`.
#[typeshare]
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq, thiserror::Error)]
#[serde(tag = "type", content = "content")]
pub enum CeremonyError {
    /// The caller-supplied identity was empty; nothing was sent anywhere.
    #[error("identity cannot be empty")]
    EmptyIdentity,
    /// The options endpoint was unreachable or its payload undecodable.
    #[error("fetching ceremony options failed: {0}")]
    ChallengeFetch(String),
    /// The authenticator capability declined the operation or the user
    /// aborted it.
    #[error("authenticator failed: {0}")]
    Authenticator(String),
    /// The verification endpoint was unreachable or its verdict
    /// undecodable. Distinct from a negative verdict, which is not an
    /// error.
    #[error("submitting for verification failed: {0}")]
    VerificationTransport(String),
}

/// A `Client` drives complete credential ceremonies. Users of this struct
/// supply an [`AuthenticatorCapability`] and a [`RelyingParty`].
///
/// Registration and authentication share one strictly sequential skeleton:
/// fetch the ceremony options, invoke the capability, submit the response
/// for verification, finalize the verdict. Each step's output is a
/// precondition for the next and the first failing step aborts the run.
/// There is no automatic retry and no cancellation primitive — an
/// unresponsive capability suspends the run until the platform resolves it,
/// and recovery from a failed run is the user re-initiating the flow.
pub struct Client<A, R> {
    authenticator: A,
    relying_party: R,
}

impl<A, R> Client<A, R>
where
    A: AuthenticatorCapability + Sync,
    R: RelyingParty + Sync,
{
    /// Create a `Client` from its two collaborators.
    pub fn new(authenticator: A, relying_party: R) -> Self {
        Self {
            authenticator,
            relying_party,
        }
    }

    /// Read access to the Client's capability.
    pub fn authenticator(&self) -> &A {
        &self.authenticator
    }

    /// Read access to the Client's Relying Party.
    pub fn relying_party(&self) -> &R {
        &self.relying_party
    }

    /// Run a registration ceremony for `identity`, reporting through
    /// `reporter`.
    ///
    /// Returns the Relying Party's verdict — including a negative one — or
    /// the [`CeremonyError`] of the step that aborted the run.
    pub async fn register(
        &self,
        identity: &str,
        reporter: &mut CeremonyReporter,
    ) -> Result<VerificationResult, CeremonyError> {
        self.run(CeremonyKind::Registration, identity, reporter).await
    }

    /// Run an authentication ceremony for `identity`, reporting through
    /// `reporter`.
    ///
    /// Returns the Relying Party's verdict — including a negative one — or
    /// the [`CeremonyError`] of the step that aborted the run.
    pub async fn authenticate(
        &self,
        identity: &str,
        reporter: &mut CeremonyReporter,
    ) -> Result<VerificationResult, CeremonyError> {
        self.run(CeremonyKind::Authentication, identity, reporter).await
    }

    /// The ceremony skeleton both flows share.
    ///
    /// The reporter is reset first, so a re-invoked flow starts from a
    /// clean surface and discards any prior in-flight artifacts. The
    /// identity is validated before any network step; an empty identity
    /// terminates the run with a notice and no network activity.
    async fn run(
        &self,
        kind: CeremonyKind,
        identity: &str,
        reporter: &mut CeremonyReporter,
    ) -> Result<VerificationResult, CeremonyError> {
        reporter.reset();

        if identity.is_empty() {
            let err = CeremonyError::EmptyIdentity;
            reporter.notice(err.to_string());
            return Err(err);
        }

        reporter.transition(CeremonyPhase::Fetching);
        reporter.record(format!("initiate {kind} by sending a POST request"));
        let options = match self.relying_party.request_options(kind, identity).await {
            Ok(options) => options,
            Err(TransportError(message)) => {
                reporter.fail(&message);
                return Err(CeremonyError::ChallengeFetch(message));
            }
        };
        reporter.record("received ceremony options");
        reporter.expose_options(&options);

        reporter.transition(CeremonyPhase::Invoking);
        let invoked_at = reporter.stamp();
        let invocation = match kind {
            CeremonyKind::Registration => self.authenticator.create_credential(options).await,
            CeremonyKind::Authentication => self.authenticator.get_assertion(options).await,
        };
        let response = match invocation {
            Ok(response) => response,
            Err(CapabilityError(message)) => {
                reporter.fail(&message);
                return Err(CeremonyError::Authenticator(message));
            }
        };
        reporter.record_at(invoked_at, "authenticator invoked");
        reporter.record("authenticator responded");
        reporter.expose_response(&response);

        reporter.transition(CeremonyPhase::Submitting);
        let request = VerificationRequest::new(identity, &response);
        reporter.record("verification requested");
        let result = match self.relying_party.submit_verification(kind, &request).await {
            Ok(result) => result,
            Err(TransportError(message)) => {
                reporter.fail(&message);
                return Err(CeremonyError::VerificationTransport(message));
            }
        };
        reporter.record("verification result received");
        reporter.finalize(kind, &result);

        Ok(result)
    }
}
