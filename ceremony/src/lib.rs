//! # Ceremony-RS by 1Password
//!
//! [![github]](https://github.com/1Password/ceremony-rs/tree/main/ceremony/)
//! [![version]](https://crates.io/crates/ceremony/)
//! [![documentation]](https://docs.rs/ceremony/)
//!
//! The `ceremony-rs` library is a collection of Rust libraries for driving the two
//! public-key credential ceremonies — *registration* (enrolling a new credential) and
//! *authentication* (proving possession of a previously enrolled one) — from the client
//! side. It is comprised of two sub-libraries:
//!
//! - `ceremony-client` - a library, usable as [`client`], which sequences a complete
//!   ceremony against a Relying Party and reports every transition it makes.
//! - `ceremony-types` - type definitions, usable as [`types`], for the payloads a
//!   ceremony exchanges with a Relying Party and an authenticator.
//!
//! ## Basic Concepts
//!
//! A ceremony is a two-phase challenge–response exchange. The Relying Party issues
//! ceremony options carrying a one-time challenge; an authenticator signs them; the
//! Relying Party verifies the signed response and returns a verdict. These libraries
//! own none of the cryptography involved: they sequence the exchange and keep its
//! failure modes distinct.
//!
//! You can think of a ceremony as a chain that interacts with its collaborators in the
//! following way:
//!
//! RelyingParty <-> [`Client`](client::Client) <-> [`AuthenticatorCapability`](client::AuthenticatorCapability)
//!
//! The [`Client`](client::Client) type provides the following API for the two ceremonies:
//!
//! - [`register()`](client::Client::register()) - enroll a new credential.
//! - [`authenticate()`](client::Client::authenticate()) - prove possession of an enrolled credential.
//!
//! The [`Client`](client::Client) does not itself talk to authenticator hardware or
//! perform networking. Instead it depends on two injected contracts:
//!
//! - [`AuthenticatorCapability`](client::AuthenticatorCapability) - the local component
//!   holding key material, polymorphic over credential creation and assertion.
//! - [`RelyingParty`](client::RelyingParty) - the remote service's two endpoint pairs;
//!   [`HttpRelyingParty`](client::HttpRelyingParty) is the ready-made HTTP implementation.
//!
//! Each run reports through an injected [`CeremonyReporter`](client::CeremonyReporter):
//! an ordered, timestamped transition log, the terminal outcome, and the raw payloads
//! exchanged along the way, for display surfaces that want to show their work.
//!
//! A runnable demonstration binary is provided in `ceremony/examples/usage.rs`.
//!
//! [github]: https://img.shields.io/badge/GitHub-1Password%2Fceremony--rs%2Fceremony-informational?logo=github&style=flat
//! [version]: https://img.shields.io/crates/v/ceremony?logo=rust&style=flat
//! [documentation]: https://img.shields.io/docsrs/ceremony/latest?logo=docs.rs&style=flat
//!
//! ### Example: Running both ceremonies against stub collaborators
//!
//! The highest-level type in these libraries is the `ceremony-client::Client`. The
//! following example wires it up with a stub capability and an in-process Relying
//! Party; a real application would substitute its platform authenticator and an
//! [`HttpRelyingParty`](client::HttpRelyingParty) pointed at its service.
//!
//! ```
//! use ceremony::{
//!     client::{
//!         AuthenticatorCapability, CapabilityError, CeremonyReporter, Client, RelyingParty,
//!         TransportError,
//!     },
//!     types::{
//!         CeremonyKind, CeremonyOptions, CeremonyResponse, VerificationRequest,
//!         VerificationResult,
//!     },
//! };
//!
//! // ScriptedCapability is a stub impl of the AuthenticatorCapability trait, used later.
//! # struct ScriptedCapability;
//! # #[async_trait::async_trait]
//! # impl AuthenticatorCapability for ScriptedCapability {
//! #     async fn create_credential(
//! #         &self,
//! #         _options: CeremonyOptions,
//! #     ) -> Result<CeremonyResponse, CapabilityError> {
//! #         Ok(CeremonyResponse::new(serde_json::json!({
//! #             "id": "cred1",
//! #             "type": "public-key",
//! #         })))
//! #     }
//! #
//! #     async fn get_assertion(
//! #         &self,
//! #         _options: CeremonyOptions,
//! #     ) -> Result<CeremonyResponse, CapabilityError> {
//! #         Ok(CeremonyResponse::new(serde_json::json!({
//! #             "id": "cred1",
//! #             "type": "public-key",
//! #             "signature": "sig1",
//! #         })))
//! #     }
//! # }
//! #
//! // InProcessRelyingParty is a stub impl of the RelyingParty trait, used later.
//! # struct InProcessRelyingParty;
//! # #[async_trait::async_trait]
//! # impl RelyingParty for InProcessRelyingParty {
//! #     async fn request_options(
//! #         &self,
//! #         _kind: CeremonyKind,
//! #         identity: &str,
//! #     ) -> Result<CeremonyOptions, TransportError> {
//! #         Ok(CeremonyOptions::new(serde_json::json!({
//! #             "challenge": "c1",
//! #             "user": { "name": identity },
//! #         })))
//! #     }
//! #
//! #     async fn submit_verification(
//! #         &self,
//! #         _kind: CeremonyKind,
//! #         _request: &VerificationRequest,
//! #     ) -> Result<VerificationResult, TransportError> {
//! #         Ok(serde_json::from_value(serde_json::json!({ "verified": true })).unwrap())
//! #     }
//! # }
//! #
//! # tokio_test::block_on(async {
//! let client = Client::new(ScriptedCapability, InProcessRelyingParty);
//! let mut reporter = CeremonyReporter::new();
//!
//! // Enroll a credential, then prove possession of it.
//! let verdict = client
//!     .register("jpasskey@example.org", &mut reporter)
//!     .await
//!     .unwrap();
//! assert!(verdict.verified);
//!
//! let verdict = client
//!     .authenticate("jpasskey@example.org", &mut reporter)
//!     .await
//!     .unwrap();
//! assert!(verdict.verified);
//!
//! // Each run leaves an ordered, timestamped account of itself.
//! for line in reporter.status_lines() {
//!     println!("{line}");
//! }
//! # })
//! ```

pub use ceremony_client as client;
pub use ceremony_types as types;
