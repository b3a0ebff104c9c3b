//! # Ceremony Types
//!
//! Rust type definitions for the payloads a passkey ceremony client
//! exchanges with its Relying Party and its authenticator capability.

mod kind;
mod payloads;
mod verification;

// Re-exports
pub use self::{
    kind::{CeremonyKind, CeremonyPhase},
    payloads::{CeremonyOptions, CeremonyResponse},
    verification::{VerificationRequest, VerificationResult},
};
