//! Opaque payloads relayed between the Relying Party and the authenticator
//! capability.
//!
//! The ceremony orchestrator performs no schema validation on either of
//! these: they are decoded as raw JSON, handed over unmodified, and rendered
//! for diagnostics. Malformed options are only detected indirectly, by the
//! capability rejecting them.

use serde::{Deserialize, Serialize};

/// The challenge and ceremony parameters issued by the Relying Party for one
/// ceremony attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CeremonyOptions(serde_json::Value);

impl CeremonyOptions {
    /// Wrap a decoded Relying Party payload.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The raw payload, exactly as the Relying Party sent it.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Pretty-printed JSON for diagnostic display.
    pub fn to_pretty_json(&self) -> String {
        // SAFETY: a `serde_json::Value` only ever has string keys, so
        // serializing it cannot fail.
        serde_json::to_string_pretty(&self.0).unwrap()
    }
}

impl From<serde_json::Value> for CeremonyOptions {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// The signed payload produced by the authenticator capability in response
/// to a [`CeremonyOptions`].
///
/// Passed through unmodified to the verification step; the orchestrator
/// never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CeremonyResponse(serde_json::Value);

impl CeremonyResponse {
    /// Wrap a payload produced by the capability.
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The raw payload, exactly as the capability produced it.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// The exact serialization submitted to the Relying Party for
    /// verification.
    ///
    /// Diagnostic display and the verification request both go through this,
    /// which keeps the two byte-for-byte identical.
    pub fn to_wire_json(&self) -> String {
        // SAFETY: a `serde_json::Value` only ever has string keys, so
        // serializing it cannot fail.
        serde_json::to_string(&self.0).unwrap()
    }

    /// Pretty-printed JSON for diagnostic display.
    pub fn to_pretty_json(&self) -> String {
        // SAFETY: a `serde_json::Value` only ever has string keys, so
        // serializing it cannot fail.
        serde_json::to_string_pretty(&self.0).unwrap()
    }
}

impl From<serde_json::Value> for CeremonyResponse {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
