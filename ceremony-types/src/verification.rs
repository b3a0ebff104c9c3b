//! Request and verdict types for the Relying Party verification endpoints.

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::CeremonyResponse;

/// The payload submitted to the Relying Party for verification: the subject
/// identity paired with the serialized authenticator response.
///
/// Constructed fresh for every ceremony run and never reused. The wire field
/// names follow the Relying Party contract: the identity travels as
/// `username` and the serialized response as `original_json`, which the
/// service splits apart on its side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[typeshare]
pub struct VerificationRequest {
    /// The subject of the ceremony.
    #[serde(rename = "username")]
    pub identity: String,
    /// The authenticator response, serialized exactly as it was produced.
    pub original_json: String,
}

impl VerificationRequest {
    /// Pair an identity with the serialized ceremony response.
    pub fn new(identity: impl Into<String>, response: &CeremonyResponse) -> Self {
        Self {
            identity: identity.into(),
            original_json: response.to_wire_json(),
        }
    }
}

/// The Relying Party's verdict on a submitted ceremony response.
///
/// A negative verdict (`verified == false`) is a valid terminal outcome of a
/// ceremony, not an error; the service explains itself through
/// [`message`](Self::message).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[typeshare]
pub struct VerificationResult {
    /// Whether the Relying Party accepted the ceremony response.
    pub verified: bool,

    /// Human-readable explanation supplied by the service, typically on a
    /// negative verdict. The wire name is `msg`; `message` is accepted as an
    /// alias.
    #[serde(
        rename = "msg",
        alias = "message",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,

    /// Any additional diagnostic fields the service returned, preserved
    /// verbatim.
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl VerificationResult {
    /// Pretty-printed JSON for diagnostic display.
    pub fn to_pretty_json(&self) -> String {
        // SAFETY: every field of this struct serializes to plain JSON with
        // string keys, so serializing it cannot fail.
        serde_json::to_string_pretty(self).unwrap()
    }
}
