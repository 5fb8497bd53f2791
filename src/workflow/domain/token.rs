//! Approval token value type.
//!
//! The token is the entire authorisation boundary of the external review
//! surface, so it must be unguessable and must never reach logs. `Debug`
//! output is redacted and the type deliberately has no `Display`
//! implementation; callers that embed the token in a URL go through
//! [`ApprovalToken::as_str`] explicitly.

use super::ParseApprovalTokenError;
use rand::RngCore;
use std::fmt;

/// Opaque secret granting one unauthenticated actor access to a single
/// task's external review surface.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApprovalToken(String);

impl ApprovalToken {
    /// Number of CSPRNG bytes backing a freshly generated token.
    pub const ENTROPY_BYTES: usize = 16;

    /// Generates a new token from the thread-local CSPRNG, hex encoded.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; Self::ENTROPY_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Reconstructs a token from its persisted representation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseApprovalTokenError`] when the value is not exactly
    /// the lowercase hex encoding of [`Self::ENTROPY_BYTES`] bytes.
    pub fn from_persisted(value: String) -> Result<Self, ParseApprovalTokenError> {
        let is_valid = value.len() == Self::ENTROPY_BYTES * 2
            && value
                .chars()
                .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch));
        if !is_valid {
            return Err(ParseApprovalTokenError);
        }
        Ok(Self(value))
    }

    /// Returns the token as `str` for lookup and URL embedding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApprovalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApprovalToken(redacted)")
    }
}
