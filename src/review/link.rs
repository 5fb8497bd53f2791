//! Approval link construction for the external review surface.

use crate::workflow::domain::ApprovalToken;
use std::fmt;

/// Builds fully-qualified approval URLs.
///
/// The base URL is the publicly reachable origin of the deployment; link
/// delivery (mail, chat) is an external collaborator and not handled
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLinkBuilder {
    base_url: String,
}

impl ReviewLinkBuilder {
    /// Path segment under which the external review surface is mounted.
    pub const REVIEW_PATH: &'static str = "review";

    /// Creates a builder from the deployment's public base URL. Trailing
    /// slashes are normalised away.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base_url: base }
    }

    /// Returns the approval URL for the given token, with the token as the
    /// final path parameter.
    #[must_use]
    pub fn url_for(&self, token: &ApprovalToken) -> ApprovalLink {
        ApprovalLink(format!(
            "{}/{}/{}",
            self.base_url,
            Self::REVIEW_PATH,
            token.as_str()
        ))
    }
}

/// A fully-qualified approval URL.
///
/// The URL embeds the secret token, so `Debug` output is redacted; the
/// value is extracted explicitly via [`ApprovalLink::as_str`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApprovalLink(String);

impl ApprovalLink {
    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the link, returning the URL.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for ApprovalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApprovalLink(redacted)")
    }
}
