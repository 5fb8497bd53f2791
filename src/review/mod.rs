//! External client review surface.
//!
//! One unauthenticated actor, the agency's client, reaches a single
//! task's review page through a secret-token link. This module holds the
//! read-only projection served to that actor, the link construction, and
//! the HTML page rendering. The approval token is the entire authorisation
//! boundary: nothing here ever exposes it except the link itself.

pub mod link;
pub mod page;
pub mod snapshot;

pub use link::{ApprovalLink, ReviewLinkBuilder};
pub use page::{ReviewPageError, render_review_page};
pub use snapshot::TaskSnapshot;
