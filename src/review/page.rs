//! HTML rendering of the client-facing review page.
//!
//! The page is a social-post mock-up: preview image, caption title,
//! current stage badge, any prior feedback, and the approve/reject
//! controls that post back to the external action endpoint.

use super::snapshot::TaskSnapshot;
use minijinja::Environment;
use serde_json::{Map, Value};
use thiserror::Error;

const REVIEW_PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Review: {{ task.title }}</title>
</head>
<body>
  <main class="post-mockup">
    <h1>{{ task.title }}</h1>
    <p class="stage-badge">{{ task.status_label }}</p>
    {% if task.preview_asset %}
    <img class="post-preview" src="{{ task.preview_asset }}" alt="Post preview">
    {% else %}
    <p class="post-preview-missing">No preview available yet.</p>
    {% endif %}
    {% if task.last_feedback %}
    <section class="prior-feedback">
      <h2>Previous feedback</h2>
      <p>{{ task.last_feedback }}</p>
    </section>
    {% endif %}
    <form method="post" class="review-actions">
      <button name="action" value="approve">Approve</button>
      <button name="action" value="reject">Request changes</button>
      <textarea name="feedback" placeholder="What should change?"></textarea>
    </form>
  </main>
</body>
</html>
"#;

/// Errors raised while rendering the review page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReviewPageError {
    /// The snapshot could not be serialised into template context.
    #[error("review page context: {0}")]
    Context(String),

    /// Template rendering failed.
    #[error("review page render: {0}")]
    Render(String),
}

/// Renders the external review page for a task snapshot.
///
/// # Errors
///
/// Returns [`ReviewPageError`] when context serialisation or template
/// rendering fails.
pub fn render_review_page(snapshot: &TaskSnapshot) -> Result<String, ReviewPageError> {
    let environment = Environment::new();
    let task = serde_json::to_value(snapshot)
        .map_err(|err| ReviewPageError::Context(err.to_string()))?;
    let mut context = Map::new();
    context.insert("task".to_owned(), task);
    environment
        .render_str(REVIEW_PAGE_TEMPLATE, Value::Object(context))
        .map_err(|err| ReviewPageError::Render(err.to_string()))
}
