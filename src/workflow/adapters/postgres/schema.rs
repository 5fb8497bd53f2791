//! Diesel schema for workflow task persistence.

diesel::table! {
    /// Task records under workflow control.
    workflow_tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Card title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional card description.
        description -> Nullable<Text>,
        /// Board the task belongs to.
        #[max_length = 20]
        kanban_type -> Varchar,
        /// Task status.
        #[max_length = 50]
        status -> Varchar,
        /// Approval token keying the external review surface.
        #[max_length = 64]
        approval_token -> Nullable<Varchar>,
        /// Most recent rejection feedback.
        last_feedback -> Nullable<Text>,
        /// Opaque rejection annotation blob.
        annotation -> Nullable<Text>,
        /// Preview asset shown on the external review page.
        #[max_length = 512]
        preview_asset -> Nullable<Varchar>,
        /// Assignee references as a JSON array.
        assigned_to -> Jsonb,
        /// Position within the current column.
        sort_order -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
