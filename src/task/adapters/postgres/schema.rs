//! Diesel schema for task persistence.

diesel::table! {
    /// User-owned task rows.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task label.
        task_name -> Text,
        /// Board status (`Todo`, `Pending`, or `Done`).
        #[max_length = 16]
        status -> Varchar,
        /// Owning user.
        owner_id -> Uuid,
        /// Optional client key deduplicating repeated creates.
        idempotency_key -> Nullable<Uuid>,
        /// Creation timestamp, defaulted by the database.
        created_at -> Timestamptz,
    }
}
