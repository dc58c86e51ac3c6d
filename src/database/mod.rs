pub mod courses;
pub mod enrollments;
pub mod group_schedules;
pub mod groups;
pub mod lessons;
pub mod manager;
pub mod models;
pub mod schedules;
pub mod stats;
pub mod users;

/// Postgres unique-constraint violation (SQLSTATE 23505). Handlers translate
/// these to domain messages instead of surfacing the raw constraint error.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().and_then(|e| e.code()).as_deref(),
        Some("23505")
    )
}

/// Postgres foreign-key violation (SQLSTATE 23503), e.g. a course pointing at
/// a teacher id that does not resolve.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().and_then(|e| e.code()).as_deref(),
        Some("23503")
    )
}
