/// Row ids for users, projects and tasks (PostgreSQL `BIGSERIAL`).
pub type DbId = i64;

/// Stored dates and audit timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
