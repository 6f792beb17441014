/// Primary keys are BIGSERIAL on PostgreSQL and INTEGER PRIMARY KEY on SQLite.
pub type DbId = i64;

/// Seconds since the Unix epoch, UTC.
///
/// Stored as BIGINT so rows decode the same way on both database backends.
pub type Timestamp = i64;

/// Current time as a [`Timestamp`].
pub fn now() -> Timestamp {
    chrono::Utc::now().timestamp()
}
