//! Shared primitive aliases.

/// Primary key of every table (users, tracks, votes, boosts, seen-set).
/// Backed by PostgreSQL `BIGSERIAL`.
pub type DbId = i64;

/// Boost expiries, vote resets, and row timestamps. Always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
