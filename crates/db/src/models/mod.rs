//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts and patches where the entity is writable
//! - Input/receipt structs for the transactional ledger operations

pub mod boost;
pub mod track;
pub mod track_view;
pub mod user;
pub mod vote;
