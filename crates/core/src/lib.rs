//! Domain logic for the Soundope discovery and boost service.
//!
//! This crate has no I/O. The `db` crate persists what these functions
//! decide, and the `api` crate exposes it over HTTP.

pub mod boost_plan;
pub mod discovery;
pub mod error;
pub mod ledger;
pub mod roles;
pub mod types;
pub mod voting;
