//! Authentication primitives.
//!
//! - [`jwt`] -- HS256 access-token validation (and generation, used by
//!   trusted issuers and tests).

pub mod jwt;
