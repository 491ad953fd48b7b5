//! Background maintenance jobs.
//!
//! Each submodule provides a long-running async `run` function intended to
//! be spawned via `tokio::spawn`. All jobs accept a [`CancellationToken`]
//! for graceful shutdown.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod boost_expiry;
pub mod vote_allowance;
