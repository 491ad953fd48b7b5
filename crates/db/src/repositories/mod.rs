//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Ledger operations return
//! [`LedgerError`](crate::error::LedgerError) so domain rejections and
//! database failures share one rollback path.

pub mod boost_repo;
pub mod track_repo;
pub mod user_repo;
pub mod vote_repo;

pub use boost_repo::BoostRepo;
pub use track_repo::TrackRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
