pub mod boost;
pub mod discovery;
pub mod track;
pub mod user;
pub mod vote;
