//! Shared ambient pieces used by every other crate: logging setup and
//! small wire types that do not belong to a single domain.

pub mod types;
pub mod utils;
