//! Core type system and domain definitions
//!
//! Search expressions, scopes, repository identifiers, authors and the aggregate
//! results handed to the formatter.

pub mod repository;
pub mod search;
pub mod stats;
pub mod user;

pub use repository::*;
pub use search::*;
pub use stats::*;
pub use user::*;
