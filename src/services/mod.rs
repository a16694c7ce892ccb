pub mod aggregate;
pub mod pager;
pub mod stats;

pub use aggregate::{rank_authors, repository_listing};
pub use pager::{Pager, SearchPages};
pub use stats::{StatsCommand, StatsRequest, StatsService};
