//! Aggregate results produced by the stats commands

use serde::Serialize;

use super::{RepositoryId, User};

/// Number of matched nodes authored by one login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorMatches {
    #[serde(rename = "login")]
    pub author: User,
    pub matches: u64,
}

impl AuthorMatches {
    pub fn new<T: Into<User>>(author: T, matches: u64) -> Self {
        Self {
            author: author.into(),
            matches,
        }
    }
}

/// Result of one stats command, consumed by the formatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsOutput {
    /// Total match count reported by the API
    Count(u64),
    /// Authors ordered by matches, most first
    Authors(Vec<AuthorMatches>),
    /// Repositories in API order
    Repositories(Vec<RepositoryId>),
}
