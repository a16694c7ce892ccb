use serde::{Deserialize, Serialize};

use crate::github::graphql::graphql_types::{Author, PageInfo};

/// GraphQL response structures for Search API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse<N> {
    pub search: SearchConnection<N>,
}

/// One page of a `search` connection.
///
/// The total-match count arrives as `issueCount` or `repositoryCount` depending on
/// the search type; only one of them is ever requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConnection<N> {
    #[serde(rename = "issueCount", alias = "repositoryCount", default)]
    pub match_count: u64,
    #[serde(default = "Vec::new")]
    pub nodes: Vec<N>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: Option<PageInfo>,
}

/// Issue or pull request projected down to its author.
///
/// Nodes of any other type deserialize with `author: None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorNode {
    #[serde(default)]
    pub author: Option<Author>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryNode {
    #[serde(rename = "nameWithOwner", default)]
    pub name_with_owner: Option<String>,
}
