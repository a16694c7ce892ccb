//! Search query text and the response shapes it can be projected to.
//!
//! Each shape names the fields one command needs from a `search` connection. The
//! executor only ever sees the generated query text and the [`SearchVariable`]s, so
//! shapes stay independent of the transport.

use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::types::SearchType;

use super::graphql_types::{AuthorNode, RepositoryNode};

#[derive(Debug, Clone, Serialize)]
pub struct SearchVariable {
    pub query: String,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Field projection of a `search` connection.
pub trait SearchShape {
    /// Name used for logging and error context
    const QUERY_NAME: &'static str;
    const SEARCH_TYPE: SearchType;

    type Node: DeserializeOwned;

    /// Selection placed inside `nodes { ... }`; `None` when only the total is needed.
    fn node_selection() -> Option<&'static str>;
}

/// Total match count only.
pub struct CountShape;

impl SearchShape for CountShape {
    const QUERY_NAME: &'static str = "search_count";
    const SEARCH_TYPE: SearchType = SearchType::Issue;

    type Node = IgnoredAny;

    fn node_selection() -> Option<&'static str> {
        None
    }
}

/// Author login of every matched issue and pull request.
pub struct AuthorShape;

impl SearchShape for AuthorShape {
    const QUERY_NAME: &'static str = "search_authors";
    const SEARCH_TYPE: SearchType = SearchType::Issue;

    type Node = AuthorNode;

    fn node_selection() -> Option<&'static str> {
        Some(
            r#"
                ... on PullRequest {
                    author {
                        login
                    }
                }
                ... on Issue {
                    author {
                        login
                    }
                }"#,
        )
    }
}

/// `owner/name` of every matched repository.
pub struct RepoListShape;

impl SearchShape for RepoListShape {
    const QUERY_NAME: &'static str = "search_repositories";
    const SEARCH_TYPE: SearchType = SearchType::Repository;

    type Node = RepositoryNode;

    fn node_selection() -> Option<&'static str> {
        Some(
            r#"
                ... on Repository {
                    nameWithOwner
                }"#,
        )
    }
}

pub fn search_query<S: SearchShape>(with_cursor: bool) -> String {
    let inner_query = match S::node_selection() {
        Some(selection) => format!(
            r#"
                {}
                nodes {{{}
                }}
                pageInfo {{
                    hasNextPage
                    endCursor
                }}"#,
            S::SEARCH_TYPE.count_field(),
            selection
        ),
        None => format!(
            r#"
                {}"#,
            S::SEARCH_TYPE.count_field()
        ),
    };

    if with_cursor {
        format!(
            r#"
        query($query: String!, $per_page: Int!, $cursor: String) {{
            search(query: $query, type: {}, first: $per_page, after: $cursor) {{{}
            }}
        }}"#,
            S::SEARCH_TYPE,
            inner_query
        )
    } else {
        format!(
            r#"
        query($query: String!, $per_page: Int!) {{
            search(query: $query, type: {}, first: $per_page) {{{}
            }}
        }}"#,
            S::SEARCH_TYPE,
            inner_query
        )
    }
}
