//! Search expression types
//!
//! This module provides the search text sent to GitHub's `search` connection,
//! the scope restricting it, and the builder assembling both into one expression.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::RepositoryId;

/// Represents a GitHub search expression.
///
/// The text is passed to the API verbatim; GitHub's own search grammar decides
/// whether it is legal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery(pub String);

impl SearchQuery {
    pub fn new<T: Into<String>>(query: T) -> Self {
        Self(query.into())
    }

    pub fn builder<T: Into<String>>(filter: T) -> SearchQueryBuilder {
        SearchQueryBuilder::new(filter)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque pagination cursor returned as `pageInfo.endCursor`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCursor(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultPager {
    pub next_page_cursor: Option<SearchCursor>,
}

/// The `type` argument of GitHub's `search` connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SearchType {
    Issue,
    Repository,
}

impl SearchType {
    /// Name of the total-match field the connection exposes for this type.
    pub fn count_field(&self) -> &'static str {
        match self {
            SearchType::Issue => "issueCount",
            SearchType::Repository => "repositoryCount",
        }
    }
}

/// Object kind keyword rendered as an `is:` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    #[strum(serialize = "pr")]
    PullRequest,
    #[strum(serialize = "issue")]
    Issue,
}

/// Repository, organization or user restriction of a search.
///
/// `Viewer` stands for "no explicit scope" and has to be resolved to a
/// `User` with the authenticated login before a query can be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    Repository(String),
    Organization(String),
    User(String),
    Viewer,
}

impl SearchScope {
    /// Builds the scope from the mutually exclusive CLI flags.
    ///
    /// Values are trimmed and blank ones ignored. A repository given as a GitHub URL
    /// is normalized to `owner/name`; anything else is kept as typed.
    pub fn from_flags(
        repository: Option<String>,
        organization: Option<String>,
        user: Option<String>,
    ) -> Self {
        let non_empty = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(repository) = non_empty(repository) {
            let normalized = RepositoryId::parse(&repository)
                .map(|repository_id| repository_id.full_name())
                .unwrap_or(repository);
            SearchScope::Repository(normalized)
        } else if let Some(organization) = non_empty(organization) {
            SearchScope::Organization(organization)
        } else if let Some(user) = non_empty(user) {
            SearchScope::User(user)
        } else {
            SearchScope::Viewer
        }
    }

    /// The `repo:`/`org:`/`user:` clause, or `None` while the scope is unresolved.
    pub fn qualifier(&self) -> Option<String> {
        match self {
            SearchScope::Repository(repository) => Some(format!("repo:{}", repository)),
            SearchScope::Organization(organization) => Some(format!("org:{}", organization)),
            SearchScope::User(user) => Some(format!("user:{}", user)),
            SearchScope::Viewer => None,
        }
    }
}

/// Assembles a search expression from its clauses.
///
/// Clauses are joined with a single space in the order
/// `[filter, is:<kind>..., <scope qualifier>]`. Empty clauses are dropped. Nothing is
/// deduplicated or validated.
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    filter: String,
    kinds: Vec<String>,
    scope: Option<String>,
}

impl SearchQueryBuilder {
    pub fn new<T: Into<String>>(filter: T) -> Self {
        Self {
            filter: filter.into(),
            ..Default::default()
        }
    }

    /// Appends one `is:<tag>` clause.
    pub fn kind<T: ToString>(mut self, tag: T) -> Self {
        self.kinds.push(tag.to_string());
        self
    }

    /// Appends an `is:<tag>` clause for each tag, in order.
    pub fn kinds<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.kinds.extend(tags.into_iter().map(|tag| tag.to_string()));
        self
    }

    pub fn scope(mut self, scope: &SearchScope) -> Self {
        self.scope = scope.qualifier();
        self
    }

    pub fn build(self) -> SearchQuery {
        let kind_clauses = self
            .kinds
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(|tag| format!("is:{}", tag));

        let clauses: Vec<String> = std::iter::once(self.filter.trim().to_string())
            .chain(kind_clauses)
            .chain(self.scope)
            .filter(|clause| !clause.is_empty())
            .collect();

        SearchQuery(clauses.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_orders_filter_kind_scope() {
        let query = SearchQuery::builder("merged:>=2020-10-08")
            .kind(IssueKind::PullRequest)
            .scope(&SearchScope::Repository("octocat/hello-world".to_string()))
            .build();

        assert_eq!(
            query.as_str(),
            "merged:>=2020-10-08 is:pr repo:octocat/hello-world"
        );
    }

    #[test]
    fn test_builder_omits_empty_clauses() {
        let query = SearchQuery::builder("")
            .kind(IssueKind::Issue)
            .kinds(["", "  ", "open"])
            .scope(&SearchScope::Organization("rust-lang".to_string()))
            .build();
        assert_eq!(query.as_str(), "is:issue is:open org:rust-lang");

        let query = SearchQuery::builder("   ").build();
        assert_eq!(query.as_str(), "");

        let query = SearchQuery::builder("label:bug")
            .scope(&SearchScope::Viewer)
            .build();
        assert_eq!(query.as_str(), "label:bug");
    }

    #[test]
    fn test_builder_passes_filter_through_verbatim() {
        let query = SearchQuery::builder("is:pr  author:someone")
            .kind(IssueKind::PullRequest)
            .scope(&SearchScope::User("someone".to_string()))
            .build();

        // no deduplication of the repeated is:pr clause
        assert_eq!(query.as_str(), "is:pr  author:someone is:pr user:someone");
    }

    #[test]
    fn test_scope_from_flags_prefers_repository() {
        assert_eq!(
            SearchScope::from_flags(Some("https://github.com/a/b.git".to_string()), None, None),
            SearchScope::Repository("a/b".to_string())
        );
        assert_eq!(
            SearchScope::from_flags(Some("not a repo".to_string()), None, None),
            SearchScope::Repository("not a repo".to_string())
        );
        assert_eq!(
            SearchScope::from_flags(None, Some("org".to_string()), None),
            SearchScope::Organization("org".to_string())
        );
        assert_eq!(
            SearchScope::from_flags(None, None, Some("me".to_string())),
            SearchScope::User("me".to_string())
        );
        assert_eq!(
            SearchScope::from_flags(Some("".to_string()), None, None),
            SearchScope::Viewer
        );
    }

    #[test]
    fn test_scope_from_flags_trims_values() {
        let scopes = [
            SearchScope::from_flags(Some(" a/b ".to_string()), None, None),
            SearchScope::from_flags(None, Some(" github".to_string()), None),
            SearchScope::from_flags(None, None, Some("octocat\n".to_string())),
            SearchScope::from_flags(None, Some("   ".to_string()), None),
        ];

        assert_eq!(
            scopes,
            [
                SearchScope::Repository("a/b".to_string()),
                SearchScope::Organization("github".to_string()),
                SearchScope::User("octocat".to_string()),
                SearchScope::Viewer,
            ]
        );

        let query = SearchQuery::builder("is:open").scope(&scopes[1]).build();
        assert_eq!(query.as_str(), "is:open org:github");
    }

    #[test]
    fn test_exactly_one_scope_clause() {
        let scopes = [
            SearchScope::Repository("a/b".to_string()),
            SearchScope::Organization("org".to_string()),
            SearchScope::User("me".to_string()),
        ];

        for scope in scopes {
            let query = SearchQuery::builder("is:open").scope(&scope).build();
            let scope_clauses = query
                .as_str()
                .split(' ')
                .filter(|clause| {
                    clause.starts_with("repo:")
                        || clause.starts_with("org:")
                        || clause.starts_with("user:")
                })
                .count();
            assert_eq!(scope_clauses, 1, "{}", query);
            assert!(query.as_str().ends_with(&scope.qualifier().unwrap()));
        }
    }

    #[test]
    fn test_search_type_names() {
        assert_eq!(SearchType::Issue.to_string(), "ISSUE");
        assert_eq!(SearchType::Repository.to_string(), "REPOSITORY");
        assert_eq!(SearchType::Repository.count_field(), "repositoryCount");
        assert_eq!(IssueKind::PullRequest.to_string(), "pr");
    }
}
