//! Repository identifier types and parsing
//!
//! Search results carry repositories as `nameWithOwner` strings and the CLI accepts
//! either the same `owner/name` form or a GitHub URL. All of that parsing lives here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::github::graphql::graphql_types::RepositoryNode;

static HTTPS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?github\.com/([^/]+)/([^/]+?)(?:\.git)?(?:/.*)?/?$")
        .expect("Failed to compile HTTPS regex")
});

static SSH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@github\.com:([^/]+)/([^/]+?)(?:\.git)?/?$")
        .expect("Failed to compile SSH regex")
});

static NAME_WITH_OWNER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^/\s]+)/([^/\s]+)$").expect("Failed to compile name-with-owner regex")
});

/// Owner name wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Owner(pub String);

impl Owner {
    pub fn new(owner: String) -> Self {
        Self(owner)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Owner {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Repository name wrapper for type safety
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct RepositoryName(pub String);

impl RepositoryName {
    pub fn new(repo_name: String) -> Self {
        Self(repo_name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RepositoryName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Canonical `owner/name` repository identifier.
///
/// Serializes as the `owner/name` string so JSON output matches what the API returns
/// in `nameWithOwner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryId {
    pub owner: Owner,
    pub repository_name: RepositoryName,
}

impl RepositoryId {
    pub fn new<T1: Into<String>, T2: Into<String>>(owner: T1, name: T2) -> Self {
        Self {
            owner: Owner::new(owner.into()),
            repository_name: RepositoryName::new(name.into()),
        }
    }

    /// Parses the strict `owner/name` form used by `nameWithOwner`.
    pub fn parse_name_with_owner(input: &str) -> Result<Self, String> {
        NAME_WITH_OWNER_REGEX
            .captures(input)
            .and_then(|captures| owner_and_name(&captures))
            .ok_or_else(|| format!("Invalid repository name with owner: {:?}", input))
    }

    /// Parse repository identifier from various input formats
    /// - "owner/repo"
    /// - "https://github.com/owner/repo" - GitHub URL
    /// - "git@github.com:owner/repo.git" - SSH format
    pub fn parse(input: &str) -> Result<Self, String> {
        let input_str = input.trim().trim_end_matches('/');

        for regex in [&*SSH_REGEX, &*HTTPS_REGEX, &*NAME_WITH_OWNER_REGEX] {
            if let Some(repository_id) = regex
                .captures(input_str)
                .and_then(|captures| owner_and_name(&captures))
            {
                return Ok(repository_id);
            }
        }

        Err(format!("Invalid repository format: {}", input_str))
    }

    /// Returns the full name (owner/repository_name format)
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repository_name)
    }
}

fn owner_and_name(captures: &regex::Captures<'_>) -> Option<RepositoryId> {
    let owner = captures.get(1)?.as_str();
    let name = captures.get(2)?.as_str();
    Some(RepositoryId::new(owner, name))
}

impl std::fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repository_name)
    }
}

impl Serialize for RepositoryId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl TryFrom<RepositoryNode> for RepositoryId {
    type Error = anyhow::Error;

    fn try_from(node: RepositoryNode) -> Result<Self, Self::Error> {
        let name_with_owner = node
            .name_with_owner
            .ok_or_else(|| anyhow::anyhow!("Search result node is not a repository"))?;

        RepositoryId::parse_name_with_owner(&name_with_owner).map_err(anyhow::Error::msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_name_with_owner_and_urls() {
        let expected = RepositoryId::new("rust-lang", "rust");

        for input in [
            "rust-lang/rust",
            "https://github.com/rust-lang/rust",
            "https://github.com/rust-lang/rust.git",
            "https://github.com/rust-lang/rust/",
            "github.com/rust-lang/rust/issues",
            "git@github.com:rust-lang/rust.git",
        ] {
            assert_eq!(RepositoryId::parse(input).unwrap(), expected, "{}", input);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(RepositoryId::parse("just-a-name").is_err());
        assert!(RepositoryId::parse("a/b/c").is_err());
        assert!(RepositoryId::parse("").is_err());
    }

    #[test]
    fn test_parse_name_with_owner_is_strict() {
        assert_eq!(
            RepositoryId::parse_name_with_owner("octocat/hello-world").unwrap(),
            RepositoryId::new("octocat", "hello-world")
        );
        assert!(RepositoryId::parse_name_with_owner("https://github.com/octocat/hello-world").is_err());
        assert!(RepositoryId::parse_name_with_owner("octocat hello/world").is_err());
    }

    #[test]
    fn test_display_and_serialize_as_name_with_owner() {
        let repository_id = RepositoryId::new("octocat", "hello-world");
        assert_eq!(repository_id.to_string(), "octocat/hello-world");
        assert_eq!(repository_id.full_name(), "octocat/hello-world");
        assert_eq!(
            serde_json::to_string(&repository_id).unwrap(),
            "\"octocat/hello-world\""
        );
    }

    #[test]
    fn test_try_from_node_without_name_fails() {
        let node = RepositoryNode {
            name_with_owner: None,
        };
        assert!(RepositoryId::try_from(node).is_err());
    }
}
