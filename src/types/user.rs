//! User types for search result authors
//!
//! Author logins are the grouping key for author rankings. GitHub returns no author
//! for deleted ("ghost") accounts, so the empty login is a valid value here.

use serde::{Deserialize, Serialize};

use crate::github::graphql::graphql_types::Author;

/// User identifier wrapper type for GitHub logins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct User(String);

impl User {
    pub fn new(login: String) -> Self {
        Self(login)
    }

    /// Get the login as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the group collecting nodes without an author
    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for User {
    fn from(s: &str) -> Self {
        User::new(s.to_string())
    }
}

impl From<String> for User {
    fn from(s: String) -> Self {
        User::new(s)
    }
}

impl From<Option<Author>> for User {
    fn from(author: Option<Author>) -> Self {
        author
            .and_then(|author| author.login)
            .map(User::new)
            .unwrap_or_default()
    }
}

impl PartialEq<&str> for User {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
