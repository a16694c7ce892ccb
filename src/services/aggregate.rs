//! Reductions over fetched search nodes

use ahash::AHashMap;
use anyhow::{Context, Result};

use crate::github::graphql::graphql_types::{AuthorNode, RepositoryNode};
use crate::types::{AuthorMatches, RepositoryId, User};

/// Groups nodes by author login and ranks the logins by match count, most first.
///
/// Nodes without an author are counted under the empty login. Logins with equal
/// counts keep the order in which they were first seen.
pub fn rank_authors<I>(nodes: I) -> Vec<AuthorMatches>
where
    I: IntoIterator<Item = AuthorNode>,
{
    let mut positions: AHashMap<User, usize> = AHashMap::new();
    let mut ranking: Vec<AuthorMatches> = Vec::new();

    for node in nodes {
        let author = User::from(node.author);
        match positions.get(&author) {
            Some(&position) => ranking[position].matches += 1,
            None => {
                positions.insert(author.clone(), ranking.len());
                ranking.push(AuthorMatches::new(author, 1));
            }
        }
    }

    // stable, so first-seen order survives among ties
    ranking.sort_by(|a, b| b.matches.cmp(&a.matches));
    ranking
}

/// Repository identifiers in the order the API returned them.
pub fn repository_listing<I>(nodes: I) -> Result<Vec<RepositoryId>>
where
    I: IntoIterator<Item = RepositoryNode>,
{
    nodes
        .into_iter()
        .enumerate()
        .map(|(index, node)| {
            RepositoryId::try_from(node)
                .with_context(|| format!("Invalid repository search result at index {}", index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::graphql::graphql_types::Author;

    fn authored(login: &str) -> AuthorNode {
        AuthorNode {
            author: Some(Author {
                login: Some(login.to_string()),
            }),
        }
    }

    fn repository(name_with_owner: &str) -> RepositoryNode {
        RepositoryNode {
            name_with_owner: Some(name_with_owner.to_string()),
        }
    }

    #[test]
    fn test_rank_authors_by_frequency() {
        let nodes = ["A", "B", "A", "C", "A", "B"].map(authored);

        assert_eq!(
            rank_authors(nodes),
            vec![
                AuthorMatches::new("A", 3),
                AuthorMatches::new("B", 2),
                AuthorMatches::new("C", 1),
            ]
        );
    }

    #[test]
    fn test_rank_authors_breaks_ties_by_first_seen() {
        let nodes = ["z", "y", "x", "y", "z", "w"].map(authored);

        assert_eq!(
            rank_authors(nodes),
            vec![
                AuthorMatches::new("z", 2),
                AuthorMatches::new("y", 2),
                AuthorMatches::new("x", 1),
                AuthorMatches::new("w", 1),
            ]
        );
    }

    #[test]
    fn test_rank_authors_groups_missing_authors_under_empty_login() {
        let nodes = vec![
            AuthorNode { author: None },
            authored("a"),
            AuthorNode {
                author: Some(Author { login: None }),
            },
        ];

        let ranking = rank_authors(nodes);
        assert_eq!(
            ranking,
            vec![AuthorMatches::new("", 2), AuthorMatches::new("a", 1)]
        );
        assert!(ranking[0].author.is_anonymous());
    }

    #[test]
    fn test_rank_authors_empty() {
        assert!(rank_authors(Vec::<AuthorNode>::new()).is_empty());
    }

    #[test]
    fn test_repository_listing_keeps_api_order() {
        let listing = repository_listing(vec![repository("c/d"), repository("a/b")]).unwrap();
        assert_eq!(
            listing,
            vec![RepositoryId::new("c", "d"), RepositoryId::new("a", "b")]
        );
    }

    #[test]
    fn test_repository_listing_rejects_malformed_names() {
        let result = repository_listing(vec![repository("a/b"), repository("nope")]);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("index 1"), "{}", message);
    }
}
