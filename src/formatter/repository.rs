use crate::types::RepositoryId;

/// One `owner/name` per line, in the given order.
pub fn repository_list_text(repositories: &[RepositoryId]) -> String {
    let mut content = String::new();
    for repository in repositories {
        content.push_str(&format!("{}\n", repository));
    }
    content
}
