use crate::types::AuthorMatches;

const AUTHORS_HEADER: &str = "AUTHORS";
const MATCHES_HEADER: &str = "MATCHES";

/// Two-column `AUTHORS`/`MATCHES` table without borders.
///
/// The login column is left aligned and padded to its widest cell; columns are
/// separated by a tab.
pub fn author_table_text(ranking: &[AuthorMatches]) -> String {
    let width = ranking
        .iter()
        .map(|row| row.author.as_str().chars().count())
        .chain(std::iter::once(AUTHORS_HEADER.len()))
        .max()
        .unwrap_or(AUTHORS_HEADER.len());

    let mut content = format!("{:<width$}\t{}\n", AUTHORS_HEADER, MATCHES_HEADER);
    for row in ranking {
        content.push_str(&format!(
            "{:<width$}\t{}\n",
            row.author.as_str(),
            row.matches
        ));
    }
    content
}
