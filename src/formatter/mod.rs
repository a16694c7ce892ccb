pub mod author;
pub mod repository;

use anyhow::{Context, Result};
use clap::ValueEnum;

pub use author::*;
pub use repository::*;

use crate::types::StatsOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain lines and tab separated tables
    #[default]
    Text,
    /// One JSON document
    Json,
}

pub fn count_text(count: u64) -> String {
    format!("{}\n", count)
}

/// Renders a stats result for standard output.
pub fn render(output: &StatsOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(match output {
            StatsOutput::Count(count) => count_text(*count),
            StatsOutput::Authors(ranking) => author_table_text(ranking),
            StatsOutput::Repositories(repositories) => repository_list_text(repositories),
        }),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(output).context("Failed to serialize stats output")?;
            Ok(format!("{}\n", json))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AuthorMatches, RepositoryId};

    #[test]
    fn test_render_count_text() {
        assert_eq!(
            render(&StatsOutput::Count(42), OutputFormat::Text).unwrap(),
            "42\n"
        );
    }

    #[test]
    fn test_render_json() {
        let count = render(&StatsOutput::Count(42), OutputFormat::Json).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&count).unwrap(),
            serde_json::json!({"count": 42})
        );

        let authors = render(
            &StatsOutput::Authors(vec![AuthorMatches::new("a", 2)]),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&authors).unwrap(),
            serde_json::json!({"authors": [{"login": "a", "matches": 2}]})
        );

        let repositories = render(
            &StatsOutput::Repositories(vec![RepositoryId::new("a", "b")]),
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&repositories).unwrap(),
            serde_json::json!({"repositories": ["a/b"]})
        );
    }
}
