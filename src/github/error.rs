use std::time::Duration;

/// Classification of failed GraphQL calls.
///
/// Every variant aborts the running command; none of them is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// GitHub answered with an error status (bad credentials, forbidden, 5xx...)
    GitHub { status: u16, message: String },
    /// HTTP layer failure before a response was received
    Transport(String),
    /// Response body could not be decoded
    Decode(String),
    /// The response carried a GraphQL `errors` array
    GraphQL(String),
    /// No response within the configured request timeout
    Timeout(Duration),
    /// The response had neither errors nor data
    MissingData(String),
}

impl ApiError {
    /// Convert octocrab error to the matching category
    pub fn from_octocrab_error(error: octocrab::Error) -> Self {
        tracing::debug!("Raw octocrab error: {:?}", error);

        match &error {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                tracing::error!(
                    "GitHub API error - Status: {}, Message: {:?}, Documentation: {:?}",
                    status,
                    source.message,
                    source.documentation_url
                );
                Self::GitHub {
                    status,
                    message: source.message.clone(),
                }
            }
            octocrab::Error::Http { .. } => Self::Transport(format!("HTTP layer error: {}", error)),
            octocrab::Error::Hyper { .. } => Self::Transport(format!("Hyper HTTP error: {}", error)),
            octocrab::Error::Json { .. } => Self::Decode(format!("JSON parsing error: {}", error)),
            octocrab::Error::Uri { .. } => Self::Transport(format!("URI parsing error: {}", error)),
            _ => Self::Transport(format!("Unknown error type: {}", error)),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GitHub { status, message } => {
                write!(f, "GitHub API error (status {}): {}", status, message)
            }
            Self::Transport(msg) => write!(f, "Transport error: {}", msg),
            Self::Decode(msg) => write!(f, "Decode error: {}", msg),
            Self::GraphQL(msg) => write!(f, "GraphQL error: {}", msg),
            Self::Timeout(duration) => write!(f, "GraphQL request timed out after {:?}", duration),
            Self::MissingData(query_name) => {
                write!(f, "No data in GraphQL {} response", query_name)
            }
        }
    }
}

impl std::error::Error for ApiError {}
