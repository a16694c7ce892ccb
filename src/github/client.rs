use anyhow::{Context, Result};
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tokio::time::Duration;
use tracing::{debug, error};

use super::error::ApiError;
use super::graphql::graphql_types::{GraphQLPayload, GraphQLResponse, join_error_messages};

/// Default per-request timeout for GraphQL calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs one GraphQL document against the remote API.
///
/// This is the only seam between the stats logic and the network: implementations
/// own authentication and timeouts, callers own query text and variables.
pub trait GraphQLExecutor {
    #[allow(async_fn_in_trait)]
    async fn execute_graphql<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        query_name: &str,
        payload: GraphQLPayload<T>,
    ) -> Result<GraphQLResponse<R>>;
}

/// Installs the ring crypto provider for rustls.
///
/// Must run before the first client is built; repeated calls are no-ops.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

#[derive(Clone)]
pub struct GitHubClient {
    client: octocrab::Octocrab,
    request_timeout: Duration,
}

impl GitHubClient {
    pub fn new(token: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        Self::build(token, timeout, None)
    }

    /// Builds a client talking to `base_uri` instead of `https://api.github.com`
    /// (GitHub Enterprise, or a local mock server).
    pub fn with_base_uri(
        token: Option<String>,
        timeout: Option<Duration>,
        base_uri: &str,
    ) -> Result<Self> {
        Self::build(token, timeout, Some(base_uri))
    }

    fn build(
        token: Option<String>,
        timeout: Option<Duration>,
        base_uri: Option<&str>,
    ) -> Result<Self> {
        let mut builder = Octocrab::builder();

        if let Some(base_uri) = base_uri {
            builder = builder
                .base_uri(base_uri)
                .with_context(|| format!("Invalid GitHub API base URI: {}", base_uri))?;
        }

        if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
            builder = builder.personal_token(token);
        }

        let request_timeout = timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        let connection_timeout = if request_timeout < Duration::from_secs(10) {
            std::cmp::max(request_timeout, Duration::from_secs(1))
        } else {
            Duration::from_secs(10)
        };
        let read_write_timeout = std::cmp::max(request_timeout, Duration::from_secs(1));

        builder = builder
            .set_connect_timeout(Some(connection_timeout))
            .set_read_timeout(Some(read_write_timeout))
            .set_write_timeout(Some(read_write_timeout));

        let client = builder.build().context("Failed to build GitHub client")?;

        Ok(Self {
            client,
            request_timeout: read_write_timeout,
        })
    }
}

impl GraphQLExecutor for GitHubClient {
    async fn execute_graphql<T: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        query_name: &str,
        payload: GraphQLPayload<T>,
    ) -> Result<GraphQLResponse<R>> {
        debug!(
            "Starting GraphQL request {} with payload: {}",
            query_name,
            serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "Invalid JSON".to_string())
        );

        let start_time = std::time::Instant::now();

        let response: GraphQLResponse<R> =
            tokio::time::timeout(self.request_timeout, self.client.graphql(&payload))
                .await
                .map_err(|_| {
                    let duration = start_time.elapsed();
                    error!("GraphQL request {} timed out after {:?}", query_name, duration);
                    ApiError::Timeout(duration)
                })?
                .map_err(ApiError::from_octocrab_error)?;

        debug!(
            "GraphQL request {} completed in {:?}",
            query_name,
            start_time.elapsed()
        );

        if let Some(errors) = &response.errors {
            if !errors.is_empty() {
                let error_msg = join_error_messages(errors);
                error!("GraphQL request {} returned errors: {}", query_name, error_msg);
                return Err(ApiError::GraphQL(error_msg).into());
            }
        }

        Ok(response)
    }
}
