mod pager;
mod search;
mod user;

use serde::{Deserialize, Serialize};

use crate::github::error::ApiError;

pub use pager::*;
pub use search::*;
pub use user::*;

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLQuery(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLPayload<T: serde::Serialize> {
    pub query: GraphQLQuery,
    pub variables: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

impl<T> GraphQLResponse<T> {
    /// Unwraps `data`, turning an `errors` array or a missing payload into an [`ApiError`].
    pub fn into_data(self, query_name: &str) -> Result<T, ApiError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            return Err(ApiError::GraphQL(join_error_messages(&errors)));
        }

        self.data
            .ok_or_else(|| ApiError::MissingData(query_name.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<serde_json::Value>,
    #[serde(default)]
    pub path: Vec<serde_json::Value>,
}

pub fn join_error_messages(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
