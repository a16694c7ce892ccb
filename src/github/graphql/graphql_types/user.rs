use serde::{Deserialize, Serialize};

/// `author { login }` of an issue or pull request. GitHub returns `null` for
/// deleted accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub login: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerResponse {
    pub viewer: ViewerNode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerNode {
    pub login: String,
}
