use serde::Serialize;

pub const VIEWER_QUERY_NAME: &str = "viewer_login";

/// The viewer query takes no variables.
#[derive(Debug, Clone, Serialize)]
pub struct NoVariables {}

pub fn viewer_query() -> String {
    r#"
        query {
            viewer {
                login
            }
        }"#
    .to_string()
}
