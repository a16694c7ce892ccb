pub mod graphql_types;
pub mod search;
pub mod viewer;
