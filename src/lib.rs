/// Text and JSON rendering of stats results
pub mod formatter;

/// GitHub GraphQL executor, query text and response types
pub mod github;

/// Query building, pagination and aggregation behind each command
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;
