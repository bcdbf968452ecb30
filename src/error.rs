//! Explicit failure taxonomy for the docgo runtime
//!
//! Missing or malformed artifacts degrade silently and never appear here;
//! these are the failures a script receives and must decide about.

/// Failures raised to the embedding script
#[derive(Debug, thiserror::Error)]
pub enum DocGoError {
    /// Malformed payload passed where a structured value was expected
    #[error("Failed to parse entity of type {entity}: {message}")]
    EntityParse { entity: String, message: String },

    /// No base URL resolvable for an outbound API call
    #[error("API base URL not configured")]
    ApiBaseUrlMissing,

    /// Outbound API call returned a non-success status
    #[error("API call failed: {status}")]
    ApiCallFailed { status: reqwest::StatusCode },

    /// The sibling-process dispatcher returned a non-success status
    #[error("MCP call failed: {status}")]
    AppCallFailed { status: reqwest::StatusCode },
}
