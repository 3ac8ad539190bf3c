use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid API endpoint '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to join URL path '{path}': {source}")]
    JoinPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to '{table}' failed: {source}")]
    RequestFailed {
        table: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to '{table}' returned status {status}.")]
    UnexpectedStatus { table: String, status: u16 },
    #[error("Failed to decode '{table}' response: {source}")]
    DecodeFailed {
        table: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Pagination for '{table}' did not terminate after {pages} pages.")]
    PaginationRunaway { table: String, pages: u64 },
    #[error("No bounds available for table '{table}'.")]
    BoundsUnavailable { table: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
}

impl ApiError {
    /// Whether a retry policy may re-issue the request that produced this error.
    ///
    /// Transport failures and server-side statuses are retryable; client-side
    /// statuses and decode failures are not (re-sending the same request
    /// cannot change the outcome).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RequestFailed { .. } => true,
            ApiError::UnexpectedStatus { status, .. } => *status >= 500,
            ApiError::InvalidEndpoint { .. }
            | ApiError::JoinPath { .. }
            | ApiError::BuildClientFailed { .. }
            | ApiError::DecodeFailed { .. }
            | ApiError::PaginationRunaway { .. }
            | ApiError::BoundsUnavailable { .. } => false,
            #[cfg(test)]
            ApiError::TestExpectation { .. } => false,
        }
    }
}
