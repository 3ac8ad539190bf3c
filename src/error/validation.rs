use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing API endpoint (set --endpoint or provide in config).")]
    MissingEndpoint,
    #[error("Invalid slot range: start {start} is after end {end}.")]
    InvalidSlotRange { start: u64, end: u64 },
    #[error("Unknown filter key '{key}'.")]
    UnknownFilterKey { key: String },
    #[error("Reserved parameter '{key}' appeared more than once.")]
    DuplicateReservedKey { key: String },
    #[error("Invalid page size '{value}'.")]
    InvalidPageSize { value: String },
    #[error("No expiry policies configured for the state-growth view.")]
    NoExpiryPolicies,
    #[error("Invalid palette color '{value}' (expected #rrggbb).")]
    InvalidColor { value: String },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
