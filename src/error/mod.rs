mod api;
mod app;
mod config;
mod sink;
mod validation;

#[cfg(test)]
mod test_support;

pub use api::ApiError;
pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use sink::SinkError;
pub use validation::ValidationError;
