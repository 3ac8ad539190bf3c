//! Configuration loading and resolution.
mod apply;
mod loader;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::{Settings, ViewRetries, resolve_settings};
pub use loader::load_config;

#[cfg(test)]
pub(crate) use loader::load_config_file;
