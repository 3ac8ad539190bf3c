use std::path::PathBuf;
use std::time::Duration;

use crate::api::{DEFAULT_PAGE_SIZE, RetryPolicy};
use crate::args::Cli;
use crate::error::{AppError, AppResult, ValidationError};
use crate::series::Palette;

use super::types::{ConfigFile, RetrySection};

const DEFAULT_NETWORK: &str = "mainnet";
const DEFAULT_OUTPUT_DIR: &str = "charts";
const DEFAULT_FALLBACK_CONTINENT: &str = "EU";
const DEFAULT_EXPIRY_POLICIES: [&str; 5] = ["none", "30d", "6m", "1y", "2y"];

/// Resolved runtime settings: CLI flags over config file over defaults.
#[derive(Clone, Debug)]
pub struct Settings {
    pub endpoint: String,
    pub network: String,
    pub page_size: u32,
    pub output_dir: PathBuf,
    pub palette: Palette,
    pub fallback_continent: String,
    pub expiry_policies: Vec<String>,
    pub retry: ViewRetries,
}

#[derive(Clone, Copy, Debug)]
pub struct ViewRetries {
    pub latency: RetryPolicy,
    pub blob_timing: RetryPolicy,
    pub state_growth: RetryPolicy,
    pub geo: RetryPolicy,
}

/// # Errors
///
/// Returns a validation error when no endpoint is configured anywhere, when
/// a palette override entry is malformed, or when the expiry-policy list is
/// explicitly empty.
pub fn resolve_settings(cli: &Cli, file: Option<&ConfigFile>) -> AppResult<Settings> {
    let api = file.and_then(|file| file.api.as_ref());
    let views = file.and_then(|file| file.views.as_ref());

    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| api.and_then(|api| api.endpoint.clone()))
        .ok_or_else(|| AppError::validation(ValidationError::MissingEndpoint))?;

    let network = cli
        .network
        .clone()
        .or_else(|| api.and_then(|api| api.network.clone()))
        .unwrap_or_else(|| DEFAULT_NETWORK.to_owned());

    let page_size = cli
        .page_size
        .or_else(|| api.and_then(|api| api.page_size))
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| {
            file.and_then(|file| file.output.as_ref())
                .and_then(|output| output.directory.clone())
        })
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    let palette = match file.and_then(|file| file.palette.as_ref()) {
        Some(entries) => Palette::from_hex(entries)?,
        None => Palette::default(),
    };

    let fallback_continent = file
        .and_then(|file| file.geo.as_ref())
        .and_then(|geo| geo.fallback_continent.clone())
        .unwrap_or_else(|| DEFAULT_FALLBACK_CONTINENT.to_owned());

    let expiry_policies = match views.and_then(|views| views.expiry_policies.clone()) {
        Some(policies) if policies.is_empty() => {
            return Err(AppError::validation(ValidationError::NoExpiryPolicies));
        }
        Some(policies) => policies,
        None => DEFAULT_EXPIRY_POLICIES
            .iter()
            .map(|policy| (*policy).to_owned())
            .collect(),
    };

    let retry = ViewRetries {
        latency: retry_policy(views.and_then(|views| views.latency.as_ref())),
        blob_timing: retry_policy(views.and_then(|views| views.blob_timing.as_ref())),
        state_growth: retry_policy(views.and_then(|views| views.state_growth.as_ref())),
        geo: retry_policy(views.and_then(|views| views.geo.as_ref())),
    };

    Ok(Settings {
        endpoint,
        network,
        page_size,
        output_dir,
        palette,
        fallback_continent,
        expiry_policies,
        retry,
    })
}

/// Default fetch behavior: three attempts with a 500ms base backoff.
/// `max_attempts = 1` in a view section turns retries off for that view.
fn retry_policy(section: Option<&RetrySection>) -> RetryPolicy {
    let defaults = RetryPolicy::backoff(3, Duration::from_millis(500), Duration::from_secs(5));
    section.map_or(defaults, |section| {
        RetryPolicy::backoff(
            section.max_attempts.unwrap_or(defaults.max_attempts).max(1),
            section
                .base_delay_ms
                .map_or(defaults.base_delay, Duration::from_millis),
            section
                .max_delay_ms
                .map_or(defaults.max_delay, Duration::from_millis),
        )
    })
}
