use std::io::Write as _;
use std::time::Duration;

use clap::Parser;
use tempfile::tempdir;

use crate::args::Cli;
use crate::error::{AppError, AppResult};
use crate::series::{Palette, Rgb};

use super::{load_config_file, resolve_settings, types::ConfigFile};

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["slotscope"];
    full.extend_from_slice(args);
    full.push("geo");
    Cli::parse_from(full)
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> AppResult<std::path::PathBuf> {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(content.as_bytes())?;
    Ok(path)
}

#[test]
fn loads_toml_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = write_file(
        &dir,
        "slotscope.toml",
        r#"
[api]
endpoint = "http://example.test"
network = "holesky"
page_size = 250

[views]
expiry_policies = ["none", "1y"]

[views.latency]
max_attempts = 1

[geo]
fallback_continent = "NA"
"#,
    )?;
    let file = load_config_file(&path)?;
    let settings = resolve_settings(&cli(&[]), Some(&file))?;
    assert_eq!(settings.endpoint, "http://example.test");
    assert_eq!(settings.network, "holesky");
    assert_eq!(settings.page_size, 250);
    assert_eq!(settings.fallback_continent, "NA");
    assert_eq!(settings.expiry_policies, vec!["none", "1y"]);
    // max_attempts = 1 turns retries off for that view only.
    assert_eq!(settings.retry.latency.max_attempts, 1);
    assert_eq!(settings.retry.geo.max_attempts, 3);
    Ok(())
}

#[test]
fn loads_json_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = write_file(
        &dir,
        "slotscope.json",
        r#"{"api": {"endpoint": "http://json.test"}}"#,
    )?;
    let file = load_config_file(&path)?;
    let settings = resolve_settings(&cli(&[]), Some(&file))?;
    assert_eq!(settings.endpoint, "http://json.test");
    Ok(())
}

#[test]
fn rejects_unknown_extension() -> AppResult<()> {
    let dir = tempdir()?;
    let path = write_file(&dir, "slotscope.yaml", "api: {}")?;
    assert!(load_config_file(&path).is_err());
    Ok(())
}

#[test]
fn cli_flags_override_the_config_file() -> AppResult<()> {
    let file = ConfigFile {
        api: Some(super::types::ApiSection {
            endpoint: Some("http://file.test".to_owned()),
            network: Some("holesky".to_owned()),
            page_size: Some(10),
        }),
        ..ConfigFile::default()
    };
    let settings = resolve_settings(
        &cli(&["--endpoint", "http://flag.test", "--network", "mainnet"]),
        Some(&file),
    )?;
    assert_eq!(settings.endpoint, "http://flag.test");
    assert_eq!(settings.network, "mainnet");
    assert_eq!(settings.page_size, 10);
    Ok(())
}

#[test]
fn missing_endpoint_is_a_validation_error() {
    let result = resolve_settings(&cli(&[]), None);
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn empty_expiry_policy_list_is_rejected() {
    let file = ConfigFile {
        views: Some(super::types::ViewsSection {
            expiry_policies: Some(Vec::new()),
            ..super::types::ViewsSection::default()
        }),
        ..ConfigFile::default()
    };
    let result = resolve_settings(&cli(&["--endpoint", "http://x.test"]), Some(&file));
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn palette_override_is_applied() -> AppResult<()> {
    let file = ConfigFile {
        palette: Some(vec!["#010203".to_owned()]),
        ..ConfigFile::default()
    };
    let settings = resolve_settings(&cli(&["--endpoint", "http://x.test"]), Some(&file))?;
    assert_eq!(settings.palette.color_at(0), Rgb { r: 1, g: 2, b: 3 });
    assert_ne!(settings.palette, Palette::default());
    Ok(())
}

#[test]
fn defaults_fill_everything_else() -> AppResult<()> {
    let settings = resolve_settings(&cli(&["--endpoint", "http://x.test"]), None)?;
    assert_eq!(settings.network, "mainnet");
    assert_eq!(settings.page_size, crate::api::DEFAULT_PAGE_SIZE);
    assert_eq!(settings.output_dir, std::path::PathBuf::from("charts"));
    assert_eq!(settings.expiry_policies.len(), 5);
    assert_eq!(settings.retry.latency.base_delay, Duration::from_millis(500));
    Ok(())
}
