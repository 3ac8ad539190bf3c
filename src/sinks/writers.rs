use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{AppError, AppResult, SinkError};

/// Writes a pretty-printed JSON export, creating parent directories as
/// needed.
///
/// # Errors
///
/// Returns an error when serialization or the filesystem write fails.
pub async fn write_json<T: Serialize>(what: &'static str, path: &Path, value: &T) -> AppResult<()> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|err| AppError::sink(SinkError::Serialize { what, source: err }))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                AppError::sink(SinkError::CreateDir {
                    path: parent.to_path_buf(),
                    source: err,
                })
            })?;
        }
    }
    tokio::fs::write(path, bytes).await.map_err(|err| {
        AppError::sink(SinkError::WriteFile {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    info!(what, path = %path.display(), "export written");
    Ok(())
}
