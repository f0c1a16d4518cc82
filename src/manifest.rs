//! Version extraction from the project manifest

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Manifest path relative to the working directory
pub const MANIFEST_FILE: &str = "package.json";

const EXTRACTION_FAILED: &str =
    "Error getting the new version number. See debug logs for more information.";

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    version: Option<String>,
}

/// Read the `version` field of a JSON manifest.
///
/// Any failure is reported as [`Error::VersionExtraction`] with a generic
/// message; the underlying cause only goes to the debug log.
pub fn read_version(path: &Path) -> Result<String> {
    match try_read_version(path) {
        Ok(version) => {
            info!("New version is: {version}");
            Ok(version)
        }
        Err(cause) => {
            debug!(path = %path.display(), %cause, "version extraction failed");
            Err(Error::VersionExtraction(EXTRACTION_FAILED.to_string()))
        }
    }
}

fn try_read_version(path: &Path) -> std::result::Result<String, String> {
    let data = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let manifest: Manifest = serde_json::from_str(&data).map_err(|e| e.to_string())?;

    match manifest.version {
        Some(version) if !version.is_empty() => Ok(version),
        _ => Err(format!(
            "Could not find version number in {}",
            path.file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
        )),
    }
}
