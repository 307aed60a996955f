//! Remote source module
//!
//! Fetches the titools bundle from its GitHub repository and checks for
//! newer releases.

pub mod archive;
mod client;

use std::cmp::Ordering;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::config::SourceConfig;
use crate::core::bundle::BundleSource;
use crate::core::version::compare_versions;

pub use client::{SourceClient, MAX_ARCHIVE_SIZE};

/// A bundle extracted into a temporary directory
///
/// The directory is removed when this value is dropped.
pub struct DownloadedBundle {
    pub bundle: BundleSource,
    _workdir: TempDir,
}

/// Download and extract the bundle archive
pub fn download_bundle(config: &SourceConfig) -> Result<DownloadedBundle> {
    let client = SourceClient::from_config(config)?;
    let bytes = client.download_archive()?;

    let workdir = tempfile::Builder::new()
        .prefix("titanium-skills-")
        .tempdir()
        .context("Failed to create temporary directory")?;

    let root: PathBuf = archive::extract_archive(&bytes, workdir.path())?;
    let bundle = BundleSource::open(root)?;

    Ok(DownloadedBundle {
        bundle,
        _workdir: workdir,
    })
}

/// Newer published version than `current`, if any
pub fn check_for_update(client: &SourceClient, current: &str) -> Result<Option<String>> {
    let latest = client.latest_version()?;
    Ok(newer_version(&latest, current))
}

fn newer_version(latest: &str, current: &str) -> Option<String> {
    match compare_versions(latest, current) {
        Ordering::Greater => Some(latest.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_version() {
        assert_eq!(newer_version("1.2.0", "1.1.9").as_deref(), Some("1.2.0"));
        assert_eq!(newer_version("1.1.0", "1.1.0"), None);
        assert_eq!(newer_version("1.1", "1.1.0"), None);
        assert_eq!(newer_version("1.0.9", "1.1.0"), None);
    }
}
