//! Blocking HTTP client for the titools source repository
//!
//! Two requests exist: the published `package.json` (latest version) and
//! the branch zip archive. Each is a single attempt with the configured
//! timeout; there are no retries.

use std::io::Read;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::{SourceConfig, PACKAGE_VERSION};

/// Maximum accepted archive size (100 MB)
pub const MAX_ARCHIVE_SIZE: u64 = 100 * 1024 * 1024;

/// Subset of package.json we read
#[derive(Debug, Deserialize)]
struct PackageManifest {
    version: String,
}

/// Client for a GitHub-hosted titools repository
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
    owner: String,
    repo: String,
    repo_url: Url,
    branch: String,
}

impl SourceClient {
    /// Create client from config
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Self::new(&config.repo_url, &config.branch, config.timeout_secs)
    }

    /// Create client with explicit parameters
    ///
    /// `repo_url` must look like `https://github.com/<owner>/<repo>`.
    pub fn new(repo_url: &str, branch: &str, timeout_secs: u64) -> Result<Self> {
        let repo_url = Url::parse(repo_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid repository URL: {}", repo_url))?;

        let segments: Vec<&str> = repo_url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let (owner, repo) = match segments.as_slice() {
            [owner, repo] => (owner.to_string(), repo.trim_end_matches(".git").to_string()),
            _ => bail!(
                "Repository URL must be https://github.com/<owner>/<repo>, got {}",
                repo_url
            ),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(format!("titools/{}", PACKAGE_VERSION))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            owner,
            repo,
            repo_url,
            branch: branch.to_string(),
        })
    }

    /// `<repo>/archive/refs/heads/<branch>.zip`
    pub fn archive_url(&self) -> String {
        format!(
            "{}/archive/refs/heads/{}.zip",
            self.repo_url.as_str().trim_end_matches('/'),
            self.branch
        )
    }

    /// `raw.githubusercontent.com/<owner>/<repo>/<branch>/package.json`
    pub fn manifest_url(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/package.json",
            self.owner, self.repo, self.branch
        )
    }

    /// Latest published version
    pub fn latest_version(&self) -> Result<String> {
        let url = self.manifest_url();
        debug!(url = %url, "fetching latest version");

        let response = self
            .client
            .get(&url)
            .send()
            .context("Failed to check the latest version")?;
        let response = check_status(response, "Version check failed")?;

        let body = response.text().context("Failed to read package.json")?;
        parse_manifest_version(&body)
    }

    /// Download the branch archive into memory
    pub fn download_archive(&self) -> Result<Vec<u8>> {
        let url = self.archive_url();
        debug!(url = %url, "downloading archive");

        let response = self
            .client
            .get(&url)
            .send()
            .context("Failed to download archive")?;
        let response = check_status(response, "Archive download failed")?;

        read_limited(response, MAX_ARCHIVE_SIZE)
    }
}

fn parse_manifest_version(body: &str) -> Result<String> {
    let manifest: PackageManifest =
        serde_json::from_str(body).context("Failed to parse package.json")?;
    Ok(manifest.version)
}

fn check_status(response: Response, what: &str) -> Result<Response> {
    if !response.status().is_success() {
        let status = response.status();
        let url = response.url().to_string();
        bail!("{} ({}): {}", what, status, url);
    }
    Ok(response)
}

/// Read a response body, failing once it exceeds `limit` bytes
fn read_limited(response: Response, limit: u64) -> Result<Vec<u8>> {
    if let Some(len) = response.content_length() {
        if len > limit {
            bail!("Archive too large: {} bytes (max: {} bytes)", len, limit);
        }
    }

    let mut bytes = Vec::new();
    response
        .take(limit + 1)
        .read_to_end(&mut bytes)
        .context("Failed to read archive")?;

    if bytes.len() as u64 > limit {
        bail!("Archive exceeds maximum size of {} bytes", limit);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = SourceClient::new("https://github.com/macCesar/titools/", "main", 5).unwrap();
        assert_eq!(
            client.archive_url(),
            "https://github.com/macCesar/titools/archive/refs/heads/main.zip"
        );
        assert_eq!(
            client.manifest_url(),
            "https://raw.githubusercontent.com/macCesar/titools/main/package.json"
        );
    }

    #[test]
    fn test_git_suffix_is_dropped() {
        let client = SourceClient::new("https://github.com/acme/tools.git", "dev", 5).unwrap();
        assert_eq!(
            client.manifest_url(),
            "https://raw.githubusercontent.com/acme/tools/dev/package.json"
        );
    }

    #[test]
    fn test_parse_manifest_version() {
        let body = r#"{"name": "@maccesar/titools", "version": "2.3.1", "bin": {}}"#;
        assert_eq!(parse_manifest_version(body).unwrap(), "2.3.1");
        assert!(parse_manifest_version(r#"{"name": "x"}"#).is_err());
        assert!(parse_manifest_version("<html>").is_err());
    }

    #[test]
    fn test_invalid_repo_url() {
        assert!(SourceClient::new("not a url", "main", 5).is_err());
        assert!(SourceClient::new("https://github.com/only-owner", "main", 5).is_err());
    }

    #[test]
    fn test_from_config_defaults() {
        let client = SourceClient::from_config(&SourceConfig::default()).unwrap();
        assert!(client.archive_url().ends_with("/titools/archive/refs/heads/main.zip"));
    }
}
