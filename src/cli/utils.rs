//! CLI utility functions
//!
//! Status lines, prompting helpers and bundle lookup shared by commands.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::core::bundle::BundleSource;
use crate::remote::{download_bundle, DownloadedBundle};

/// Print a command header
pub fn header(title: &str) {
    println!();
    println!("{}", title.blue().bold());
    println!();
}

pub fn succeed(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn fail(msg: &str) {
    println!("{} {}", "✗".red(), msg);
}

pub fn warn(msg: &str) {
    println!("{} {}", "!".yellow(), msg);
}

pub fn info(msg: &str) {
    println!("{} {}", "i".cyan(), msg);
}

/// Join items for display: `a, b, c`
pub fn format_list(items: &[String]) -> String {
    items.join(", ")
}

/// Whether interactive prompts can be shown
pub fn can_prompt() -> bool {
    console::user_attended()
}

/// Where the bundle being installed comes from
pub enum Bundle {
    Local(BundleSource),
    Downloaded(DownloadedBundle),
}

impl Bundle {
    pub fn source(&self) -> &BundleSource {
        match self {
            Bundle::Local(bundle) => bundle,
            Bundle::Downloaded(downloaded) => &downloaded.bundle,
        }
    }
}

/// Use a local checkout when given, otherwise download from GitHub
pub fn resolve_bundle(local: Option<PathBuf>, config: &Config) -> Result<Bundle> {
    if let Some(dir) = local {
        let bundle = BundleSource::open(dir)?;
        succeed(&format!("Using local repository ({})", bundle.root().display()));
        return Ok(Bundle::Local(bundle));
    }

    eprintln!("Downloading from GitHub...");
    match download_bundle(&config.source) {
        Ok(downloaded) => {
            succeed("Downloaded from GitHub");
            Ok(Bundle::Downloaded(downloaded))
        }
        Err(e) => {
            fail("Failed to download");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_list() {
        assert_eq!(format_list(&[]), "");
        assert_eq!(format_list(&["one".to_string()]), "one");
        assert_eq!(
            format_list(&["one".to_string(), "two".to_string(), "three".to_string()]),
            "one, two, three"
        );
    }
}
