//! Bundle installation - skills, agents and the AGENTS-TEMPLATE.md
//!
//! A bundle source is a checkout (or extracted archive) of the titools
//! repository:
//!
//! ```text
//! skills/<skill>/...
//! agents/<agent>.md
//! scripts/ti-docs-index
//! AGENTS-TEMPLATE.md
//! ```
//!
//! Every install replaces what is already at the destination.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::link::remove_path;
use crate::config::{AGENTS_TEMPLATE_FILE, DOCS_INDEX_SCRIPT};

/// Per-item outcome of a batch operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemResults {
    pub done: Vec<String>,
    pub failed: Vec<String>,
}

impl ItemResults {
    /// True when nothing failed
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn record(&mut self, name: &str, ok: bool) {
        if ok {
            self.done.push(name.to_string());
        } else {
            self.failed.push(name.to_string());
        }
    }
}

/// A directory holding the titools bundle
#[derive(Debug, Clone)]
pub struct BundleSource {
    root: PathBuf,
}

impl BundleSource {
    /// Open a bundle source; it must contain a `skills/` directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !Self::is_bundle(&root) {
            anyhow::bail!(
                "{} is not a titools checkout (no skills/ directory)",
                root.display()
            );
        }
        Ok(Self { root })
    }

    pub fn is_bundle(dir: &Path) -> bool {
        dir.join("skills").is_dir()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn skill_dir(&self, skill: &str) -> PathBuf {
        self.root.join("skills").join(skill)
    }

    pub fn agent_file(&self, agent: &str) -> PathBuf {
        self.root.join("agents").join(format!("{}.md", agent))
    }

    pub fn template_file(&self) -> PathBuf {
        self.root.join(AGENTS_TEMPLATE_FILE)
    }

    pub fn script_file(&self) -> PathBuf {
        self.root.join("scripts").join(DOCS_INDEX_SCRIPT)
    }

    /// Copy skills into `dest_dir/<skill>`
    ///
    /// A skill missing from the source, or failing to copy, is recorded as
    /// failed and the rest continue.
    pub fn install_skills(&self, dest_dir: &Path, skills: &[&str]) -> Result<ItemResults> {
        fs::create_dir_all(dest_dir)
            .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

        let mut results = ItemResults::default();
        for skill in skills {
            let src = self.skill_dir(skill);
            let ok = src.is_dir() && replace_dir(&src, &dest_dir.join(skill), skill);
            results.record(skill, ok);
        }

        Ok(results)
    }

    /// Copy agent prompt files into `dest_dir/<agent>.md`
    pub fn install_agents(&self, dest_dir: &Path, agents: &[&str]) -> Result<ItemResults> {
        fs::create_dir_all(dest_dir)
            .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

        let mut results = ItemResults::default();
        for agent in agents {
            let src = self.agent_file(agent);
            let dest = dest_dir.join(format!("{}.md", agent));

            let ok = src.is_file()
                && match fs::copy(&src, &dest) {
                    Ok(_) => true,
                    Err(e) => {
                        warn!(agent, error = %e, "failed to install agent");
                        false
                    }
                };
            results.record(agent, ok);
        }

        Ok(results)
    }

    /// Copy AGENTS-TEMPLATE.md into `agents_dir`
    ///
    /// Returns `false` when the source has no template.
    pub fn install_template(&self, agents_dir: &Path) -> Result<bool> {
        let src = self.template_file();
        if !src.is_file() {
            return Ok(false);
        }

        fs::create_dir_all(agents_dir)
            .with_context(|| format!("Failed to create {}", agents_dir.display()))?;
        fs::copy(&src, agents_dir.join(AGENTS_TEMPLATE_FILE))
            .context("Failed to install AGENTS-TEMPLATE.md")?;

        Ok(true)
    }

    /// Copy the `ti-docs-index` helper script into `bin_dir` and make it executable
    ///
    /// Returns `false` when the script is not shipped or `bin_dir` is not
    /// writable; any other failure is an error.
    pub fn install_helper_script(&self, bin_dir: &Path) -> Result<bool> {
        let src = self.script_file();
        if !src.is_file() {
            return Ok(false);
        }

        if fs::create_dir_all(bin_dir).is_err() {
            debug!(dir = %bin_dir.display(), "cannot create bin directory, skipping script");
            return Ok(false);
        }

        let dest = bin_dir.join(DOCS_INDEX_SCRIPT);
        match fs::copy(&src, &dest) {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                debug!(dir = %bin_dir.display(), "bin directory not writable, skipping script");
                return Ok(false);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to install {}", dest.display()))
            }
        }

        make_executable(&dest);
        Ok(true)
    }
}

fn replace_dir(src: &Path, dest: &Path, name: &str) -> bool {
    let result = remove_path(dest)
        .map_err(anyhow::Error::from)
        .and_then(|_| copy_dir(src, dest));

    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(item = name, error = %e, "failed to copy");
            false
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o755)) {
        debug!(file = %path.display(), error = %e, "chmod failed");
    }
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}

/// Recursively copy a directory, overwriting existing files
pub fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry.path().strip_prefix(src)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }
    }

    Ok(())
}

/// Remove `dir/<name><suffix>` for each name that exists
///
/// Names that are not present are neither removed nor failed.
pub fn remove_items(dir: &Path, names: &[&str], suffix: &str) -> ItemResults {
    let mut results = ItemResults::default();
    if !dir.exists() {
        return results;
    }

    for name in names {
        let path = dir.join(format!("{}{}", name, suffix));
        if fs::symlink_metadata(&path).is_err() {
            continue;
        }

        match remove_path(&path) {
            Ok(()) => results.record(name, true),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to remove");
                results.record(name, false);
            }
        }
    }

    results
}
