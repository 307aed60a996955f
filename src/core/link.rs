//! Skill links - platform skill directories point at the central copy
//!
//! Each platform gets `<platform>/skills/<skill>` as a directory symlink
//! to `~/.agents/skills/<skill>`. Where symlinks are not available
//! (Windows without developer mode, cross-device links) the skill is
//! copied instead.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use super::bundle::{copy_dir, ItemResults};

/// How a skill ended up in a platform directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMethod {
    Symlink,
    Copy,
}

/// Remove a file, directory, or symlink; missing paths are fine
///
/// Symlinks are removed themselves, never the directory they point to.
pub fn remove_path(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    if meta.file_type().is_symlink() {
        // Windows directory symlinks need remove_dir
        fs::remove_file(path).or_else(|_| fs::remove_dir(path))
    } else if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

/// Point `link` at the `target` directory, copying when symlinks fail
///
/// Whatever exists at `link` is replaced.
pub fn link_or_copy(target: &Path, link: &Path) -> Result<LinkMethod> {
    if !target.is_dir() {
        bail!("Link target does not exist: {}", target.display());
    }

    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    remove_path(link).with_context(|| format!("Failed to remove {}", link.display()))?;

    match symlink_dir(target, link) {
        Ok(()) => Ok(LinkMethod::Symlink),
        Err(e) => {
            debug!(link = %link.display(), error = %e, "symlink failed, copying instead");
            copy_dir(target, link)?;
            Ok(LinkMethod::Copy)
        }
    }
}

/// Link every skill of `central_dir` into `platform_dir`
pub fn link_skills(platform_dir: &Path, central_dir: &Path, skills: &[&str]) -> ItemResults {
    let mut results = ItemResults::default();

    for skill in skills {
        let target = central_dir.join(skill);
        let link = platform_dir.join(skill);

        let ok = match link_or_copy(&target, &link) {
            Ok(method) => {
                debug!(skill, ?method, "skill linked");
                true
            }
            Err(e) => {
                warn!(skill, error = %e, "failed to link skill");
                false
            }
        };
        results.record(skill, ok);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_remove_path_variants() {
        let dir = tempdir().unwrap();

        let file = dir.path().join("file.md");
        fs::write(&file, "x").unwrap();
        remove_path(&file).unwrap();
        assert!(!file.exists());

        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        remove_path(&dir.path().join("a")).unwrap();
        assert!(!dir.path().join("a").exists());

        remove_path(&dir.path().join("missing")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_link_replaces_existing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("central/ti-ui");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("SKILL.md"), "skill").unwrap();

        let link = dir.path().join("platform/skills/ti-ui");
        fs::create_dir_all(&link).unwrap();
        fs::write(link.join("old.md"), "old").unwrap();

        let method = link_or_copy(&target, &link).unwrap();
        assert_eq!(method, LinkMethod::Symlink);
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(link.join("SKILL.md")).unwrap(), "skill");

        // Removing the link keeps the central copy
        remove_path(&link).unwrap();
        assert!(target.join("SKILL.md").is_file());
    }

    #[test]
    fn test_link_missing_target() {
        let dir = tempdir().unwrap();
        let err = link_or_copy(&dir.path().join("nope"), &dir.path().join("link"));
        assert!(err.is_err());
        assert!(!dir.path().join("link").exists());
    }

    #[test]
    fn test_link_skills() {
        let dir = tempdir().unwrap();
        let central = dir.path().join("central");
        fs::create_dir_all(central.join("ti-ui")).unwrap();
        fs::create_dir_all(central.join("purgetss")).unwrap();

        let platform = dir.path().join(".claude/skills");
        let results = link_skills(&platform, &central, &["ti-ui", "purgetss", "alloy-expert"]);

        assert_eq!(results.done, vec!["ti-ui", "purgetss"]);
        assert_eq!(results.failed, vec!["alloy-expert"]);
        assert!(platform.join("ti-ui").exists());
    }
}
