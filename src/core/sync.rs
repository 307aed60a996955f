//! Knowledge block sync
//!
//! One sync is a read-strip-rebuild-write of a single target file:
//!
//! 1. Read the template (`TemplateNotFound` when missing)
//! 2. Read the target (missing target = empty content)
//! 3. Build a fresh block for the current version tag
//! 4. Strip the previous block, if any
//! 5. Append the new block after exactly one blank line
//! 6. Write the target once
//!
//! Every failure happens before step 6, so a failed sync never touches
//! the target.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::block::{self, BLOCK_END, BLOCK_START_PREFIX};
use super::error::{SyncError, SyncResult};
use super::policy::TargetFile;

/// Outcome of a successful sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No block was present, one was added
    Created,
    /// An existing block was replaced
    Updated,
}

impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncStatus::Created => write!(f, "created"),
            SyncStatus::Updated => write!(f, "updated"),
        }
    }
}

/// Sync the knowledge block of `template` into `target`
pub fn sync(target: &Path, template: &Path, version_tag: &str) -> SyncResult<SyncStatus> {
    let template_content = read_template(template)?;

    let current = match fs::read_to_string(target) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(SyncError::io(target, e)),
    };

    let fresh = block::build(&template_content, version_tag)?;

    let remaining = if block::has_block(&current, BLOCK_START_PREFIX) {
        block::strip(&current, BLOCK_START_PREFIX, BLOCK_END)
    } else {
        current.clone()
    };
    // Marker text in free text leaves the content as is
    let had_block = remaining.len() != current.len();

    let content = splice(&remaining, &fresh);
    fs::write(target, content).map_err(|e| SyncError::io(target, e))?;

    debug!(
        file = %target.display(),
        version = version_tag,
        replaced = had_block,
        "knowledge block written"
    );

    Ok(if had_block {
        SyncStatus::Updated
    } else {
        SyncStatus::Created
    })
}

fn read_template(path: &Path) -> SyncResult<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(SyncError::TemplateNotFound(path.to_path_buf()))
        }
        Err(e) => Err(SyncError::io(path, e)),
    }
}

/// Append a block to content with one blank line in between
///
/// Trailing whitespace of `content` and the block's own padding are
/// normalized, so the result is the same however many blank lines were
/// there before. An empty remainder yields just the block.
pub fn splice(content: &str, block: &str) -> String {
    let head = content.trim_end();
    let block = block.trim_matches(['\r', '\n']);

    if head.is_empty() {
        format!("{}\n", block)
    } else {
        format!("{}\n\n{}\n", head, block)
    }
}

/// Result of syncing one file of a batch
#[derive(Debug)]
pub struct FileReport {
    pub file: TargetFile,
    pub path: PathBuf,
    /// The file did not exist and was created empty before syncing
    pub created_file: bool,
    pub result: SyncResult<SyncStatus>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Sync every planned file of a project directory
///
/// Missing files are created empty first. A failure on one file is
/// recorded in its report and the remaining files are still processed.
pub fn sync_files(
    project_dir: &Path,
    files: &[TargetFile],
    template: &Path,
    version_tag: &str,
) -> Vec<FileReport> {
    files
        .iter()
        .map(|&file| {
            let path = project_dir.join(file.file_name());
            let created_file = !path.exists();

            let result = ensure_file(&path, created_file)
                .and_then(|_| sync(&path, template, version_tag));

            FileReport {
                file,
                path,
                created_file,
                result,
            }
        })
        .collect()
}

fn ensure_file(path: &Path, missing: bool) -> SyncResult<()> {
    if missing {
        fs::write(path, "").map_err(|e| SyncError::io(path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TEMPLATE: &str = "\
# Titanium AGENTS.md

## Compressed Documentation Index

[Titanium Docs]|root: ~/.agents/skills
|ti-ui:{layouts.md,listviews.md}
-
";

    fn write_template(dir: &Path) -> PathBuf {
        let path = dir.join("AGENTS-TEMPLATE.md");
        fs::write(&path, TEMPLATE).unwrap();
        path
    }

    #[test]
    fn test_sync_new_file() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path());
        let target = dir.path().join("CLAUDE.md");

        let status = sync(&target, &template, "v1.0.0").unwrap();
        assert_eq!(status, SyncStatus::Created);

        let content = fs::read_to_string(&target).unwrap();
        assert!(content.starts_with("<!-- TITANIUM-KNOWLEDGE-v1.0.0 -->\n"));
        assert!(content.ends_with("<!-- END-TITANIUM-KNOWLEDGE -->\n"));
    }

    #[test]
    fn test_sync_is_idempotent() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path());
        let target = dir.path().join("AGENTS.md");
        fs::write(&target, "# My project\n\nUse tabs.\n").unwrap();

        sync(&target, &template, "v1.0.0").unwrap();
        let first = fs::read_to_string(&target).unwrap();

        let status = sync(&target, &template, "v1.0.0").unwrap();
        let second = fs::read_to_string(&target).unwrap();

        assert_eq!(status, SyncStatus::Updated);
        assert_eq!(first, second);
        assert_eq!(second.matches(BLOCK_START_PREFIX).count(), 1);
        assert_eq!(second.matches(BLOCK_END).count(), 1);
    }

    #[test]
    fn test_sync_preserves_user_content() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path());
        let target = dir.path().join("CLAUDE.md");
        let user = "# Rules\n\n- keep it simple\n- `code` & <xml>\n";
        fs::write(&target, user).unwrap();

        sync(&target, &template, "v1.0.0").unwrap();
        let content = fs::read_to_string(&target).unwrap();

        assert!(content.starts_with("# Rules\n\n- keep it simple\n- `code` & <xml>\n\n<!-- TITANIUM-KNOWLEDGE-v1.0.0 -->"));
    }

    #[test]
    fn test_sync_keeps_marker_mentions() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path());
        let target = dir.path().join("CLAUDE.md");
        let user = "# Rules\nDo not edit `<!-- TITANIUM-KNOWLEDGE-` blocks.\n\n## Style\nUse tabs.\n## Testing\nRun npm test.\n";
        fs::write(&target, user).unwrap();

        let status = sync(&target, &template, "v1.0.0").unwrap();
        assert_eq!(status, SyncStatus::Created);
        let first = fs::read_to_string(&target).unwrap();
        assert!(first.starts_with(user));
        assert!(first.contains("<!-- TITANIUM-KNOWLEDGE-v1.0.0 -->"));

        let status = sync(&target, &template, "v1.0.0").unwrap();
        assert_eq!(status, SyncStatus::Updated);
        let second = fs::read_to_string(&target).unwrap();
        assert_eq!(first, second);
        for line in user.lines() {
            assert!(second.contains(line), "lost line: {}", line);
        }
    }

    #[test]
    fn test_sync_upgrades_version() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path());
        let target = dir.path().join("GEMINI.md");
        fs::write(
            &target,
            "intro\n\n<!-- TITANIUM-KNOWLEDGE-v1.0.0 -->\nold index\n<!-- END-TITANIUM-KNOWLEDGE -->\n",
        )
        .unwrap();

        let status = sync(&target, &template, "v1.1.0").unwrap();
        let content = fs::read_to_string(&target).unwrap();

        assert_eq!(status, SyncStatus::Updated);
        assert_eq!(content.matches("<!-- TITANIUM-KNOWLEDGE-v1.1.0 -->").count(), 1);
        assert!(!content.contains("v1.0.0"));
        assert!(!content.contains("old index"));
        assert!(content.starts_with("intro\n\n<!-- TITANIUM-KNOWLEDGE-v1.1.0 -->"));
    }

    #[test]
    fn test_sync_moves_middle_block_to_end() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path());
        let target = dir.path().join("CLAUDE.md");
        fs::write(
            &target,
            "top\n\n<!-- TITANIUM-KNOWLEDGE-v1.0.0 -->\nx\n<!-- END-TITANIUM-KNOWLEDGE -->\n\nbottom\n",
        )
        .unwrap();

        sync(&target, &template, "v1.0.0").unwrap();
        let content = fs::read_to_string(&target).unwrap();

        assert!(content.starts_with("top\n\nbottom\n\n<!-- TITANIUM-KNOWLEDGE-v1.0.0 -->"));
        assert_eq!(content.matches(BLOCK_START_PREFIX).count(), 1);
    }

    #[test]
    fn test_malformed_template_writes_nothing() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("AGENTS-TEMPLATE.md");
        fs::write(&template, "# No index here\n").unwrap();
        let target = dir.path().join("CLAUDE.md");
        fs::write(&target, "original\n").unwrap();

        let err = sync(&target, &template, "v1.0.0").unwrap_err();
        assert!(matches!(err, SyncError::TemplateFormat(_)));
        assert_eq!(fs::read_to_string(&target).unwrap(), "original\n");
    }

    #[test]
    fn test_missing_template_writes_nothing() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("CLAUDE.md");

        let err = sync(&target, &dir.path().join("nope.md"), "v1.0.0").unwrap_err();
        assert!(matches!(err, SyncError::TemplateNotFound(_)));
        assert!(!target.exists());
    }

    #[test]
    fn test_splice() {
        assert_eq!(splice("", "\n\nBLOCK\n"), "BLOCK\n");
        assert_eq!(splice("  \n\n", "\n\nBLOCK\n"), "BLOCK\n");
        assert_eq!(splice("text\n\n\n\n", "\n\nBLOCK\n"), "text\n\nBLOCK\n");
        assert_eq!(splice("text", "BLOCK"), "text\n\nBLOCK\n");
    }

    #[test]
    fn test_sync_files_continues_after_failure() {
        let dir = tempdir().unwrap();
        let template = write_template(dir.path());
        fs::write(dir.path().join("CLAUDE.md"), "claude notes\n").unwrap();
        // A directory where a file is expected makes that one target fail
        fs::create_dir(dir.path().join("GEMINI.md")).unwrap();

        let reports = sync_files(
            dir.path(),
            &[TargetFile::Claude, TargetFile::Gemini, TargetFile::Agents],
            &template,
            "v1.0.0",
        );

        assert_eq!(reports.len(), 3);
        assert!(matches!(reports[0].result, Ok(SyncStatus::Created)));
        assert!(!reports[0].created_file);
        assert!(matches!(reports[1].result, Err(SyncError::Io { .. })));
        assert!(reports[2].is_ok());
        assert!(reports[2].created_file);

        let agents = fs::read_to_string(dir.path().join("AGENTS.md")).unwrap();
        assert!(agents.contains("<!-- TITANIUM-KNOWLEDGE-v1.0.0 -->"));
    }
}
