//! Zip extraction with zip-slip and zip-bomb protections

use std::fs::{self, File};
use std::io::{self, Cursor, Read};
use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

/// Maximum uncompressed size for any single entry (100 MB)
pub const MAX_ENTRY_SIZE: u64 = 100 * 1024 * 1024;
/// Maximum total extracted size (500 MB)
pub const MAX_TOTAL_SIZE: u64 = 500 * 1024 * 1024;
/// Maximum compression ratio before an entry is considered a zip bomb
pub const MAX_COMPRESSION_RATIO: f64 = 100.0;

/// Reader that fails once more than `remaining` bytes were read
///
/// Catches entries that lie about their size in the headers.
struct LimitedReader<R> {
    inner: R,
    remaining: u64,
}

impl<R: Read> Read for LimitedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 {
            // Probe for one more byte to tell "exactly at limit" from "over"
            let mut probe = [0u8; 1];
            return match self.inner.read(&mut probe)? {
                0 => Ok(0),
                _ => Err(io::Error::other(
                    "zip entry exceeds maximum allowed size - possible zip bomb",
                )),
            };
        }

        let max = buf.len().min(self.remaining as usize);
        let read = self.inner.read(&mut buf[..max])?;
        self.remaining -= read as u64;
        Ok(read)
    }
}

/// Check an entry's declared sizes
fn validate_entry(name: &str, size: u64, compressed: u64) -> Result<()> {
    if size > MAX_ENTRY_SIZE {
        bail!(
            "Zip entry '{}' too large: {} bytes (max: {} bytes)",
            name,
            size,
            MAX_ENTRY_SIZE
        );
    }

    if compressed > 0 {
        let ratio = size as f64 / compressed as f64;
        if ratio > MAX_COMPRESSION_RATIO {
            bail!(
                "Suspicious compression ratio in '{}': {:.1}x - possible zip bomb",
                name,
                ratio
            );
        }
    }

    Ok(())
}

/// Resolve an entry name under `dest_dir`, rejecting anything that escapes it
pub fn safe_entry_path(dest_dir: &Path, entry_name: &str) -> Result<PathBuf> {
    if entry_name.starts_with('/') || entry_name.starts_with('\\') {
        bail!("Zip slip detected: absolute path in archive - '{}'", entry_name);
    }

    let mut out = dest_dir.to_path_buf();
    for component in Path::new(entry_name).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                bail!("Zip slip detected: '{}' escapes the destination", entry_name)
            }
        }
    }

    Ok(out)
}

/// Extract a zip archive held in memory into `dest_dir`
///
/// Every entry is validated before anything is written. Returns the
/// archive's single top-level directory (GitHub archives wrap everything in
/// `<repo>-<branch>/`), or `dest_dir` itself when there is no such wrapper.
pub fn extract_archive(bytes: &[u8], dest_dir: &Path) -> Result<PathBuf> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).context("Failed to read zip archive")?;

    let mut total: u64 = 0;
    for i in 0..archive.len() {
        let entry = archive.by_index(i).context("Failed to read zip entry")?;
        validate_entry(entry.name(), entry.size(), entry.compressed_size())?;
        safe_entry_path(dest_dir, entry.name())?;

        total = total
            .checked_add(entry.size())
            .filter(|t| *t <= MAX_TOTAL_SIZE)
            .ok_or_else(|| anyhow::anyhow!("Archive uncompressed size too large - possible zip bomb"))?;
    }

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        let out = safe_entry_path(dest_dir, &name)?;

        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }

        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&out)
            .with_context(|| format!("Failed to create file: {}", out.display()))?;
        let mut limited = LimitedReader {
            inner: &mut entry,
            remaining: MAX_ENTRY_SIZE,
        };
        io::copy(&mut limited, &mut file)
            .with_context(|| format!("Failed to extract file: {}", name))?;

        apply_mode(&out, entry.unix_mode());
    }

    debug!(entries = archive.len(), bytes = total, "archive extracted");
    Ok(top_level_dir(dest_dir)?.unwrap_or_else(|| dest_dir.to_path_buf()))
}

#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        fs::set_permissions(path, fs::Permissions::from_mode(mode & 0o777)).ok();
    }
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) {}

fn top_level_dir(dir: &Path) -> Result<Option<PathBuf>> {
    let entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .collect();

    match entries.as_slice() {
        [only] if only.is_dir() => Ok(Some(only.clone())),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn build_zip(files: &[(&str, &str)]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            for (name, content) in files {
                zip.start_file(*name, SimpleFileOptions::default()).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_safe_entry_path() {
        let dest = Path::new("/tmp/out");
        assert_eq!(
            safe_entry_path(dest, "titools-main/skills/ti-ui/SKILL.md").unwrap(),
            PathBuf::from("/tmp/out/titools-main/skills/ti-ui/SKILL.md")
        );
        assert!(safe_entry_path(dest, "../evil").is_err());
        assert!(safe_entry_path(dest, "a/../../evil").is_err());
        assert!(safe_entry_path(dest, "/etc/passwd").is_err());
    }

    #[test]
    fn test_validate_entry() {
        assert!(validate_entry("ok", 1000, 500).is_ok());
        assert!(validate_entry("empty", 0, 0).is_ok());
        assert!(validate_entry("big", MAX_ENTRY_SIZE + 1, MAX_ENTRY_SIZE).is_err());
        assert!(validate_entry("bomb", 1_000_000, 10).is_err());
    }

    #[test]
    fn test_extract_returns_top_level_dir() {
        let bytes = build_zip(&[
            ("titools-main/AGENTS-TEMPLATE.md", "template"),
            ("titools-main/skills/ti-ui/SKILL.md", "skill"),
        ]);
        let dir = tempdir().unwrap();

        let root = extract_archive(&bytes, dir.path()).unwrap();
        assert_eq!(root, dir.path().join("titools-main"));
        assert_eq!(
            fs::read_to_string(root.join("skills/ti-ui/SKILL.md")).unwrap(),
            "skill"
        );
    }

    #[test]
    fn test_extract_flat_archive() {
        let bytes = build_zip(&[("a.md", "a"), ("b.md", "b")]);
        let dir = tempdir().unwrap();

        let root = extract_archive(&bytes, dir.path()).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let dir = tempdir().unwrap();
        assert!(extract_archive(b"not a zip", dir.path()).is_err());
    }
}
