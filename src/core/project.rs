//! Titanium project detection

use std::fs;
use std::path::Path;

use super::policy::{AiFiles, TargetFile};

/// Project descriptor every Titanium project has at its root
pub const TIAPP_FILE: &str = "tiapp.xml";

/// Check if a directory is a Titanium project
pub fn is_titanium_project(dir: &Path) -> bool {
    dir.join(TIAPP_FILE).is_file()
}

/// SDK version declared in tiapp.xml (`<sdk-version>`)
///
/// Returns `None` when tiapp.xml is missing, unreadable, or declares no
/// version.
pub fn detect_sdk_version(dir: &Path) -> Option<String> {
    let content = fs::read_to_string(dir.join(TIAPP_FILE)).ok()?;
    parse_sdk_version(&content)
}

fn parse_sdk_version(tiapp: &str) -> Option<String> {
    const OPEN: &str = "<sdk-version>";
    const CLOSE: &str = "</sdk-version>";

    let start = tiapp.find(OPEN)? + OPEN.len();
    let len = tiapp[start..].find(CLOSE)?;
    let version = tiapp[start..start + len].trim();

    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Which AI instruction files exist in a directory
pub fn detect_ai_files(dir: &Path) -> AiFiles {
    let exists = |file: TargetFile| dir.join(file.file_name()).exists();

    AiFiles {
        claude: exists(TargetFile::Claude),
        gemini: exists(TargetFile::Gemini),
        agents: exists(TargetFile::Agents),
    }
}
