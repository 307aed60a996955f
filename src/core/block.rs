//! Knowledge block - the delimited region titools owns inside AGENTS.md,
//! CLAUDE.md and GEMINI.md
//!
//! ```text
//! <!-- TITANIUM-KNOWLEDGE-v1.0.0 -->
//! <!--
//! ...preamble...
//! -->
//!
//! ## Compressed Documentation Index
//! ...
//!
//! <!-- END-TITANIUM-KNOWLEDGE -->
//! ```
//!
//! Markers are matched as literal text. Detection uses the start marker
//! without its version tag, so blocks written by older releases are still
//! found and replaced.

use tracing::debug;

use super::error::{SyncError, SyncResult};

/// Start marker without the version tag (detection / strip literal)
pub const BLOCK_START_PREFIX: &str = "<!-- TITANIUM-KNOWLEDGE-";

/// Fixed end marker
pub const BLOCK_END: &str = "<!-- END-TITANIUM-KNOWLEDGE -->";

/// Heading text of the template section that becomes the block body
pub const INDEX_HEADING: &str = "Compressed Documentation Index";

const PREAMBLE: &str = "\
Titanium SDK Knowledge Index
Added by titools
Based on Vercel's research: https://vercel.com/blog/agents-md-outperforms-skills-in-our-agent-evals

IMPORTANT: Prefer retrieval-led reasoning over pre-training-led reasoning when working with Titanium SDK.
Always consult the documentation files below rather than relying on training data, which may be outdated.

This knowledge index is based on the latest Titanium SDK documentation.";

/// Full start marker for a version tag, e.g. `<!-- TITANIUM-KNOWLEDGE-v1.0.0 -->`
pub fn start_marker(version_tag: &str) -> String {
    format!("{}{} -->", BLOCK_START_PREFIX, version_tag)
}

/// Extract the documentation index section from a template
///
/// The section starts at the `Compressed Documentation Index` heading and
/// runs up to (not including) the first following line that is exactly `-`.
/// Markdown rules such as `---` inside the index are kept. Trailing
/// whitespace is trimmed.
///
/// # Errors
/// `SyncError::TemplateFormat` when the heading is missing, or when no `-`
/// line follows it.
pub fn extract_index(template: &str) -> SyncResult<&str> {
    let mut offset = 0;
    let mut start = None;

    for line in template.split_inclusive('\n') {
        match start {
            None if is_index_heading(line) => start = Some(offset),
            Some(begin) if is_rule(line) => return Ok(template[begin..offset].trim_end()),
            _ => {}
        }
        offset += line.len();
    }

    match start {
        Some(_) => Err(SyncError::TemplateFormat(format!(
            "the '{}' section has no closing '-' line",
            INDEX_HEADING
        ))),
        None => Err(SyncError::TemplateFormat(format!(
            "could not find the '{}' section",
            INDEX_HEADING
        ))),
    }
}

fn is_index_heading(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('#') && line.trim_start_matches('#').trim() == INDEX_HEADING
}

fn is_rule(line: &str) -> bool {
    line.trim_end() == "-"
}

/// Build a fresh knowledge block from a template
///
/// The result is padded with a blank line on both sides so it can be
/// spliced into any file.
///
/// # Errors
/// `SyncError::TemplateFormat` when the index section is missing, or when
/// it contains block markers itself (the block could never be stripped
/// cleanly again).
pub fn build(template: &str, version_tag: &str) -> SyncResult<String> {
    let index = extract_index(template)?;

    if index.contains(BLOCK_START_PREFIX) || index.contains(BLOCK_END) {
        return Err(SyncError::TemplateFormat(
            "documentation index contains knowledge block markers".to_string(),
        ));
    }

    Ok(format!(
        "\n\n{}\n<!--\n{}\n-->\n\n{}\n\n{}\n",
        start_marker(version_tag),
        PREAMBLE,
        index,
        BLOCK_END
    ))
}

/// Check whether content holds a block
pub fn has_block(content: &str, start_literal: &str) -> bool {
    !start_literal.is_empty() && content.contains(start_literal)
}

/// Remove the first block from content
///
/// A block is an end marker together with the closest start marker before
/// it. Start-marker text with no end marker after it (a mention in free
/// text) is never treated as a block, so content holding only such
/// mentions is returned unchanged. Removes the block plus the line breaks
/// directly after it; content before the start marker is untouched.
pub fn strip(content: &str, start_literal: &str, end_marker: &str) -> String {
    match find_block(content, start_literal, end_marker) {
        Some((start, end)) => {
            let rest = content[end..].trim_start_matches(['\r', '\n']);
            format!("{}{}", &content[..start], rest)
        }
        None => {
            if has_block(content, start_literal) {
                debug!("start marker without a closing end marker, content left as is");
            }
            content.to_string()
        }
    }
}

/// Byte range of the first complete block
fn find_block(content: &str, start_literal: &str, end_marker: &str) -> Option<(usize, usize)> {
    if start_literal.is_empty() || end_marker.is_empty() {
        return None;
    }

    let mut from = 0;
    for (end_at, _) in content.match_indices(end_marker) {
        if let Some(found) = content[from..end_at].rfind(start_literal) {
            return Some((from + found, end_at + end_marker.len()));
        }
        from = end_at + end_marker.len();
    }

    None
}
