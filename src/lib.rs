//! titools - Titanium SDK skills installer for AI coding assistants
//!
//! Installs skill bundles and agent prompts into Claude Code, Gemini CLI
//! and Codex CLI, and keeps a knowledge index block in a project's
//! AGENTS.md / CLAUDE.md / GEMINI.md.
//!
//! ## Key Concepts
//!
//! - **Knowledge block**: a marker-delimited region titools owns inside a
//!   user's markdown file; everything outside it is left alone
//! - **Sync**: strip the previous block, append a fresh one, write once
//! - **Priority**: CLAUDE.md > GEMINI.md > AGENTS.md

pub mod cli;
pub mod config;
pub mod core;
pub mod remote;

pub use config::{Config, Layout};
pub use core::policy::{files_to_sync, AiFiles, TargetFile};
pub use core::sync::{sync, sync_files, SyncStatus};
pub use core::version::{compare_versions, VersionToken};
pub use core::{SyncError, SyncResult};
