//! Core module - Business logic
//!
//! Knowledge block sync (`version`, `block`, `policy`, `sync`) and the
//! install plumbing around it (`project`, `platform`, `bundle`, `link`).

pub mod block;
pub mod bundle;
pub mod error;
pub mod link;
pub mod platform;
pub mod policy;
pub mod project;
pub mod sync;
pub mod version;

pub use error::{SyncError, SyncResult};
