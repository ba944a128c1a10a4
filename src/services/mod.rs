//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `api.rs` — authenticated REST client for the account endpoints.
//! - `resolver.rs` — owner display-name lookup with fallback.
//! - `paths.rs` — filesystem-safe names and target directories.
//! - `writer.rs` — directory creation, collision renaming, streaming to disk.
//! - `cursor.rs` — the persisted 'from'/'today' dates.
//! - `output.rs` — JSON/text summary output.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.

pub mod api;
pub mod cursor;
pub mod output;
pub mod paths;
pub mod resolver;
pub mod writer;
