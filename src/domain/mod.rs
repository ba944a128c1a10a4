//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep the listing DTOs, run configuration and summary in one place.
//! - Make changes to the `--json` summary schema explicit and reviewable.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.

pub mod models;
