//! Command handler layer.
//!
//! ## Files
//! - `sync.rs` — the download run: cursor, listing, per-file work, summary.
//!
//! ## Principles
//! - Orchestration and output wiring live here.
//! - Delegate remote calls, naming and disk writes to `services/*`.

pub mod sync;

pub use sync::handle_sync;
