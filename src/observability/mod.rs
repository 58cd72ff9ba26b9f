//! Tracing subscriber setup.
//!
//! The library itself only emits `tracing` spans and events; nothing is
//! recorded until the host installs a subscriber. Hosts that already run
//! their own subscriber skip this module entirely.
//!
//! # Configuration
//!
//! The level filter is resolved from:
//! 1. `RUST_LOG`-style directives in [`Config::trace_level`](crate::Config::trace_level)
//! 2. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use headless_ui::observability::init_tracing;
//! use headless_ui::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("menu host started");
//! ```

mod init;

pub use init::init_tracing;
