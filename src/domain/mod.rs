//! Domain layer: errors, ids and tag resolution.
//!
//! These pieces are shared by the menu and transition layers and depend on
//! nothing host-specific.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`id`]: Application-wide unique element ids
//! - [`tag`]: Fallible resolution of string tags into closed enums

pub mod error;
pub mod id;
pub mod tag;

pub use error::{HeadlessError, Result};
pub use id::generate_id;
pub use tag::match_tag;
