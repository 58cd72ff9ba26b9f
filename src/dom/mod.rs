//! Host seam: document operations, input events and render output.
//!
//! # Modules
//!
//! - [`backend`]: The [`Dom`] trait hosts implement
//! - [`memory`]: [`MemoryDom`], an in-memory document
//! - [`event`]: Keyboard and pointer events
//! - [`element`]: Render output and prop handling

pub mod backend;
pub mod element;
pub mod event;
pub mod memory;

pub use backend::Dom;
pub use element::{render_as, Element, Props};
pub use event::{Key, KeyboardEvent, PointerEvent};
pub use memory::MemoryDom;
