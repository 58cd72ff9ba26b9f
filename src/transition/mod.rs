//! CSS-class transitions for showing and hiding elements.
//!
//! A [`Transition`] root follows an explicit show signal; any number of
//! [`TransitionChild`] nodes nested under it (or under each other) follow
//! the root. Enter and leave phases add and remove the configured
//! [`TransitionClasses`] on the node's element through the
//! [`Dom`](crate::dom::Dom), timed by the host's
//! [`Scheduler`](crate::runtime::Scheduler) and the element's computed CSS
//! transition time.

pub mod classes;
mod node;
pub mod timing;

pub use classes::{Direction, PhaseClasses, TransitionClasses};
pub use node::{
    ElementRef, Transition, TransitionChild, TransitionHooks, TransitionNode, TransitionProps,
    TransitionStatus,
};
