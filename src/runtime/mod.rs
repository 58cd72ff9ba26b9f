//! Cooperative, single-threaded deferred work.
//!
//! # Modules
//!
//! - [`scheduler`]: The host frame/timer seam and a virtual-clock implementation
//! - [`disposables`]: Per-component cancellation scope

pub mod disposables;
pub mod scheduler;

pub use disposables::Disposables;
pub use scheduler::{ManualScheduler, Scheduler, Task, TaskId};
