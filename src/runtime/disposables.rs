//! Scoped cancellation of deferred work.
//!
//! A [`Disposables`] handle is created per component instance. Every frame
//! callback, timer and cleanup the component defers goes through it, and
//! [`dispose`](Disposables::dispose) (also run on drop) cancels whatever is
//! still pending. Unmounting a component is therefore the one cancellation
//! trigger: no stale callback can dispatch into a destroyed state machine.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use super::scheduler::{Scheduler, TaskId};

type Cleanup = Box<dyn FnOnce()>;

/// Per-component registry of pending deferred work.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use headless_ui::runtime::{Disposables, ManualScheduler};
///
/// let scheduler = Rc::new(ManualScheduler::new());
/// let ran = Rc::new(Cell::new(false));
/// let d = Disposables::new(scheduler.clone());
/// let flag = Rc::clone(&ran);
/// d.next_frame(move || flag.set(true));
/// d.dispose();
///
/// scheduler.run_frame();
/// assert!(!ran.get());
/// ```
pub struct Disposables {
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<RefCell<Vec<TaskId>>>,
    cleanups: RefCell<Vec<Cleanup>>,
}

impl Disposables {
    /// Creates an empty handle bound to `scheduler`.
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            pending: Rc::new(RefCell::new(Vec::new())),
            cleanups: RefCell::new(Vec::new()),
        }
    }

    /// The scheduler this handle defers work to.
    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.scheduler)
    }

    /// Runs `f` after the next paint frame unless disposed first.
    pub fn next_frame(&self, f: impl FnOnce() + 'static) -> TaskId {
        self.track(|scheduler, task| scheduler.request_frame(task), f)
    }

    /// Runs `f` after `delay` unless disposed first.
    pub fn set_timeout(&self, delay: Duration, f: impl FnOnce() + 'static) -> TaskId {
        self.track(move |scheduler, task| scheduler.set_timeout(delay, task), f)
    }

    /// Registers a cleanup to run on the next [`dispose`](Self::dispose).
    pub fn add(&self, cleanup: impl FnOnce() + 'static) {
        self.cleanups.borrow_mut().push(Box::new(cleanup));
    }

    /// Number of scheduled tasks that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Cancels every pending task, then runs registered cleanups in order.
    ///
    /// The handle stays usable afterwards.
    pub fn dispose(&self) {
        let tasks = std::mem::take(&mut *self.pending.borrow_mut());
        for id in tasks {
            self.scheduler.cancel(id);
        }
        let cleanups = std::mem::take(&mut *self.cleanups.borrow_mut());
        for cleanup in cleanups {
            cleanup();
        }
    }

    fn track(
        &self,
        schedule: impl FnOnce(&dyn Scheduler, Box<dyn FnOnce()>) -> TaskId,
        f: impl FnOnce() + 'static,
    ) -> TaskId {
        let slot = Rc::new(Cell::new(None::<TaskId>));
        let own = Rc::clone(&slot);
        let pending = Rc::clone(&self.pending);
        let id = schedule(
            self.scheduler.as_ref(),
            Box::new(move || {
                if let Some(id) = own.get() {
                    pending.borrow_mut().retain(|t| *t != id);
                }
                f();
            }),
        );
        slot.set(Some(id));
        self.pending.borrow_mut().push(id);
        id
    }
}

impl Drop for Disposables {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Disposables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposables")
            .field("pending", &self.pending.borrow().len())
            .field("cleanups", &self.cleanups.borrow().len())
            .finish_non_exhaustive()
    }
}
