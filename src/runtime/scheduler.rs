//! Deferred-work scheduling abstraction.
//!
//! This module defines the [`Scheduler`] trait, the only suspension mechanism
//! the library uses: paint-frame callbacks (for focus moves that must happen
//! after the host has rendered) and timers (typeahead clearing, CSS transition
//! waits). Hosts bind it to their event loop; [`ManualScheduler`] is a
//! virtual-clock implementation for headless hosts and tests.
//!
//! Everything runs on the host UI thread, so tasks are plain `FnOnce()` boxes
//! with no `Send` bound.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::time::Duration;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Handle identifying a scheduled task, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a host-assigned task number.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw task number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Abstraction over the host's frame and timer queues.
///
/// # Implementations
///
/// - [`ManualScheduler`]: virtual clock driven explicitly by the caller
///
/// Cancelling a task that already ran (or was never scheduled) is a no-op.
pub trait Scheduler {
    /// Runs `task` on the next paint frame.
    fn request_frame(&self, task: Task) -> TaskId;

    /// Runs `task` once `delay` has elapsed.
    fn set_timeout(&self, delay: Duration, task: Task) -> TaskId;

    /// Cancels a pending frame callback or timer.
    fn cancel(&self, id: TaskId);
}

#[derive(Default)]
struct Queues {
    next_id: u64,
    now: Duration,
    frames: VecDeque<(TaskId, Task)>,
    timers: BTreeMap<(Duration, TaskId), Task>,
}

impl Queues {
    fn allocate(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId(self.next_id)
    }
}

/// A scheduler with a virtual clock.
///
/// Nothing runs until the owner calls [`run_frame`](Self::run_frame),
/// [`advance`](Self::advance) or [`flush`](Self::flush). Tasks never run while
/// the internal queues are borrowed, so a task may freely schedule or cancel
/// other tasks.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use headless_ui::runtime::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&fired);
/// scheduler.set_timeout(Duration::from_millis(350), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_millis(349));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    queues: RefCell<Queues>,
}

impl ManualScheduler {
    /// Creates an idle scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.queues.borrow().now
    }

    /// Number of frame callbacks waiting for the next frame.
    pub fn pending_frames(&self) -> usize {
        self.queues.borrow().frames.len()
    }

    /// Number of timers that have not fired yet.
    pub fn pending_timers(&self) -> usize {
        self.queues.borrow().timers.len()
    }

    /// Runs one paint frame.
    ///
    /// Only callbacks requested before this call run; callbacks they request
    /// are deferred to the following frame. Returns the number of callbacks run.
    pub fn run_frame(&self) -> usize {
        let cutoff = self.queues.borrow().next_id;
        let mut ran = 0;
        loop {
            let task = {
                let mut queues = self.queues.borrow_mut();
                match queues.frames.front() {
                    Some((id, _)) if id.0 <= cutoff => queues.frames.pop_front(),
                    _ => None,
                }
            };
            let Some((_, task)) = task else {
                break;
            };
            task();
            ran += 1;
        }
        tracing::trace!(ran, "frame complete");
        ran
    }

    /// Advances the virtual clock by `by`, firing due timers in deadline order.
    ///
    /// Timers scheduled by firing timers also fire if their deadline falls
    /// inside the window. Returns the number of timers fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.queues.borrow().now + by;
        let mut fired = 0;
        loop {
            let task = {
                let mut queues = self.queues.borrow_mut();
                let due = queues
                    .timers
                    .first_key_value()
                    .map(|(key, _)| *key)
                    .filter(|(deadline, _)| *deadline <= target);
                due.and_then(|key| {
                    queues.now = key.0;
                    queues.timers.remove(&key)
                })
            };
            let Some(task) = task else {
                break;
            };
            task();
            fired += 1;
        }
        self.queues.borrow_mut().now = target;
        fired
    }

    /// Runs frames and timers until both queues are empty.
    pub fn flush(&self) {
        loop {
            if self.pending_frames() > 0 {
                self.run_frame();
                continue;
            }
            let next_deadline = self
                .queues
                .borrow()
                .timers
                .first_key_value()
                .map(|((deadline, _), _)| *deadline);
            match next_deadline {
                Some(deadline) => {
                    let by = deadline.saturating_sub(self.now());
                    self.advance(by);
                }
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&self, task: Task) -> TaskId {
        let mut queues = self.queues.borrow_mut();
        let id = queues.allocate();
        queues.frames.push_back((id, task));
        id
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> TaskId {
        let mut queues = self.queues.borrow_mut();
        let id = queues.allocate();
        let deadline = queues.now + delay;
        queues.timers.insert((deadline, id), task);
        id
    }

    fn cancel(&self, id: TaskId) {
        let mut queues = self.queues.borrow_mut();
        queues.frames.retain(|(task_id, _)| *task_id != id);
        queues.timers.retain(|(_, task_id), _| *task_id != id);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let queues = self.queues.borrow();
        f.debug_struct("ManualScheduler")
            .field("now", &queues.now)
            .field("frames", &queues.frames.len())
            .field("timers", &queues.timers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let make = move |name: &'static str| -> Task {
            let sink = Rc::clone(&sink);
            Box::new(move || sink.borrow_mut().push(name))
        };
        (log, make)
    }

    #[test]
    fn frames_requested_during_a_frame_wait_for_the_next() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (log, make) = recorder();
        let inner = make("inner");
        let nested = Rc::clone(&scheduler);
        let sink = Rc::clone(&log);
        scheduler.request_frame(Box::new(move || {
            sink.borrow_mut().push("outer");
            nested.request_frame(inner);
        }));

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(*log.borrow(), vec!["outer"]);
        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();
        scheduler.set_timeout(Duration::from_millis(300), make("late"));
        scheduler.set_timeout(Duration::from_millis(100), make("early"));

        assert_eq!(scheduler.advance(Duration::from_millis(500)), 2);
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert_eq!(scheduler.now(), Duration::from_millis(500));
    }

    #[test]
    fn cancelled_tasks_never_run() {
        let scheduler = ManualScheduler::new();
        let (log, make) = recorder();
        let frame = scheduler.request_frame(make("frame"));
        let timer = scheduler.set_timeout(Duration::from_millis(10), make("timer"));
        scheduler.cancel(frame);
        scheduler.cancel(timer);

        scheduler.flush();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn flush_drains_chained_work() {
        let scheduler = Rc::new(ManualScheduler::new());
        let (log, make) = recorder();
        let chained = make("timer");
        let nested = Rc::clone(&scheduler);
        scheduler.request_frame(Box::new(move || {
            nested.set_timeout(Duration::from_millis(150), chained);
        }));

        scheduler.flush();
        assert_eq!(*log.borrow(), vec!["timer"]);
        assert_eq!(scheduler.now(), Duration::from_millis(150));
        assert_eq!(scheduler.pending_timers(), 0);
    }
}
