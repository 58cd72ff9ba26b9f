//! The transition tree.
//!
//! # Architecture
//!
//! ```text
//! Transition (root, owns `show`)
//!   ├── TransitionChild
//!   │     └── TransitionChild
//!   └── TransitionChild
//! ```
//!
//! Every node shares one `NodeInner` behind an `Rc`. Parents keep weak
//! references to their children and children keep a weak reference to their
//! parent, so the consumer's handles decide how long nodes live. Dropping a
//! child handle unregisters it, and a parent waiting on it re-checks whether
//! its own leave can complete.
//!
//! A show signal is applied top-down: the root starts its phase, then each
//! child starts the same phase. Entering completes per node. Leaving
//! completes bottom-up: a node becomes hidden only once its own classes are
//! done *and* every registered child is hidden, at which point it tells its
//! parent to re-check.
//!
//! # Phase sequence
//!
//! 1. add `base` + `from`
//! 2. next frame: remove `from`, add `to`, measure the CSS transition time
//! 3. after that time: remove `base` + `to`, complete
//!
//! A phase with no classes completes synchronously. Starting a new phase
//! disposes the old one, which cancels its pending frame or timer and strips
//! whatever classes it had applied.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::classes::{Direction, TransitionClasses};
use super::timing;
use crate::domain::{generate_id, match_tag, HeadlessError, Result};
use crate::dom::{render_as, Dom, Element, Props};
use crate::runtime::{Disposables, Scheduler};

/// Where a node is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionStatus {
    /// Enter classes applied; waiting for the CSS transition.
    Entering,
    /// Fully shown, no transition classes applied.
    Visible,
    /// Leave classes applied, or waiting for children to finish leaving.
    Leaving,
    /// Not rendered.
    Hidden,
}

impl TransitionStatus {
    const CASES: [(&'static str, Self); 4] = [
        ("Entering", Self::Entering),
        ("Visible", Self::Visible),
        ("Leaving", Self::Leaving),
        ("Hidden", Self::Hidden),
    ];

    /// Whether the node produces output.
    #[must_use]
    pub const fn is_rendered(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

impl fmt::Display for TransitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for TransitionStatus {
    type Err = HeadlessError;

    fn from_str(s: &str) -> Result<Self> {
        match_tag(s, &Self::CASES)
    }
}

type Hook = Rc<dyn Fn()>;

/// Lifecycle callbacks, each fired once per phase.
#[derive(Clone, Default)]
pub struct TransitionHooks {
    before_enter: Option<Hook>,
    after_enter: Option<Hook>,
    before_leave: Option<Hook>,
    after_leave: Option<Hook>,
}

impl TransitionHooks {
    /// No callbacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired when an enter phase starts.
    #[must_use]
    pub fn before_enter(mut self, f: impl Fn() + 'static) -> Self {
        self.before_enter = Some(Rc::new(f));
        self
    }

    /// Fired when an enter phase completes.
    #[must_use]
    pub fn after_enter(mut self, f: impl Fn() + 'static) -> Self {
        self.after_enter = Some(Rc::new(f));
        self
    }

    /// Fired when a leave phase starts.
    #[must_use]
    pub fn before_leave(mut self, f: impl Fn() + 'static) -> Self {
        self.before_leave = Some(Rc::new(f));
        self
    }

    /// Fired when the node, and all its children, finished leaving.
    #[must_use]
    pub fn after_leave(mut self, f: impl Fn() + 'static) -> Self {
        self.after_leave = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for TransitionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHooks")
            .field("before_enter", &self.before_enter.is_some())
            .field("after_enter", &self.after_enter.is_some())
            .field("before_leave", &self.before_leave.is_some())
            .field("after_leave", &self.after_leave.is_some())
            .finish()
    }
}

fn fire(hook: Option<&Hook>) {
    if let Some(hook) = hook {
        hook();
    }
}

/// Construction options shared by roots and children.
#[derive(Debug, Clone)]
pub struct TransitionProps {
    /// Element tag to render as. Defaults to `div`.
    pub tag: String,
    /// Element id; generated when `None`.
    pub id: Option<String>,
    /// Enter and leave classes.
    pub classes: TransitionClasses,
    /// Lifecycle callbacks.
    pub hooks: TransitionHooks,
    /// Whether an initially shown root animates in on mount. Ignored on children.
    pub appear: bool,
}

impl Default for TransitionProps {
    fn default() -> Self {
        Self {
            tag: "div".to_string(),
            id: None,
            classes: TransitionClasses::default(),
            hooks: TransitionHooks::default(),
            appear: false,
        }
    }
}

impl TransitionProps {
    /// Default props with the given classes.
    #[must_use]
    pub fn with_classes(classes: TransitionClasses) -> Self {
        Self {
            classes,
            ..Self::default()
        }
    }

    /// Renders as `tag` instead of `div`.
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    /// Uses a fixed element id.
    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Installs lifecycle callbacks.
    #[must_use]
    pub fn hooks(mut self, hooks: TransitionHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Animates an initially shown root on mount.
    #[must_use]
    pub fn appear(mut self, appear: bool) -> Self {
        self.appear = appear;
        self
    }
}

/// Flags shared by every node of one tree.
#[derive(Debug)]
struct Tree {
    initial: Cell<bool>,
    appear: bool,
}

struct NodeInner {
    id: String,
    tag: String,
    classes: TransitionClasses,
    hooks: TransitionHooks,
    dom: Rc<dyn Dom>,
    phase: Disposables,
    status: Cell<TransitionStatus>,
    show: Cell<bool>,
    transitioning: Cell<bool>,
    tree: Rc<Tree>,
    parent: Weak<NodeInner>,
    children: RefCell<Vec<Weak<NodeInner>>>,
}

impl NodeInner {
    fn live_children(&self) -> Vec<Rc<Self>> {
        self.children
            .borrow()
            .iter()
            .filter_map(Weak::upgrade)
            .collect()
    }
}

impl Drop for NodeInner {
    fn drop(&mut self) {
        if let Some(parent) = self.parent.upgrade() {
            parent
                .children
                .borrow_mut()
                .retain(|child| child.strong_count() > 0);
            tracing::debug!(node = %self.id, parent = %parent.id, "transition child unregistered");
            check_leave_complete(&parent);
        }
    }
}

fn apply_show(node: &Rc<NodeInner>, show: bool) {
    if node.show.get() == show {
        return;
    }
    node.show.set(show);
    if show {
        enter(node);
    } else {
        leave(node);
    }
    for child in node.live_children() {
        apply_show(&child, show);
    }
}

fn enter(node: &Rc<NodeInner>) {
    node.phase.dispose();
    node.status.set(TransitionStatus::Entering);
    node.transitioning.set(true);
    tracing::debug!(node = %node.id, "enter");
    fire(node.hooks.before_enter.as_ref());
    run_phase(node, Direction::Enter, finish_enter);
}

fn finish_enter(node: &Rc<NodeInner>) {
    node.transitioning.set(false);
    node.status.set(TransitionStatus::Visible);
    tracing::debug!(node = %node.id, "entered");
    fire(node.hooks.after_enter.as_ref());
}

fn leave(node: &Rc<NodeInner>) {
    node.phase.dispose();
    if node.status.get() == TransitionStatus::Hidden {
        return;
    }
    node.status.set(TransitionStatus::Leaving);
    node.transitioning.set(true);
    tracing::debug!(node = %node.id, "leave");
    fire(node.hooks.before_leave.as_ref());
    run_phase(node, Direction::Leave, finish_leave);
}

fn finish_leave(node: &Rc<NodeInner>) {
    node.transitioning.set(false);
    check_leave_complete(node);
}

/// Hides `node` once its own leave is done and no child is still rendered.
fn check_leave_complete(node: &Rc<NodeInner>) {
    if node.status.get() != TransitionStatus::Leaving || node.transitioning.get() {
        return;
    }
    let waiting = node
        .live_children()
        .iter()
        .filter(|child| child.status.get().is_rendered())
        .count();
    if waiting > 0 {
        tracing::trace!(node = %node.id, waiting, "leave waiting on children");
        return;
    }

    node.status.set(TransitionStatus::Hidden);
    tracing::debug!(node = %node.id, "left");
    fire(node.hooks.after_leave.as_ref());
    if let Some(parent) = node.parent.upgrade() {
        check_leave_complete(&parent);
    }
}

fn run_phase(node: &Rc<NodeInner>, direction: Direction, done: fn(&Rc<NodeInner>)) {
    let classes = node.classes.phase(direction);
    if classes.is_empty() {
        done(node);
        return;
    }

    let id = node.id.clone();
    let dom = Rc::clone(&node.dom);
    let start: Vec<String> = classes.base.iter().chain(&classes.from).cloned().collect();
    let end: Vec<String> = classes.base.iter().chain(&classes.to).cloned().collect();
    dom.add_classes(&id, &start);

    {
        let dom = Rc::clone(&dom);
        let id = id.clone();
        let all: Vec<String> = start.iter().chain(&classes.to).cloned().collect();
        node.phase.add(move || dom.remove_classes(&id, &all));
    }

    let weak = Rc::downgrade(node);
    node.phase.next_frame(move || {
        let Some(node) = weak.upgrade() else {
            return;
        };
        dom.remove_classes(&id, &classes.from);
        dom.add_classes(&id, &classes.to);

        let wait = timing::transition_time(dom.as_ref(), &id);
        tracing::trace!(node = %id, ?direction, wait_ms = wait.as_millis() as u64, "phase running");
        let finish = move || {
            if let Some(node) = weak.upgrade() {
                node.dom.remove_classes(&node.id, &end);
                done(&node);
            }
        };
        if wait.is_zero() {
            finish();
        } else {
            node.phase.set_timeout(wait, finish);
        }
    });
}

/// Reference handed to render-prop children so they can attach the node's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    /// Id the consumer's root element must carry.
    pub id: String,
    /// Tag the node would have rendered as.
    pub tag: String,
}

/// Behaviour shared by [`Transition`] and [`TransitionChild`].
#[derive(Clone)]
pub struct TransitionNode(Rc<NodeInner>);

impl TransitionNode {
    fn mount(
        dom: Rc<dyn Dom>,
        scheduler: Rc<dyn Scheduler>,
        tree: Rc<Tree>,
        parent: Weak<NodeInner>,
        props: TransitionProps,
    ) -> Rc<NodeInner> {
        let id = props.id.unwrap_or_else(|| generate_id("transition"));
        Rc::new(NodeInner {
            id,
            tag: props.tag,
            classes: props.classes,
            hooks: props.hooks,
            dom,
            phase: Disposables::new(scheduler),
            status: Cell::new(TransitionStatus::Hidden),
            show: Cell::new(false),
            transitioning: Cell::new(false),
            tree,
            parent,
            children: RefCell::new(Vec::new()),
        })
    }

    /// Element id the node applies classes to.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0.id
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> TransitionStatus {
        self.0.status.get()
    }

    /// Whether the node currently produces output.
    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.status().is_rendered()
    }

    /// The show signal this node last received.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.0.show.get()
    }

    /// Number of live registered children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.0.live_children().len()
    }

    /// Renders the node as its own element wrapping `children`.
    ///
    /// Returns `None` while hidden.
    #[must_use]
    pub fn render(&self, children: Vec<Element>) -> Option<Element> {
        self.render_with(|element| {
            render_as(
                &element.tag,
                Props::new().with("id", Some(element.id.clone())),
                children,
            )
        })
    }

    /// Render-prop variant: `f` builds the element itself and must put
    /// [`ElementRef::id`] on its root so classes land on it.
    ///
    /// Returns `None` while hidden.
    pub fn render_with(&self, f: impl FnOnce(&ElementRef) -> Element) -> Option<Element> {
        if !self.is_rendered() {
            return None;
        }
        let element = ElementRef {
            id: self.0.id.clone(),
            tag: self.0.tag.clone(),
        };
        Some(f(&element))
    }
}

impl fmt::Debug for TransitionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionNode")
            .field("id", &self.0.id)
            .field("status", &self.0.status.get())
            .field("show", &self.0.show.get())
            .field("children", &self.child_count())
            .finish_non_exhaustive()
    }
}

/// Root of a transition tree, driven by an explicit show signal.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use headless_ui::dom::MemoryDom;
/// use headless_ui::runtime::ManualScheduler;
/// use headless_ui::transition::{Transition, TransitionProps, TransitionStatus};
///
/// let dom = Rc::new(MemoryDom::new());
/// let scheduler = Rc::new(ManualScheduler::new());
/// let root = Transition::new(dom, scheduler, false, TransitionProps::default());
/// assert_eq!(root.status(), TransitionStatus::Hidden);
///
/// root.set_show(true);
/// assert_eq!(root.status(), TransitionStatus::Visible);
/// ```
#[derive(Debug, Clone)]
pub struct Transition {
    node: TransitionNode,
}

impl Transition {
    /// Mounts a root.
    ///
    /// An initially shown root renders visible at once with no classes,
    /// unless `props.appear` is set, in which case it runs an enter phase.
    pub fn new(
        dom: Rc<dyn Dom>,
        scheduler: Rc<dyn Scheduler>,
        show: bool,
        props: TransitionProps,
    ) -> Self {
        let tree = Rc::new(Tree {
            initial: Cell::new(true),
            appear: props.appear,
        });
        let inner = TransitionNode::mount(dom, scheduler, tree, Weak::new(), props);
        if show {
            inner.show.set(true);
            if inner.tree.appear {
                enter(&inner);
            } else {
                inner.status.set(TransitionStatus::Visible);
            }
        }
        tracing::debug!(node = %inner.id, show, "transition mounted");
        Self {
            node: TransitionNode(inner),
        }
    }

    /// Updates the show signal. Children follow.
    pub fn set_show(&self, show: bool) {
        let inner = &self.node.0;
        inner.tree.initial.set(false);
        let _span = tracing::debug_span!("set_show", node = %inner.id, show).entered();
        apply_show(inner, show);
    }
}

impl std::ops::Deref for Transition {
    type Target = TransitionNode;

    fn deref(&self) -> &TransitionNode {
        &self.node
    }
}

/// A nested node that inherits its show signal from the enclosing node.
#[derive(Debug, Clone)]
pub struct TransitionChild {
    node: TransitionNode,
}

impl TransitionChild {
    /// Mounts a child under `parent`, which may be a root or another child.
    ///
    /// # Errors
    ///
    /// Returns [`HeadlessError::MissingParent`] when `parent` is `None`.
    pub fn new(parent: Option<&TransitionNode>, props: TransitionProps) -> Result<Self> {
        let parent = parent.ok_or(HeadlessError::MissingParent {
            component: "Transition.Child",
            parent: "Transition",
        })?;
        let parent_inner = &parent.0;
        let inner = TransitionNode::mount(
            Rc::clone(&parent_inner.dom),
            parent_inner.phase.scheduler(),
            Rc::clone(&parent_inner.tree),
            Rc::downgrade(parent_inner),
            props,
        );
        parent_inner
            .children
            .borrow_mut()
            .push(Rc::downgrade(&inner));

        if parent_inner.show.get() {
            inner.show.set(true);
            if inner.tree.initial.get() && !inner.tree.appear {
                inner.status.set(TransitionStatus::Visible);
            } else {
                enter(&inner);
            }
        }
        tracing::debug!(node = %inner.id, parent = %parent_inner.id, "transition child mounted");
        Ok(Self {
            node: TransitionNode(inner),
        })
    }
}

impl std::ops::Deref for TransitionChild {
    type Target = TransitionNode;

    fn deref(&self) -> &TransitionNode {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::runtime::ManualScheduler;
    use std::time::Duration;

    fn setup() -> (Rc<MemoryDom>, Rc<ManualScheduler>) {
        (Rc::new(MemoryDom::new()), Rc::new(ManualScheduler::new()))
    }

    fn fade() -> TransitionClasses {
        TransitionClasses::new()
            .enter("fade")
            .enter_from("o-0")
            .enter_to("o-100")
            .leave("fade")
            .leave_from("o-100")
            .leave_to("o-0")
    }

    #[test]
    fn hidden_mount_without_appear_applies_nothing() {
        let (dom, scheduler) = setup();
        let root = Transition::new(
            dom.clone(),
            scheduler.clone(),
            false,
            TransitionProps::with_classes(fade()).id("panel"),
        );
        assert_eq!(root.status(), TransitionStatus::Hidden);
        assert!(root.render(vec![]).is_none());
        assert!(dom.classes("panel").is_empty());
        assert_eq!(scheduler.pending_frames(), 0);
    }

    #[test]
    fn shown_mount_without_appear_is_visible_at_once() {
        let (dom, scheduler) = setup();
        let root = Transition::new(
            dom.clone(),
            scheduler,
            true,
            TransitionProps::with_classes(fade()).id("panel"),
        );
        assert_eq!(root.status(), TransitionStatus::Visible);
        assert!(dom.classes("panel").is_empty());
        let element = root.render(vec![]).unwrap();
        assert_eq!(element.id.as_deref(), Some("panel"));
        assert_eq!(element.tag, "div");
    }

    #[test]
    fn appear_runs_the_enter_phase() {
        let (dom, scheduler) = setup();
        let root = Transition::new(
            dom.clone(),
            scheduler.clone(),
            true,
            TransitionProps::with_classes(fade()).id("panel").appear(true),
        );
        assert_eq!(root.status(), TransitionStatus::Entering);
        assert_eq!(dom.classes("panel"), vec!["fade", "o-0"]);

        scheduler.run_frame();
        assert_eq!(root.status(), TransitionStatus::Visible);
        assert!(dom.classes("panel").is_empty());
    }

    #[test]
    fn enter_waits_for_measured_duration() {
        let (dom, scheduler) = setup();
        dom.set_style("panel", "transition-duration", "100ms");
        let root = Transition::new(
            dom.clone(),
            scheduler.clone(),
            false,
            TransitionProps::with_classes(fade()).id("panel"),
        );
        root.set_show(true);
        assert_eq!(dom.classes("panel"), vec!["fade", "o-0"]);

        scheduler.run_frame();
        assert_eq!(dom.classes("panel"), vec!["fade", "o-100"]);
        assert_eq!(root.status(), TransitionStatus::Entering);

        scheduler.advance(Duration::from_millis(99));
        assert_eq!(root.status(), TransitionStatus::Entering);
        scheduler.advance(Duration::from_millis(1));
        assert_eq!(root.status(), TransitionStatus::Visible);
        assert!(dom.classes("panel").is_empty());
    }

    #[test]
    fn reshow_during_leave_cancels_it() {
        let (dom, scheduler) = setup();
        dom.set_style("panel", "transition-duration", "100ms");
        let root = Transition::new(
            dom.clone(),
            scheduler.clone(),
            true,
            TransitionProps::with_classes(fade()).id("panel"),
        );
        root.set_show(false);
        scheduler.run_frame();
        assert_eq!(dom.classes("panel"), vec!["fade", "o-0"]);

        root.set_show(true);
        assert_eq!(root.status(), TransitionStatus::Entering);
        assert_eq!(dom.classes("panel"), vec!["fade", "o-0"]);
        scheduler.flush();
        assert_eq!(root.status(), TransitionStatus::Visible);
        assert!(dom.classes("panel").is_empty());
    }

    #[test]
    fn hooks_fire_once_per_phase() {
        let (dom, scheduler) = setup();
        let log = Rc::new(RefCell::new(Vec::new()));
        let hook = |name: &'static str| {
            let log = Rc::clone(&log);
            move || log.borrow_mut().push(name)
        };
        let hooks = TransitionHooks::new()
            .before_enter(hook("before_enter"))
            .after_enter(hook("after_enter"))
            .before_leave(hook("before_leave"))
            .after_leave(hook("after_leave"));
        let root = Transition::new(
            dom,
            scheduler.clone(),
            false,
            TransitionProps::with_classes(fade()).hooks(hooks),
        );
        root.set_show(true);
        scheduler.flush();
        root.set_show(false);
        scheduler.flush();
        assert_eq!(
            *log.borrow(),
            vec!["before_enter", "after_enter", "before_leave", "after_leave"]
        );
    }

    #[test]
    fn child_without_parent_is_rejected() {
        let err = TransitionChild::new(None, TransitionProps::default()).unwrap_err();
        assert_eq!(
            err,
            HeadlessError::MissingParent {
                component: "Transition.Child",
                parent: "Transition",
            }
        );
    }

    #[test]
    fn parent_leave_waits_for_slower_child() {
        let (dom, scheduler) = setup();
        dom.set_style("child", "transition-duration", "300ms");
        let root = Transition::new(
            dom.clone(),
            scheduler.clone(),
            true,
            TransitionProps::default().id("root"),
        );
        let child = TransitionChild::new(
            Some(&root),
            TransitionProps::with_classes(fade()).id("child"),
        )
        .unwrap();
        assert_eq!(child.status(), TransitionStatus::Visible);

        root.set_show(false);
        assert_eq!(root.status(), TransitionStatus::Leaving);
        assert_eq!(child.status(), TransitionStatus::Leaving);

        scheduler.run_frame();
        scheduler.advance(Duration::from_millis(299));
        assert_eq!(root.status(), TransitionStatus::Leaving);

        scheduler.advance(Duration::from_millis(1));
        assert_eq!(child.status(), TransitionStatus::Hidden);
        assert_eq!(root.status(), TransitionStatus::Hidden);
    }

    #[test]
    fn dropping_a_leaving_child_releases_the_parent() {
        let (dom, scheduler) = setup();
        let root = Transition::new(dom, scheduler, true, TransitionProps::default());
        let child = TransitionChild::new(Some(&root), TransitionProps::with_classes(fade()))
            .unwrap();
        root.set_show(false);
        assert_eq!(root.status(), TransitionStatus::Leaving);

        drop(child);
        assert_eq!(root.child_count(), 0);
        assert_eq!(root.status(), TransitionStatus::Hidden);
    }

    #[test]
    fn status_tags_round_trip_through_match_tag() {
        assert_eq!("Leaving".parse::<TransitionStatus>(), Ok(TransitionStatus::Leaving));
        assert!("Gone".parse::<TransitionStatus>().is_err());
    }
}
