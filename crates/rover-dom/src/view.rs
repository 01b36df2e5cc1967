//! View lifecycle: render, attach, hydrate, update, detach
//!
//! A [`View`] owns one [`Component`] and at most one realized root. Only
//! attach, hydrate and detach move the root; `update` may swap it when the
//! reconciler had to replace the root element.

use crate::builder::Builder;
use crate::node::{AbstractNode, NodeId, NodeKind};
use crate::platform::{Platform, PlatformError};
use crate::reconcile::{materialize, reconcile, ReconcileOptions};
use crate::scheduler::Scheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use thiserror::Error;
use tracing::{debug, error, warn};

/// User code behind a view
pub trait Component: 'static {
    fn render(&self, h: &Builder<'_>) -> AbstractNode;

    /// Runs after attach (deferred) or hydrate (immediately). `root` is
    /// `None` when the view was detached before a deferred hook fired.
    fn ready(&mut self, _root: Option<NodeId>, _platform: &mut dyn Platform) {}

    /// Runs first thing in `detach`
    fn destroy(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Unmounted,
    Rendered,
    Attached,
    Hydrated,
    Detached,
}

impl LifecycleState {
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleState::Unmounted => "unmounted",
            LifecycleState::Rendered => "rendered",
            LifecycleState::Attached => "attached",
            LifecycleState::Hydrated => "hydrated",
            LifecycleState::Detached => "detached",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("view id must not be empty")]
    MissingId,

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewConfig {
    pub id: String,
    /// Attributes kept across reconciliation passes
    pub preserve_attributes: Vec<String>,
    /// Class marking the element that keeps focus; `"focused"` when unset
    pub focus_class: Option<String>,
}

impl ViewConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preserve_attributes: Vec::new(),
            focus_class: None,
        }
    }

    pub fn preserve(mut self, attribute: impl Into<String>) -> Self {
        self.preserve_attributes.push(attribute.into());
        self
    }

    pub fn with_focus_class(mut self, class: impl Into<String>) -> Self {
        self.focus_class = Some(class.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ViewError::MissingId);
        }
        Ok(())
    }
}

struct ViewInstance<C> {
    config: ViewConfig,
    root: Option<NodeId>,
    state: LifecycleState,
    render_count: usize,
    component: C,
}

impl<C> ViewInstance<C> {
    fn reconcile_options(&self) -> ReconcileOptions {
        let options = ReconcileOptions {
            preserve_attributes: self.config.preserve_attributes.clone(),
            ..ReconcileOptions::default()
        };
        match &self.config.focus_class {
            Some(class) => options.with_focus_class(class.clone()),
            None => options,
        }
    }
}

/// Shared handle to a view instance
pub struct View<C: Component> {
    inner: Rc<RefCell<ViewInstance<C>>>,
}

impl<C: Component> Clone for View<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<C: Component> View<C> {
    pub fn new(config: ViewConfig, component: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Rc::new(RefCell::new(ViewInstance {
                config,
                root: None,
                state: LifecycleState::Unmounted,
                render_count: 0,
                component,
            })),
        })
    }

    pub fn id(&self) -> String {
        self.inner.borrow().config.id.clone()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.inner.borrow().root
    }

    pub fn state(&self) -> LifecycleState {
        self.inner.borrow().state
    }

    /// How many times the component's `render` has run
    pub fn render_count(&self) -> usize {
        self.inner.borrow().render_count
    }

    pub fn with_component<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.borrow_mut().component)
    }

    /// Produce a fresh abstract tree for `platform`
    pub fn render(&self, platform: &dyn Platform) -> AbstractNode {
        let h = Builder::new(platform);
        let mut inner = self.inner.borrow_mut();
        let node = inner.component.render(&h);
        inner.render_count += 1;
        if inner.state == LifecycleState::Unmounted {
            inner.state = LifecycleState::Rendered;
        }
        node
    }

    /// Insert the view under `parent`.
    ///
    /// An existing root is moved rather than re-rendered. A `parent` that is
    /// not a live element is logged and skipped. The ready hook is deferred
    /// onto `scheduler` with zero delay.
    pub fn attach(
        &self,
        platform: &mut dyn Platform,
        parent: NodeId,
        scheduler: &mut Scheduler,
    ) -> Result<()> {
        if platform.node_kind(parent) != Some(NodeKind::Element) {
            error!(view = %self.id(), ?parent, "attach target is not a live element");
            return Ok(());
        }

        let root = match self.root() {
            Some(root) => root,
            None => {
                let node = self.render(&*platform);
                materialize(platform, &node)?
            }
        };
        platform.append_child(parent, root)?;

        {
            let mut inner = self.inner.borrow_mut();
            inner.root = Some(root);
            inner.state = LifecycleState::Attached;
        }
        debug!(view = %self.id(), ?parent, ?root, "attached");

        scheduler.schedule_delay(self.ready_task(), 0);
        Ok(())
    }

    /// Adopt server-rendered `existing` as the root and reconcile against it.
    /// The ready hook runs before this returns.
    pub fn hydrate(&self, platform: &mut dyn Platform, existing: NodeId) -> Result<NodeId> {
        {
            let mut inner = self.inner.borrow_mut();
            inner.root = Some(existing);
            inner.state = LifecycleState::Hydrated;
        }

        let node = self.render(&*platform);
        let options = self.inner.borrow().reconcile_options();
        let root = reconcile(platform, node, existing, &options)?;

        let mut inner = self.inner.borrow_mut();
        inner.root = Some(root);
        debug!(view = %inner.config.id, ?root, "hydrated");
        inner.component.ready(Some(root), platform);
        Ok(root)
    }

    /// Re-render and reconcile against the current root.
    /// Returns the root afterwards, or `None` when nothing is mounted.
    pub fn update(&self, platform: &mut dyn Platform) -> Result<Option<NodeId>> {
        let Some(current) = self.root() else {
            debug!(view = %self.id(), "update skipped, view is not mounted");
            return Ok(None);
        };

        let node = self.render(&*platform);
        let options = self.inner.borrow().reconcile_options();
        let root = reconcile(platform, node, current, &options)?;
        self.inner.borrow_mut().root = Some(root);
        Ok(Some(root))
    }

    /// Run the destroy hook and take the root out of the tree. Valid in any state.
    pub fn detach(&self, platform: &mut dyn Platform) -> Result<()> {
        let root = {
            let mut inner = self.inner.borrow_mut();
            inner.component.destroy();
            inner.root.take()
        };

        if let Some(root) = root {
            if let Some(parent) = platform.parent(root) {
                platform.remove_child(parent, root)?;
            }
        }

        self.inner.borrow_mut().state = LifecycleState::Detached;
        debug!(view = %self.id(), "detached");
        Ok(())
    }

    fn ready_task(&self) -> crate::scheduler::Task {
        let weak: Weak<RefCell<ViewInstance<C>>> = Rc::downgrade(&self.inner);
        Box::new(move |platform| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let Ok(mut inner) = inner.try_borrow_mut() else {
                warn!("view busy, ready hook skipped");
                return;
            };
            let root = inner.root;
            inner.component.ready(root, platform);
        })
    }
}
