//! Isomorphic element construction and reconciliation.
//!
//! Views render into a platform-neutral [`AbstractNode`] tree through a
//! [`Builder`]. The tree is realized on a [`Platform`]: [`LiveDocument`] for
//! interactive sessions or [`SerialDocument`] for markup. Later renders are
//! folded into the realized tree by [`reconcile`], which keeps focus and
//! selected attributes intact.

pub mod builder;
pub mod node;
pub mod platform;
pub mod reconcile;
pub mod scheduler;
pub mod serialize;
pub mod ssr;
pub mod view;

pub use builder::{Arg, Builder};
pub use node::{AbstractNode, ElementNode, Event, Handler, NodeId, NodeKind, PropValue, Props, StyleValue};
pub use platform::{
    ActivePlatform, LiveDocument, Platform, PlatformError, PlatformKind, RecordingPlatform,
    SerialDocument,
};
pub use reconcile::{reconcile, ReconcileOptions};
pub use scheduler::Scheduler;
pub use serialize::emit;
pub use ssr::{render_entry, render_to_string, RenderRequest, SsrError};
pub use view::{Component, LifecycleState, View, ViewConfig, ViewError};
