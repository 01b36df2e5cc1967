//! Server-side rendering entry points
//!
//! A hosting layer hands over a [`RenderRequest`], gets markup back, and embeds
//! it together with the bootstrap payload. Routing and page templates live
//! with the host.

use crate::builder::Builder;
use crate::node::AbstractNode;
use crate::platform::{ActivePlatform, Platform, PlatformError};
use crate::reconcile::materialize;
use crate::serialize::emit;
use crate::view::{Component, View, ViewError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

/// Input shape of one server render
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    pub id: String,
    /// Loader output for the matched route
    pub data: Value,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
}

impl RenderRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

#[derive(Error, Debug)]
pub enum SsrError {
    #[error("view setup failed: {0}")]
    View(#[from] ViewError),

    #[error("serialization tree rejected a mutation: {0}")]
    Platform(#[from] PlatformError),
}

pub type Result<T> = std::result::Result<T, SsrError>;

/// Build the view described by `request` and render it for `platform`
pub fn render_entry<C, F>(platform: &dyn Platform, request: &RenderRequest, make: F) -> Result<AbstractNode>
where
    C: Component,
    F: FnOnce(&RenderRequest) -> Result<View<C>>,
{
    let view = make(request)?;
    Ok(view.render(platform))
}

/// Full serialization path: swap in a serialization platform, render,
/// materialize, emit, and restore whatever was active before.
pub fn render_to_string<C, F>(active: &mut ActivePlatform, request: &RenderRequest, make: F) -> Result<String>
where
    C: Component,
    F: FnOnce(&RenderRequest) -> Result<View<C>>,
{
    active.with_serialization(|platform| {
        let node = render_entry(&*platform, request, make)?;
        let root = materialize(platform, &node)?;
        let markup = emit(platform, root);
        debug!(id = %request.id, bytes = markup.len(), "rendered to string");
        Ok(markup)
    })
}

/// Loader output as JSON; anything that does not serialize is dropped with a warning
pub fn bootstrap_payload<T: Serialize + ?Sized>(data: &T) -> Value {
    match serde_json::to_value(data) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "bootstrap payload is not serializable, discarding");
            Value::Null
        }
    }
}

/// JSON text safe to place inside an inline `<script>` element
pub fn embed_payload(payload: &Value) -> String {
    payload.to_string().replace('<', "\\u003c")
}
