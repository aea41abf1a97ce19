//! Action registry: binds actions to their configs and runs dispatches

use std::sync::Arc;

use serde_json::{Map, Value};
use tokio::task::JoinHandle;

use super::fields::FieldSource;
use super::render::{render, OutputSink};
use super::request;
use super::table::{ActionConfig, ActionId, ActionTable};
use super::transport::Transport;
use crate::error::{Result, YoovaError};

/// Composition root for the dispatch layer.
///
/// Holds the immutable action table and the transport. Dispatches share no
/// mutable state with each other: two triggers of the same action run as two
/// independent requests, and whichever resolves last owns the output area.
pub struct ActionRegistry {
    table: ActionTable,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("actions", &self.table.len())
            .finish()
    }
}

impl ActionRegistry {
    /// Build a registry; every [`ActionId`] must have a config in `table`
    pub fn new(table: ActionTable, transport: Arc<dyn Transport>) -> Result<Self> {
        let missing = table.missing();
        if !missing.is_empty() {
            return Err(YoovaError::UnregisteredActions(missing));
        }
        Ok(Self { table, transport })
    }

    pub fn standard(transport: Arc<dyn Transport>) -> Result<Self> {
        Self::new(ActionTable::standard(), transport)
    }

    pub fn config(&self, action: ActionId) -> &ActionConfig {
        match self.table.get(action) {
            Some(config) => config,
            None => unreachable!("registry construction checks every action has a config"),
        }
    }

    /// Remote path for `action`
    pub fn resolve(&self, action: ActionId) -> &'static str {
        self.config(action).endpoint_path
    }

    /// Run one dispatch to completion: read fields, call the service, render
    pub async fn dispatch(&self, action: ActionId, fields: &dyn FieldSource, sink: &dyn OutputSink) {
        let payload = self.prepare(action, fields);
        self.complete(action, payload, sink).await;
    }

    /// Read fields now and finish the dispatch on a background task.
    ///
    /// The payload is built before this returns, so later edits to the form
    /// do not leak into an in-flight request.
    pub fn spawn_dispatch(
        self: &Arc<Self>,
        action: ActionId,
        fields: &dyn FieldSource,
        sink: Arc<dyn OutputSink>,
    ) -> JoinHandle<()> {
        let payload = self.prepare(action, fields);
        let registry = Arc::clone(self);
        tokio::spawn(async move {
            registry.complete(action, payload, sink.as_ref()).await;
        })
    }

    fn prepare(&self, action: ActionId, fields: &dyn FieldSource) -> Map<String, Value> {
        tracing::info!(%action, "dispatching");
        request::build(self.config(action), fields)
    }

    async fn complete(&self, action: ActionId, payload: Map<String, Value>, sink: &dyn OutputSink) {
        let path = self.resolve(action);
        let outcome = self.transport.send(path, &payload).await;
        let config = self.config(action);
        let ok = outcome.is_ok();
        render(outcome, config, sink);
        tracing::info!(%action, ok, "dispatch finished");
    }
}
