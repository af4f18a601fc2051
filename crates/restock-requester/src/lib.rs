//! Requester Module for the Restock network.
//!
//! Keeps network stock of a filtered item or fluid at a per-node target
//! amount. Every reconciliation cycle (one in every `requester_interval`
//! ticks), each attached requester probes the aggregate storage with a
//! simulated extraction and, on a shortfall, asks the crafting manager to
//! produce the deficit -- capped by the global max-craft bound for items,
//! uncapped for fluids.
//!
//! # Design
//!
//! - Per-node requester state is stored in the module (not in the core
//!   registry), keyed by [`NodeId`].
//! - A crafting task handle is non-owning: it is revalidated against the
//!   manager's live list each cycle and never serialized.
//! - Settings persist as a key/value fragment (`"Amount"`,
//!   `"MissingItems"`) on two surfaces -- world save and configuration
//!   copy -- sharing a single scope-parameterized routine.
//! - Events fire only on *transitions*, not every tick.

pub mod filter;
pub mod requester;

pub use filter::{FilterConfig, FilterMode};
pub use requester::{
    REQUESTER_TYPE_ID, Requester, RequesterSettings, SettingsScope,
};

use std::collections::BTreeMap;

use restock_core::config::SimConfig;
use restock_core::dirty::DirtyTracker;
use restock_core::id::{FluidTypeId, ItemTypeId, NodeId, TaskId, Ticks};
use restock_core::module::{ModuleError, NetworkContext, NodeModule};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by the requester module on state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequesterEvent {
    /// A cycle found a deficit with no task in flight to cover it.
    MissingDetected { node: NodeId, tick: Ticks },
    /// A cycle found the target amount fully available.
    StockSatisfied { node: NodeId, tick: Ticks },
    /// A crafting request was admitted by the manager.
    RequestIssued {
        node: NodeId,
        task: TaskId,
        tick: Ticks,
    },
}

// ---------------------------------------------------------------------------
// Requester module
// ---------------------------------------------------------------------------

/// Manages all requester nodes attached to one network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequesterModule {
    requesters: BTreeMap<NodeId, Requester>,
    config: SimConfig,
    #[serde(skip)]
    dirty: DirtyTracker,
    #[serde(skip)]
    pending_events: Vec<RequesterEvent>,
}

impl RequesterModule {
    pub fn new(config: SimConfig) -> Self {
        Self {
            requesters: BTreeMap::new(),
            config,
            dirty: DirtyTracker::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // --- Node lifecycle ---

    /// Attach a fresh requester to `node`, or return the existing one.
    pub fn attach(&mut self, node: NodeId) -> &mut Requester {
        self.requesters.entry(node).or_default()
    }

    /// Detach the requester from `node`, if any. Any in-flight task is
    /// abandoned to the crafting manager, not cancelled.
    pub fn detach(&mut self, node: NodeId) -> Option<Requester> {
        self.requesters.remove(&node)
    }

    pub fn get(&self, node: NodeId) -> Option<&Requester> {
        self.requesters.get(&node)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Requester> {
        self.requesters.get_mut(&node)
    }

    pub fn requester_count(&self) -> usize {
        self.requesters.len()
    }

    // --- Configuration setters (mark the node dirty for persistence) ---

    pub fn set_amount(&mut self, node: NodeId, amount: u32) {
        if let Some(requester) = self.requesters.get_mut(&node) {
            requester.set_amount(amount);
            self.dirty.mark_node(node);
        }
    }

    pub fn set_filter_mode(&mut self, node: NodeId, mode: FilterMode) {
        if let Some(requester) = self.requesters.get_mut(&node) {
            requester.filter_mut().set_mode(mode);
            self.dirty.mark_node(node);
        }
    }

    pub fn set_item_filter(&mut self, node: NodeId, item: Option<ItemTypeId>) {
        if let Some(requester) = self.requesters.get_mut(&node) {
            requester.filter_mut().set_item(item);
            self.dirty.mark_node(node);
        }
    }

    pub fn set_fluid_filter(&mut self, node: NodeId, fluid: Option<FluidTypeId>) {
        if let Some(requester) = self.requesters.get_mut(&node) {
            requester.filter_mut().set_fluid(fluid);
            self.dirty.mark_node(node);
        }
    }

    // --- Queries ---

    /// Effective missing status of a node; `false` for unknown nodes.
    pub fn is_missing_items(&self, node: NodeId) -> bool {
        self.requesters
            .get(&node)
            .is_some_and(|requester| requester.is_missing_items())
    }

    pub fn dirty(&self) -> &DirtyTracker {
        &self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty.mark_clean();
    }

    /// Drain buffered events.
    pub fn take_events(&mut self) -> Vec<RequesterEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // --- Settings transfer ---

    /// Export one node's settings fragment as JSON, for copying between
    /// nodes. `None` for unknown nodes.
    pub fn export_settings(&self, node: NodeId, scope: SettingsScope) -> Option<String> {
        let requester = self.requesters.get(&node)?;
        serde_json::to_string(&requester.write_settings(scope)).ok()
    }

    /// Apply a settings fragment to `node`, attaching a fresh requester if
    /// none exists. Fields absent from the fragment keep their current
    /// values.
    pub fn import_settings(
        &mut self,
        node: NodeId,
        scope: SettingsScope,
        json: &str,
    ) -> Result<(), ModuleError> {
        let settings: RequesterSettings = serde_json::from_str(json)
            .map_err(|e| ModuleError::DeserializeFailed(e.to_string()))?;
        self.requesters
            .entry(node)
            .or_default()
            .read_settings(scope, &settings);
        self.dirty.mark_node(node);
        Ok(())
    }
}

impl NodeModule for RequesterModule {
    fn name(&self) -> &str {
        REQUESTER_TYPE_ID
    }

    fn on_tick(&mut self, ctx: &mut NetworkContext<'_>) {
        // An interval of 0 would never divide evenly; treat it as 1.
        let interval = self.config.requester_interval.max(1);
        if ctx.tick % interval != 0 {
            return;
        }
        for (node, requester) in self.requesters.iter_mut() {
            if !ctx.is_updatable(*node) {
                continue;
            }
            requester.reconcile(*node, ctx, &self.config, &mut self.pending_events);
        }
    }

    fn serialize_state(&self) -> Vec<u8> {
        bitcode::serialize(self).unwrap_or_default()
    }

    fn load_state(&mut self, data: &[u8]) -> Result<(), ModuleError> {
        if data.is_empty() {
            return Ok(());
        }
        *self = bitcode::deserialize(data)
            .map_err(|e| ModuleError::DeserializeFailed(e.to_string()))?;
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

// ===========================================================================
// Tests
// ===========================================================================
