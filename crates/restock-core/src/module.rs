//! Module system: the seam through which behavior crates attach to a network.
//!
//! Modules hook into the network's tick loop via the [`NodeModule`] trait,
//! receiving a [`NetworkContext`] that exposes the capabilities a node may
//! consume: the aggregate storage (probe/extract), the crafting manager
//! (request/revalidate), the node registry view, and the current tick. The
//! default implementations of `on_tick`, `serialize_state`, and `load_state`
//! are no-ops, so modules only need to override the methods they care about.

use crate::crafting::CraftingManager;
use crate::id::{NodeId, Ticks};
use crate::network::NodeEntry;
use crate::storage::NetworkStorage;
use slotmap::SlotMap;

// ---------------------------------------------------------------------------
// NodeModule trait
// ---------------------------------------------------------------------------

/// A behavior module invoked once per powered tick.
pub trait NodeModule: std::fmt::Debug {
    /// The human-readable name of this module, used for lookup and for
    /// matching serialized state on restore.
    fn name(&self) -> &str;

    /// Called once per simulation tick while the network is powered.
    fn on_tick(&mut self, ctx: &mut NetworkContext<'_>) {
        let _ = ctx;
    }

    /// Serialize this module's internal state for snapshots.
    /// Returns an empty vec by default (stateless module).
    fn serialize_state(&self) -> Vec<u8> {
        Vec::new()
    }

    /// Load previously serialized state. Returns `Ok(())` by default (no-op).
    fn load_state(&mut self, _data: &[u8]) -> Result<(), ModuleError> {
        Ok(())
    }

    /// Downcast to `&dyn Any` for type-safe access to concrete module types.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Downcast to `&mut dyn Any` for type-safe mutable access.
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

// ---------------------------------------------------------------------------
// NetworkContext
// ---------------------------------------------------------------------------

/// Mutable context passed to modules during `on_tick`.
///
/// Modules run only while the network as a whole is powered; per-node
/// connectivity is checked through [`is_updatable`](Self::is_updatable).
pub struct NetworkContext<'a> {
    /// Aggregate item/fluid pools.
    pub storage: &'a mut NetworkStorage,
    /// The crafting manager (requests and live-task revalidation).
    pub crafting: &'a mut CraftingManager,
    /// The node registry (read-only view).
    pub nodes: &'a SlotMap<NodeId, NodeEntry>,
    /// The current simulation tick.
    pub tick: Ticks,
}

impl NetworkContext<'_> {
    /// Whether the node may run its update this tick: it must exist and be
    /// connected. Network power is already implied -- modules are not
    /// invoked on an unpowered network.
    pub fn is_updatable(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|entry| entry.connected)
    }
}

// ---------------------------------------------------------------------------
// ModuleError
// ---------------------------------------------------------------------------

/// Errors that can occur during module operations.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// Failed to deserialize module state from saved data.
    #[error("deserialize failed: {0}")]
    DeserializeFailed(String),
    /// A module with the given name was not found.
    #[error("module not found: {0}")]
    NotFound(String),
}

// ===========================================================================
// Tests
// ===========================================================================
