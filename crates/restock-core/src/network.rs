//! The network: node registry, energy accounting, and the tick loop.
//!
//! One [`Network`] corresponds to one logical graph of connected devices
//! sharing a storage pool and a crafting manager. Behavior modules are not
//! owned by the network; the caller passes them to [`Network::step`], which
//! runs them only while the network is powered.

use crate::crafting::CraftingManager;
use crate::energy::EnergyBudget;
use crate::id::{NodeId, Ticks};
use crate::module::{NetworkContext, NodeModule};
use crate::storage::NetworkStorage;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

// ---------------------------------------------------------------------------
// Node registry
// ---------------------------------------------------------------------------

/// Registry entry for one attached node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEntry {
    /// Fixed per-tick energy draw declared by the node.
    pub energy_usage: u32,
    /// Whether the node currently participates in the network. A
    /// disconnected node draws no energy and runs no updates.
    pub connected: bool,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by the network on state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    /// Demand exceeded the energy budget; node updates are suspended.
    PowerLost { tick: Ticks },
    /// Demand dropped back within the budget; node updates resume.
    PowerRestored { tick: Ticks },
}

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// A logical network of nodes with shared storage and crafting.
#[derive(Debug)]
pub struct Network {
    /// Aggregate item/fluid pools.
    pub storage: NetworkStorage,
    /// The crafting subsystem.
    pub crafting: CraftingManager,
    /// Energy supply for this network.
    pub energy: EnergyBudget,
    pub(crate) nodes: SlotMap<NodeId, NodeEntry>,
    pub(crate) tick: Ticks,
    pub(crate) was_powered: bool,
    pending_events: Vec<NetworkEvent>,
}

impl Network {
    /// Create an empty network with the given energy capacity.
    pub fn new(energy_capacity: u32) -> Self {
        Self {
            storage: NetworkStorage::new(),
            crafting: CraftingManager::new(),
            energy: EnergyBudget::new(energy_capacity),
            nodes: SlotMap::with_key(),
            tick: 0,
            // An empty network has zero demand and is trivially powered.
            was_powered: true,
            pending_events: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        storage: NetworkStorage,
        crafting: CraftingManager,
        energy: EnergyBudget,
        nodes: SlotMap<NodeId, NodeEntry>,
        tick: Ticks,
    ) -> Self {
        let mut network = Self {
            storage,
            crafting,
            energy,
            nodes,
            tick,
            was_powered: true,
            pending_events: Vec::new(),
        };
        network.was_powered = network.is_powered();
        network
    }

    // --- Node lifecycle ---

    /// Attach a node drawing `energy_usage` per tick. Nodes start connected.
    pub fn add_node(&mut self, energy_usage: u32) -> NodeId {
        self.nodes.insert(NodeEntry {
            energy_usage,
            connected: true,
        })
    }

    /// Detach a node entirely. Returns `false` for an unknown id.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        self.nodes.remove(node).is_some()
    }

    pub fn set_connected(&mut self, node: NodeId, connected: bool) {
        if let Some(entry) = self.nodes.get_mut(node) {
            entry.connected = connected;
        }
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.nodes.get(node).is_some_and(|entry| entry.connected)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &SlotMap<NodeId, NodeEntry> {
        &self.nodes
    }

    // --- Energy ---

    /// Total per-tick draw of all connected nodes.
    pub fn energy_demand(&self) -> u32 {
        self.nodes
            .values()
            .filter(|entry| entry.connected)
            .fold(0u32, |sum, entry| sum.saturating_add(entry.energy_usage))
    }

    pub fn is_powered(&self) -> bool {
        self.energy.is_powered(self.energy_demand())
    }

    // --- Tick loop ---

    pub fn current_tick(&self) -> Ticks {
        self.tick
    }

    /// Advance the simulation by one tick.
    ///
    /// Phases: crafting progression, then module updates, then power
    /// transition bookkeeping. An unpowered network is fully dormant -- no
    /// crafting progress and no module updates.
    pub fn step(&mut self, modules: &mut [Box<dyn NodeModule>]) {
        let tick = self.tick;
        let powered = self.is_powered();

        if powered {
            self.crafting.step(tick, &mut self.storage);

            let mut ctx = NetworkContext {
                storage: &mut self.storage,
                crafting: &mut self.crafting,
                nodes: &self.nodes,
                tick,
            };
            for module in modules.iter_mut() {
                module.on_tick(&mut ctx);
            }
        }

        if powered != self.was_powered {
            self.pending_events.push(if powered {
                NetworkEvent::PowerRestored { tick }
            } else {
                NetworkEvent::PowerLost { tick }
            });
            self.was_powered = powered;
        }

        self.tick += 1;
    }

    /// Drain buffered events.
    pub fn take_events(&mut self) -> Vec<NetworkEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
