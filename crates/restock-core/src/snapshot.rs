//! Snapshot serialization for networks and their modules.
//!
//! Full network state is encoded via `bitcode` behind a versioned header
//! with a magic number, validated before any payload is applied. Module
//! state rides alongside as named byte blobs produced by
//! [`NodeModule::serialize_state`] and re-applied by name on restore.
//!
//! Live crafting tasks are transient and never part of a snapshot; the
//! crafting manager's live list is empty immediately after restore.

use crate::crafting::CraftingManager;
use crate::energy::EnergyBudget;
use crate::id::{NodeId, Ticks};
use crate::module::{ModuleError, NodeModule};
use crate::network::{Network, NodeEntry};
use crate::storage::NetworkStorage;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic number identifying a Restock network snapshot.
pub const SNAPSHOT_MAGIC: u32 = 0x5E57_0C4B;

/// Current format version. Increment when breaking the wire format.
pub const FORMAT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during snapshot encoding.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("bitcode encoding failed: {0}")]
    Encode(String),
}

/// Errors that can occur during snapshot decoding.
#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("invalid magic number: expected 0x{:08X}, got 0x{:08X}", SNAPSHOT_MAGIC, .0)]
    InvalidMagic(u32),
    #[error("unsupported format version: expected {}, got {}", FORMAT_VERSION, .0)]
    UnsupportedVersion(u32),
    #[error("snapshot from future version {0} (this build supports up to {FORMAT_VERSION})")]
    FutureVersion(u32),
    #[error("bitcode decoding failed: {0}")]
    Decode(String),
    #[error(transparent)]
    Module(#[from] ModuleError),
}

// ---------------------------------------------------------------------------
// Snapshot header
// ---------------------------------------------------------------------------

/// Header prepended to every serialized snapshot. Enables format detection
/// and version checking before the payload is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHeader {
    /// Magic number for format detection.
    pub magic: u32,
    /// Format version for forward compatibility.
    pub version: u32,
    /// Tick count at the time the snapshot was taken.
    pub tick: Ticks,
}

impl SnapshotHeader {
    /// Create a header for the current format version.
    pub fn new(tick: Ticks) -> Self {
        Self {
            magic: SNAPSHOT_MAGIC,
            version: FORMAT_VERSION,
            tick,
        }
    }

    /// Validate the header. Returns `Ok(())` if valid.
    pub fn validate(&self) -> Result<(), DeserializeError> {
        if self.magic != SNAPSHOT_MAGIC {
            return Err(DeserializeError::InvalidMagic(self.magic));
        }
        if self.version > FORMAT_VERSION {
            return Err(DeserializeError::FutureVersion(self.version));
        }
        if self.version < FORMAT_VERSION {
            return Err(DeserializeError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Serializable network state
// ---------------------------------------------------------------------------

/// One module's serialized state, matched by name on restore.
#[derive(Debug, Serialize, Deserialize)]
struct ModuleState {
    name: String,
    data: Vec<u8>,
}

/// The serializable portion of a network. Event buffers and live crafting
/// tasks are excluded (transient).
#[derive(Debug, Serialize, Deserialize)]
struct NetworkSnapshot {
    header: SnapshotHeader,
    storage: NetworkStorage,
    crafting: CraftingManager,
    energy: EnergyBudget,
    nodes: SlotMap<NodeId, NodeEntry>,
    module_states: Vec<ModuleState>,
}

impl Network {
    /// Serialize the network and the given modules' states.
    pub fn serialize(&self, modules: &[Box<dyn NodeModule>]) -> Result<Vec<u8>, SerializeError> {
        let snapshot = NetworkSnapshot {
            header: SnapshotHeader::new(self.current_tick()),
            storage: self.storage.clone(),
            crafting: self.crafting.clone(),
            energy: self.energy,
            nodes: self.nodes.clone(),
            module_states: modules
                .iter()
                .map(|module| ModuleState {
                    name: module.name().to_string(),
                    data: module.serialize_state(),
                })
                .collect(),
        };
        bitcode::serialize(&snapshot).map_err(|e| SerializeError::Encode(e.to_string()))
    }

    /// Restore a network from snapshot bytes, re-applying module states to
    /// the matching modules by name.
    pub fn deserialize(
        data: &[u8],
        modules: &mut [Box<dyn NodeModule>],
    ) -> Result<Network, DeserializeError> {
        let snapshot: NetworkSnapshot =
            bitcode::deserialize(data).map_err(|e| DeserializeError::Decode(e.to_string()))?;
        snapshot.header.validate()?;

        for state in &snapshot.module_states {
            let module = modules
                .iter_mut()
                .find(|module| module.name() == state.name)
                .ok_or_else(|| ModuleError::NotFound(state.name.clone()))?;
            module.load_state(&state.data)?;
        }

        Ok(Network::from_parts(
            snapshot.storage,
            snapshot.crafting,
            snapshot.energy,
            snapshot.nodes,
            snapshot.header.tick,
        ))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
