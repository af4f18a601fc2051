use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies a node (placed device) attached to a network.
    pub struct NodeId;

    /// Identifies a live crafting task owned by the crafting manager.
    pub struct TaskId;
}

/// Ticks are the atomic unit of simulation time.
pub type Ticks = u64;

/// Identifies an item type. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemTypeId(pub u32);

/// Identifies a fluid type. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FluidTypeId(pub u32);
