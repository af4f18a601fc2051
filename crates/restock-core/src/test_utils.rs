//! Shared helpers for tests across the workspace. Enabled with the
//! `test-utils` feature.

use crate::crafting::CraftingPattern;
use crate::id::{FluidTypeId, ItemTypeId};
use crate::module::NodeModule;
use crate::network::Network;

/// Item type used throughout tests.
pub fn iron() -> ItemTypeId {
    ItemTypeId(0)
}

/// A second item type for cross-contamination checks.
pub fn gear() -> ItemTypeId {
    ItemTypeId(1)
}

/// Fluid type used throughout tests.
pub fn water() -> FluidTypeId {
    FluidTypeId(0)
}

/// A network with enough energy capacity for any test fixture.
pub fn powered_network() -> Network {
    Network::new(1_000)
}

/// A pattern that finishes on the tick it was requested.
pub fn instant_pattern() -> CraftingPattern {
    CraftingPattern { duration: 0 }
}

/// A pattern that takes `duration` ticks to finish.
pub fn slow_pattern(duration: u64) -> CraftingPattern {
    CraftingPattern { duration }
}

/// Step the network `n` times with the given modules.
pub fn step_n(network: &mut Network, modules: &mut [Box<dyn NodeModule>], n: u64) {
    for _ in 0..n {
        network.step(modules);
    }
}
