//! Filter selection: what a requester monitors, one descriptor at a time.
//!
//! A filter holds at most one item descriptor and at most one fluid
//! descriptor, with a mutually exclusive mode selecting which of the two is
//! active. The inactive slot is retained but never consulted, so switching
//! modes back and forth does not lose a configured descriptor.

use restock_core::id::{FluidTypeId, ItemTypeId};
use serde::{Deserialize, Serialize};

/// Which kind of resource the filter currently selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    Items,
    Fluids,
}

/// Single-slot filter configuration with an item-or-fluid mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    mode: FilterMode,
    item: Option<ItemTypeId>,
    fluid: Option<FluidTypeId>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            mode: FilterMode::Items,
            item: None,
            fluid: None,
        }
    }
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    pub fn is_items(&self) -> bool {
        self.mode == FilterMode::Items
    }

    pub fn is_fluids(&self) -> bool {
        self.mode == FilterMode::Fluids
    }

    pub fn item(&self) -> Option<ItemTypeId> {
        self.item
    }

    pub fn set_item(&mut self, item: Option<ItemTypeId>) {
        self.item = item;
    }

    pub fn fluid(&self) -> Option<FluidTypeId> {
        self.fluid
    }

    pub fn set_fluid(&mut self, fluid: Option<FluidTypeId>) {
        self.fluid = fluid;
    }

    /// Whether the active mode has a descriptor configured.
    pub fn is_configured(&self) -> bool {
        match self.mode {
            FilterMode::Items => self.item.is_some(),
            FilterMode::Fluids => self.fluid.is_some(),
        }
    }
}
