//! Aggregate network storage: the pooled item and fluid inventory that every
//! node on a network shares.
//!
//! Extraction is parameterized by [`Action`]: `Simulate` answers "how much of
//! X could be supplied" without removing anything, `Execute` removes it. An
//! absent type yields an extractable quantity of zero, never an error.

use crate::id::{FluidTypeId, ItemTypeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether an extraction mutates storage or only probes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Actually remove the extracted quantity.
    Execute,
    /// Non-mutating probe: report what could be extracted.
    Simulate,
}

/// Pooled item and fluid quantities, keyed by type.
///
/// Zero entries are dropped so iteration only sees types actually present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStorage {
    items: BTreeMap<ItemTypeId, u64>,
    fluids: BTreeMap<FluidTypeId, u64>,
}

impl NetworkStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add items to the pool.
    pub fn insert_item(&mut self, item_type: ItemTypeId, count: u32) {
        if count > 0 {
            let entry = self.items.entry(item_type).or_insert(0);
            *entry = entry.saturating_add(u64::from(count));
        }
    }

    /// Add fluid to the pool.
    pub fn insert_fluid(&mut self, fluid_type: FluidTypeId, amount: u64) {
        if amount > 0 {
            let entry = self.fluids.entry(fluid_type).or_insert(0);
            *entry = entry.saturating_add(amount);
        }
    }

    /// Extract up to `count` items of the given type.
    ///
    /// Returns the quantity actually extractable. With [`Action::Simulate`]
    /// nothing is removed; the return value alone answers the probe.
    #[must_use = "returns the quantity actually extractable, which may be less than requested"]
    pub fn extract_item(&mut self, item_type: ItemTypeId, count: u32, action: Action) -> u32 {
        let stored = self.items.get(&item_type).copied().unwrap_or(0);
        let taken = stored.min(u64::from(count)) as u32;
        if action == Action::Execute && taken > 0 {
            let remaining = stored - u64::from(taken);
            if remaining == 0 {
                self.items.remove(&item_type);
            } else {
                self.items.insert(item_type, remaining);
            }
        }
        taken
    }

    /// Extract up to `amount` of the given fluid.
    ///
    /// Same contract as [`extract_item`](Self::extract_item), with fluid
    /// amount semantics.
    #[must_use = "returns the quantity actually extractable, which may be less than requested"]
    pub fn extract_fluid(&mut self, fluid_type: FluidTypeId, amount: u64, action: Action) -> u64 {
        let stored = self.fluids.get(&fluid_type).copied().unwrap_or(0);
        let taken = stored.min(amount);
        if action == Action::Execute && taken > 0 {
            let remaining = stored - taken;
            if remaining == 0 {
                self.fluids.remove(&fluid_type);
            } else {
                self.fluids.insert(fluid_type, remaining);
            }
        }
        taken
    }

    /// Stored quantity of a specific item type.
    pub fn item_count(&self, item_type: ItemTypeId) -> u64 {
        self.items.get(&item_type).copied().unwrap_or(0)
    }

    /// Stored quantity of a specific fluid type.
    pub fn fluid_amount(&self, fluid_type: FluidTypeId) -> u64 {
        self.fluids.get(&fluid_type).copied().unwrap_or(0)
    }

    /// Total items across all types.
    pub fn total_items(&self) -> u64 {
        self.items.values().sum()
    }

    /// Total fluid across all types.
    pub fn total_fluids(&self) -> u64 {
        self.fluids.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.fluids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_extract_items() {
        let mut storage = NetworkStorage::new();
        let iron = ItemTypeId(0);
        storage.insert_item(iron, 50);
        assert_eq!(storage.item_count(iron), 50);

        let taken = storage.extract_item(iron, 30, Action::Execute);
        assert_eq!(taken, 30);
        assert_eq!(storage.item_count(iron), 20);
    }

    #[test]
    fn simulate_does_not_mutate() {
        let mut storage = NetworkStorage::new();
        let iron = ItemTypeId(0);
        storage.insert_item(iron, 10);

        let probed = storage.extract_item(iron, 64, Action::Simulate);
        assert_eq!(probed, 10);
        assert_eq!(storage.item_count(iron), 10);
    }

    #[test]
    fn extract_absent_type_yields_zero() {
        let mut storage = NetworkStorage::new();
        assert_eq!(storage.extract_item(ItemTypeId(9), 5, Action::Simulate), 0);
        assert_eq!(
            storage.extract_fluid(FluidTypeId(9), 5, Action::Execute),
            0
        );
    }

    #[test]
    fn extract_more_than_available() {
        let mut storage = NetworkStorage::new();
        let iron = ItemTypeId(0);
        storage.insert_item(iron, 5);
        let taken = storage.extract_item(iron, 10, Action::Execute);
        assert_eq!(taken, 5);
        assert_eq!(storage.item_count(iron), 0);
    }

    #[test]
    fn drained_entries_are_dropped() {
        let mut storage = NetworkStorage::new();
        let iron = ItemTypeId(0);
        storage.insert_item(iron, 5);
        let _ = storage.extract_item(iron, 5, Action::Execute);
        assert!(storage.is_empty());
    }

    #[test]
    fn fluid_amounts_are_independent_of_items() {
        let mut storage = NetworkStorage::new();
        storage.insert_item(ItemTypeId(0), 10);
        storage.insert_fluid(FluidTypeId(0), 4000);

        assert_eq!(storage.total_items(), 10);
        assert_eq!(storage.total_fluids(), 4000);

        let taken = storage.extract_fluid(FluidTypeId(0), 1500, Action::Execute);
        assert_eq!(taken, 1500);
        assert_eq!(storage.fluid_amount(FluidTypeId(0)), 2500);
        assert_eq!(storage.total_items(), 10);
    }

    #[test]
    fn zero_insert_is_a_no_op() {
        let mut storage = NetworkStorage::new();
        storage.insert_item(ItemTypeId(0), 0);
        storage.insert_fluid(FluidTypeId(0), 0);
        assert!(storage.is_empty());
    }
}
