use crate::id::{FluidTypeId, ItemTypeId};
use serde::{Deserialize, Serialize};

/// A stack of fungible items: a type and a count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_type: ItemTypeId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item_type: ItemTypeId, count: u32) -> Self {
        Self { item_type, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// A quantity of fluid: a type and an amount in millibucket-scale units.
///
/// Fluids have no stack size; the amount field carries the full quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidStack {
    pub fluid_type: FluidTypeId,
    pub amount: u64,
}

impl FluidStack {
    pub fn new(fluid_type: FluidTypeId, amount: u64) -> Self {
        Self { fluid_type, amount }
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

/// Exactly one item stack or one fluid stack.
///
/// Used wherever a single descriptor-plus-quantity must cover both kinds,
/// such as crafting requests and task outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resource {
    Item(ItemStack),
    Fluid(FluidStack),
}

impl Resource {
    /// The quantity carried, unified as `u64` (item count or fluid amount).
    pub fn quantity(&self) -> u64 {
        match self {
            Resource::Item(stack) => u64::from(stack.count),
            Resource::Fluid(stack) => stack.amount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.quantity() == 0
    }
}

impl From<ItemStack> for Resource {
    fn from(stack: ItemStack) -> Self {
        Resource::Item(stack)
    }
}

impl From<FluidStack> for Resource {
    fn from(stack: FluidStack) -> Self {
        Resource::Fluid(stack)
    }
}
