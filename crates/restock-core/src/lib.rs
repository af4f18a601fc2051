//! Restock Core -- the simulation substrate for storage-network automation.
//!
//! This crate provides the aggregate network storage, the crafting manager,
//! the energy budget, the node registry with its tick loop, versioned
//! snapshot serialization, and the module seam that behavior crates (such as
//! `restock-requester`) plug into.
//!
//! # Tick Pipeline
//!
//! Each call to [`network::Network::step`] advances the simulation by one
//! tick through the following phases:
//!
//! 1. **Crafting** -- Live crafting tasks progress; finished tasks deposit
//!    their output into network storage and leave the live list.
//! 2. **Modules** -- If the network is powered, every registered
//!    [`module::NodeModule`] runs with a [`module::NetworkContext`].
//! 3. **Bookkeeping** -- Power transitions are detected, events buffered,
//!    and the tick counter incremented.
//!
//! # Key Types
//!
//! - [`network::Network`] -- Node registry, tick loop, and event buffer.
//! - [`storage::NetworkStorage`] -- Aggregate item/fluid pools with
//!   simulate-or-execute extraction.
//! - [`crafting::CraftingManager`] -- Pattern registry and the live task
//!   list that requesters revalidate against.
//! - [`energy::EnergyBudget`] -- Supply-versus-demand powered check.
//! - [`module::NodeModule`] -- Trait for per-concern behavior modules.
//! - [`snapshot`] -- Versioned full-state serialization via bitcode.
//! - [`config::SimConfig`] -- Global tuning values loaded from TOML/JSON.

pub mod config;
pub mod crafting;
pub mod dirty;
pub mod energy;
pub mod id;
pub mod module;
pub mod network;
pub mod resource;
pub mod snapshot;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
