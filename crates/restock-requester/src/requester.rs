//! Per-node requester state and the reconciliation cycle.
//!
//! A requester watches one filtered item or fluid and keeps network stock at
//! a target amount. Each cycle it probes the network (a simulated
//! extraction), and on a shortfall asks the crafting manager for the
//! deficit. The returned task handle is non-owning: the manager gives no
//! completion callback, so the handle is revalidated against the live task
//! list at the start of every cycle.

use crate::RequesterEvent;
use crate::filter::{FilterConfig, FilterMode};
use restock_core::config::SimConfig;
use restock_core::id::{NodeId, TaskId, Ticks};
use restock_core::module::NetworkContext;
use restock_core::resource::{FluidStack, ItemStack};
use restock_core::storage::Action;
use serde::{Deserialize, Serialize};

/// Node type identifier reported by every requester.
pub const REQUESTER_TYPE_ID: &str = "requester";

/// Scope of a settings read or write.
///
/// `Full` is the world-save surface, `ConfigOnly` the surface used when
/// configuration is copied between nodes. Both carry the same field set;
/// the scope parameter keeps call sites explicit and the field list in one
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScope {
    Full,
    ConfigOnly,
}

/// The persisted key/value fragment of one requester.
///
/// Fields absent on read leave the current value unchanged; writes always
/// fill every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequesterSettings {
    #[serde(rename = "Amount", default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    #[serde(
        rename = "MissingItems",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub missing: Option<bool>,
}

/// State of one requester node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Requester {
    filter: FilterConfig,
    amount: u32,
    missing: bool,
    /// Handle to an in-flight crafting task. Non-owning and transient:
    /// never serialized, revalidated against the live list every cycle.
    #[serde(skip)]
    task: Option<TaskId>,
}

impl Requester {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Accessors ---

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: u32) {
        self.amount = amount;
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterConfig {
        &mut self.filter
    }

    /// The tracked in-flight task, if any.
    pub fn active_task(&self) -> Option<TaskId> {
        self.task
    }

    /// Effective missing status: the deficit flag, and no task in flight
    /// to cover it.
    pub fn is_missing_items(&self) -> bool {
        self.missing && self.task.is_none()
    }

    // --- Settings ---

    pub fn write_settings(&self, scope: SettingsScope) -> RequesterSettings {
        let _ = scope;
        RequesterSettings {
            amount: Some(self.amount),
            missing: Some(self.missing),
        }
    }

    pub fn read_settings(&mut self, scope: SettingsScope, settings: &RequesterSettings) {
        let _ = scope;
        if let Some(amount) = settings.amount {
            self.amount = amount;
        }
        if let Some(missing) = settings.missing {
            self.missing = missing;
        }
    }

    // --- Reconciliation ---

    /// Run one reconciliation cycle for this node.
    ///
    /// Callers gate on cadence and updatability; this method gates on the
    /// in-flight task and the filter.
    pub(crate) fn reconcile(
        &mut self,
        node: NodeId,
        ctx: &mut NetworkContext<'_>,
        config: &SimConfig,
        events: &mut Vec<RequesterEvent>,
    ) {
        if let Some(task) = self.task {
            if ctx.crafting.contains(task) {
                // Still being crafted; nothing to re-evaluate this cycle.
                return;
            }
            // Completed, cancelled, or otherwise gone. Drop the stale
            // handle and re-derive from the current stock level.
            self.task = None;
        }

        match self.filter.mode() {
            FilterMode::Items => {
                let Some(item_type) = self.filter.item() else {
                    return;
                };
                let available = ctx
                    .storage
                    .extract_item(item_type, self.amount, Action::Simulate);
                if available < self.amount {
                    // An absent type probes as zero, i.e. fully deficient.
                    let deficit = self.amount - available;
                    self.set_missing(true, node, ctx.tick, events);
                    let count = deficit.min(config.max_craft_amount);
                    if let Some(task) =
                        ctx.crafting
                            .request(node, ItemStack::new(item_type, count).into(), ctx.tick)
                    {
                        self.task = Some(task);
                        events.push(RequesterEvent::RequestIssued {
                            node,
                            task,
                            tick: ctx.tick,
                        });
                    }
                } else {
                    self.set_missing(false, node, ctx.tick, events);
                }
            }
            FilterMode::Fluids => {
                let Some(fluid_type) = self.filter.fluid() else {
                    return;
                };
                let target = u64::from(self.amount);
                let available = ctx
                    .storage
                    .extract_fluid(fluid_type, target, Action::Simulate);
                if available < target {
                    let deficit = target - available;
                    self.set_missing(true, node, ctx.tick, events);
                    // Fluid requests ask for the raw deficit; the
                    // max-craft bound applies to items only.
                    if let Some(task) = ctx.crafting.request(
                        node,
                        FluidStack::new(fluid_type, deficit).into(),
                        ctx.tick,
                    ) {
                        self.task = Some(task);
                        events.push(RequesterEvent::RequestIssued {
                            node,
                            task,
                            tick: ctx.tick,
                        });
                    }
                } else {
                    self.set_missing(false, node, ctx.tick, events);
                }
            }
        }
    }

    fn set_missing(
        &mut self,
        missing: bool,
        node: NodeId,
        tick: Ticks,
        events: &mut Vec<RequesterEvent>,
    ) {
        if self.missing != missing {
            self.missing = missing;
            events.push(if missing {
                RequesterEvent::MissingDetected { node, tick }
            } else {
                RequesterEvent::StockSatisfied { node, tick }
            });
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
