//! Crafting manager: pattern registry, live task list, and task progression.
//!
//! A request names a requester node and a [`Resource`] (descriptor plus
//! quantity). If a pattern is registered for the resource's type, a task is
//! admitted to the live list and a [`TaskId`] handle is returned; otherwise
//! the request is rejected with `None`. Holders of a handle get no
//! completion callback -- they revalidate against the live list via
//! [`CraftingManager::contains`], exactly the contract requester nodes
//! depend on.
//!
//! Tasks are transient: the live list is never serialized, so a freshly
//! deserialized manager has no tasks.

use crate::id::{FluidTypeId, ItemTypeId, NodeId, TaskId, Ticks};
use crate::resource::Resource;
use crate::storage::NetworkStorage;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// How a resource type is crafted: the ticks between request and deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingPattern {
    /// Ticks from admission until the output lands in network storage.
    pub duration: Ticks,
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// A live crafting job. Owned by the manager; requesters hold only the
/// [`TaskId`] handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingTask {
    /// The node that issued the request.
    pub requester: NodeId,
    /// What the task will deposit on completion.
    pub output: Resource,
    /// Tick at which the task was admitted.
    pub started: Ticks,
    /// Tick at which the output is deposited.
    pub finishes: Ticks,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by the crafting manager on task transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CraftingEvent {
    /// A request was admitted to the live list.
    TaskStarted {
        task: TaskId,
        requester: NodeId,
        tick: Ticks,
    },
    /// A task finished and its output was deposited into storage.
    TaskCompleted {
        task: TaskId,
        requester: NodeId,
        tick: Ticks,
    },
    /// A task was removed without producing output.
    TaskCancelled { task: TaskId, tick: Ticks },
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Pattern registry plus the live task list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CraftingManager {
    item_patterns: BTreeMap<ItemTypeId, CraftingPattern>,
    fluid_patterns: BTreeMap<FluidTypeId, CraftingPattern>,
    /// Live tasks. Handles into this map go stale when a task completes or
    /// is cancelled; holders must revalidate with [`contains`](Self::contains).
    #[serde(skip)]
    tasks: SlotMap<TaskId, CraftingTask>,
    #[serde(skip)]
    pending_events: Vec<CraftingEvent>,
}

impl CraftingManager {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Pattern registry ---

    pub fn register_item_pattern(&mut self, item_type: ItemTypeId, pattern: CraftingPattern) {
        self.item_patterns.insert(item_type, pattern);
    }

    pub fn register_fluid_pattern(&mut self, fluid_type: FluidTypeId, pattern: CraftingPattern) {
        self.fluid_patterns.insert(fluid_type, pattern);
    }

    /// Whether a pattern exists for the resource's type.
    pub fn has_pattern(&self, resource: &Resource) -> bool {
        self.pattern_for(resource).is_some()
    }

    fn pattern_for(&self, resource: &Resource) -> Option<CraftingPattern> {
        match resource {
            Resource::Item(stack) => self.item_patterns.get(&stack.item_type).copied(),
            Resource::Fluid(stack) => self.fluid_patterns.get(&stack.fluid_type).copied(),
        }
    }

    // --- Requests ---

    /// Request crafting of `resource` on behalf of `requester`.
    ///
    /// Returns `None` for an empty quantity or an unpatterned type; the
    /// caller stores whatever comes back and re-evaluates on its next cycle.
    pub fn request(
        &mut self,
        requester: NodeId,
        resource: Resource,
        tick: Ticks,
    ) -> Option<TaskId> {
        if resource.is_empty() {
            return None;
        }
        let pattern = self.pattern_for(&resource)?;
        let task = self.tasks.insert(CraftingTask {
            requester,
            output: resource,
            started: tick,
            finishes: tick.saturating_add(pattern.duration),
        });
        self.pending_events.push(CraftingEvent::TaskStarted {
            task,
            requester,
            tick,
        });
        Some(task)
    }

    // --- Live task list ---

    /// Whether the handle still refers to a live task.
    pub fn contains(&self, task: TaskId) -> bool {
        self.tasks.contains_key(task)
    }

    pub fn get(&self, task: TaskId) -> Option<&CraftingTask> {
        self.tasks.get(task)
    }

    pub fn tasks(&self) -> impl Iterator<Item = (TaskId, &CraftingTask)> {
        self.tasks.iter()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Remove a task without depositing output. Host-side operation;
    /// requesters abandon tasks rather than cancel them.
    pub fn cancel(&mut self, task: TaskId, tick: Ticks) -> bool {
        if self.tasks.remove(task).is_some() {
            self.pending_events
                .push(CraftingEvent::TaskCancelled { task, tick });
            true
        } else {
            false
        }
    }

    // --- Progression ---

    /// Advance every live task; finished tasks deposit their output into
    /// `storage` and leave the live list.
    pub fn step(&mut self, tick: Ticks, storage: &mut NetworkStorage) {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| tick >= task.finishes)
            .map(|(id, _)| id)
            .collect();

        for id in finished {
            if let Some(task) = self.tasks.remove(id) {
                match task.output {
                    Resource::Item(stack) => storage.insert_item(stack.item_type, stack.count),
                    Resource::Fluid(stack) => storage.insert_fluid(stack.fluid_type, stack.amount),
                }
                self.pending_events.push(CraftingEvent::TaskCompleted {
                    task: id,
                    requester: task.requester,
                    tick,
                });
            }
        }
    }

    /// Drain buffered events.
    pub fn take_events(&mut self) -> Vec<CraftingEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
