//! Registry of enchanted furnaces placed in a world.

use crate::config::FurnaceSettings;
use crate::furnace::{FurnaceModifiers, FurnaceState, RecipeBook};
use crate::furnace_freeze::{DeferredAction, FreezeController};
use crate::scheduler::TickScheduler;
use enchantable_core::item::ids;
use enchantable_core::{BlockPos, ItemStack, ItemType, SimTick};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// One enchanted furnace and its freeze controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFurnace {
    /// Device state.
    pub state: FurnaceState,
    /// Freeze state machine.
    pub freeze: FreezeController,
    /// A deferred pause is queued.
    pub pause_pending: bool,
}

/// Drives every tracked furnace on the update thread.
#[derive(Debug, Clone)]
pub struct FurnaceTracker {
    furnaces: BTreeMap<BlockPos, TrackedFurnace>,
    scheduler: TickScheduler<DeferredAction>,
    recipes: RecipeBook,
}

impl Default for FurnaceTracker {
    fn default() -> Self {
        Self::new(RecipeBook::default())
    }
}

impl FurnaceTracker {
    /// Create an empty tracker smelting from `recipes`.
    pub fn new(recipes: RecipeBook) -> Self {
        Self {
            furnaces: BTreeMap::new(),
            scheduler: TickScheduler::new(),
            recipes,
        }
    }

    /// Current tick.
    pub fn current_tick(&self) -> SimTick {
        self.scheduler.current_tick()
    }

    /// The recipe table furnaces smelt from.
    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Start tracking a furnace placed from `item`.
    ///
    /// Only enchanted furnace items are tracked, and only where the world
    /// enables enchanted furnaces. Returns whether the furnace is tracked.
    pub fn register(&mut self, pos: BlockPos, item: &ItemStack, settings: FurnaceSettings) -> bool {
        if !settings.enabled {
            debug!(%pos, "enchanted furnaces disabled in this world");
            return false;
        }
        if item.item_type != ItemType::Block(ids::FURNACE) || item.enchantments().next().is_none() {
            return false;
        }

        let modifiers = FurnaceModifiers::from_item(item, settings.allow_pause);
        debug!(%pos, ?modifiers, "tracking enchanted furnace");
        self.furnaces.insert(
            pos,
            TrackedFurnace {
                state: FurnaceState::with_modifiers(modifiers),
                freeze: FreezeController::new(modifiers.can_pause),
                pause_pending: false,
            },
        );
        true
    }

    /// Stop tracking a furnace, dropping any deferred pause.
    pub fn unregister(&mut self, pos: BlockPos) -> Option<TrackedFurnace> {
        let removed = self.furnaces.remove(&pos)?;
        self.scheduler
            .cancel_where(|action| *action == DeferredAction::Pause(pos));
        Some(removed)
    }

    /// Tracked furnace at `pos`.
    pub fn get(&self, pos: BlockPos) -> Option<&TrackedFurnace> {
        self.furnaces.get(&pos)
    }

    /// Mutable tracked furnace at `pos`, for host inventory edits.
    ///
    /// Call [`on_inventory_changed`](Self::on_inventory_changed) afterwards.
    pub fn get_mut(&mut self, pos: BlockPos) -> Option<&mut TrackedFurnace> {
        self.furnaces.get_mut(&pos)
    }

    /// Tracked furnaces in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&BlockPos, &TrackedFurnace)> + '_ {
        self.furnaces.iter()
    }

    /// Number of tracked furnaces.
    pub fn len(&self) -> usize {
        self.furnaces.len()
    }

    /// Whether no furnace is tracked.
    pub fn is_empty(&self) -> bool {
        self.furnaces.is_empty()
    }

    /// React to a change in a furnace's slots.
    ///
    /// A frozen furnace tries to resume. A running furnace that is lit but
    /// has nothing it can smelt schedules a pause.
    pub fn on_inventory_changed(&mut self, pos: BlockPos) {
        let Some(furnace) = self.furnaces.get_mut(&pos) else {
            return;
        };
        if furnace.freeze.is_frozen() {
            furnace.freeze.resume(&mut furnace.state, &self.recipes);
            return;
        }
        request_pause_if_idle(pos, furnace, &self.recipes, &mut self.scheduler);
    }

    /// Advance one tick.
    ///
    /// Deferred actions due this tick run first, then every furnace is
    /// stepped. Returns positions whose lit state changed.
    pub fn tick(&mut self) -> Vec<BlockPos> {
        for action in self.scheduler.advance() {
            match action {
                DeferredAction::Pause(pos) => {
                    if let Some(furnace) = self.furnaces.get_mut(&pos) {
                        furnace.pause_pending = false;
                        furnace.freeze.complete_pause(&mut furnace.state);
                    }
                }
            }
        }

        let mut changed = Vec::new();
        for (pos, furnace) in self.furnaces.iter_mut() {
            let may_ignite = !furnace.freeze.is_frozen();
            if furnace.state.tick(&self.recipes, may_ignite) {
                changed.push(*pos);
            }
            request_pause_if_idle(*pos, furnace, &self.recipes, &mut self.scheduler);
        }
        trace!(tick = self.current_tick().0, changed = changed.len(), "furnaces ticked");
        changed
    }
}

fn request_pause_if_idle(
    pos: BlockPos,
    furnace: &mut TrackedFurnace,
    recipes: &RecipeBook,
    scheduler: &mut TickScheduler<DeferredAction>,
) {
    if furnace.pause_pending || !furnace.state.is_lit() || furnace.state.can_smelt(recipes) {
        return;
    }
    if furnace.freeze.pause(pos, scheduler) {
        furnace.pause_pending = true;
    }
}
