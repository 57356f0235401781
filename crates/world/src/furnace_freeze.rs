//! Freezing a furnace's burn countdown.
//!
//! A freezable (silk touch) furnace banks its remaining burn time when it has
//! nothing to smelt and restores it once it can smelt again, so fuel is never
//! wasted on an idle furnace.

use crate::furnace::{FurnaceDevice, RecipeBook};
use crate::scheduler::TickScheduler;
use enchantable_core::BlockPos;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Freeze state of one tracked furnace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FreezeState {
    /// Burning normally.
    Running,
    /// Burn time is banked.
    Frozen {
        /// Ticks to restore on resume.
        banked_ticks: u16,
    },
    /// The furnace can never freeze.
    NotFreezable,
}

/// Work deferred to a later tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferredAction {
    /// Finish pausing the furnace at this position.
    Pause(BlockPos),
}

/// Per-furnace freeze state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeController {
    state: FreezeState,
}

impl FreezeController {
    /// Controller for a furnace; freezability is fixed here.
    pub fn new(can_pause: bool) -> Self {
        let state = if can_pause {
            FreezeState::Running
        } else {
            FreezeState::NotFreezable
        };
        Self { state }
    }

    /// Current state.
    pub fn state(&self) -> FreezeState {
        self.state
    }

    /// Whether burn time is currently banked.
    pub fn is_frozen(&self) -> bool {
        matches!(self.state, FreezeState::Frozen { .. })
    }

    /// Banked ticks (0 unless frozen).
    pub fn banked_ticks(&self) -> u16 {
        match self.state {
            FreezeState::Frozen { banked_ticks } => banked_ticks,
            _ => 0,
        }
    }

    /// Request a pause.
    ///
    /// The pause completes one tick later through
    /// [`complete_pause`](Self::complete_pause), after the host finishes any
    /// output extraction triggered by the same event. Returns whether a pause
    /// was scheduled.
    pub fn pause(&self, pos: BlockPos, scheduler: &mut TickScheduler<DeferredAction>) -> bool {
        if self.state != FreezeState::Running {
            return false;
        }
        let due = scheduler.schedule_after(1, DeferredAction::Pause(pos));
        debug!(%pos, due = due.0, "furnace pause scheduled");
        true
    }

    /// Bank the device's live burn time and zero it.
    ///
    /// Only acts from [`FreezeState::Running`]. A device that already burnt
    /// out has nothing to bank and stays running.
    pub fn complete_pause(&mut self, device: &mut impl FurnaceDevice) {
        if self.state != FreezeState::Running {
            return;
        }
        let banked_ticks = device.burn_time();
        if banked_ticks == 0 {
            debug!("furnace burnt out before pausing");
            return;
        }
        device.set_burn_time(0);
        self.state = FreezeState::Frozen { banked_ticks };
        debug!(banked_ticks, "furnace frozen");
    }

    /// Restore banked burn time if the furnace can smelt again.
    ///
    /// Leaves the banked ticks untouched when the device is already burning,
    /// nothing is banked, the input is empty, or the input cannot yield the
    /// held output. Returns whether the furnace resumed.
    pub fn resume(&mut self, device: &mut impl FurnaceDevice, recipes: &RecipeBook) -> bool {
        let FreezeState::Frozen { banked_ticks } = self.state else {
            return false;
        };
        if device.burn_time() > 0 || banked_ticks < 1 {
            return false;
        }
        let Some(input) = device.input() else {
            return false;
        };
        if !recipes.can_yield(input, device.output()) {
            debug!(?input, output = ?device.output(), "furnace stays frozen: no viable recipe");
            return false;
        }

        device.set_burn_time(banked_ticks);
        self.state = FreezeState::Running;
        debug!(banked_ticks, "furnace resumed");
        true
    }
}
