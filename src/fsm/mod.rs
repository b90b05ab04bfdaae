//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern, specialised for moisture control:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │  StateTable                                           │
//! │  ┌───────────────┬────────────┬──────────────────┐    │
//! │  │ MoistureState │ on_enter   │ on_cycle         │    │
//! │  ├───────────────┼────────────┼──────────────────┤    │
//! │  │ Started       │ -          │ -                │    │
//! │  │ Dry           │ fn(ctx)    │ fn(ctx)          │    │
//! │  │ ModeratelyDry │ fn(ctx)    │ fn(ctx)          │    │
//! │  │ Wet           │ fn(ctx)    │ fn(ctx)          │    │
//! │  └───────────────┴────────────┴──────────────────┘    │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Unlike a latched machine, the next state is never decided by the
//! current state's handler: every tick the engine classifies the latest
//! raw reading, transitions if the bucket changed (running `on_enter`),
//! then runs `on_cycle` for the resulting state.  `on_cycle` writes the
//! display text and pump request into [`FsmContext::commands`].

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Moisture classification bucket.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoistureState {
    /// Before the first sample has been classified.
    Started = 0,
    Dry = 1,
    ModeratelyDry = 2,
    Wet = 3,
}

impl MoistureState {
    /// Total number of states: used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert an index back to `MoistureState`.  Panics on out-of-range in
    /// debug builds; returns `Started` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Started,
            1 => Self::Dry,
            2 => Self::ModeratelyDry,
            3 => Self::Wet,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Started
            }
        }
    }

    /// Short tag used on the text display.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Started => "START",
            Self::Dry => "DRY",
            Self::ModeratelyDry => "MOD",
            Self::Wet => "WET",
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Runs once when a state is entered.
pub type StateActionFn = fn(&mut FsmContext);

/// Runs every cycle the state is current (after classification).
pub type StateCycleFn = fn(&mut FsmContext);

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: MoistureState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_cycle: Option<StateCycleFn>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and the cycle counters.  The mutable
/// [`FsmContext`] is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `MoistureState as usize`.
    table: [StateDescriptor; MoistureState::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Monotonically increasing cycle counter.
    cycle_count: u64,
    /// Cycle at which the current state was entered.
    state_entry_cycle: u64,
}

impl Fsm {
    /// Construct a new FSM.  Always begins in [`MoistureState::Started`].
    pub fn new(table: [StateDescriptor; MoistureState::COUNT]) -> Self {
        Self {
            table,
            current: MoistureState::Started as usize,
            cycle_count: 0,
            state_entry_cycle: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one sampling cycle.
    ///
    /// 1. Classify `ctx.sample.raw` against `ctx.thresholds`.
    /// 2. If the bucket differs from the current state, transition
    ///    (`on_enter` of the new state runs).
    /// 3. Run `on_cycle` for the now-current state.
    ///
    /// Returns the state after classification.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> MoistureState {
        self.cycle_count += 1;

        let next = ctx.thresholds.classify(ctx.sample.raw);
        if next as usize != self.current {
            self.transition(next, ctx);
        }

        if let Some(cycle) = self.table[self.current].on_cycle {
            cycle(ctx);
        }
        self.current_state()
    }

    /// The current state's identity.
    pub fn current_state(&self) -> MoistureState {
        MoistureState::from_index(self.current)
    }

    /// How many cycles the current state has been held, including the
    /// cycle that entered it.
    pub fn cycles_in_current_state(&self) -> u64 {
        self.cycle_count - self.state_entry_cycle
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: MoistureState, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // The entering cycle counts as the first cycle in the new state.
        self.current = next_idx;
        self.state_entry_cycle = self.cycle_count - 1;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
