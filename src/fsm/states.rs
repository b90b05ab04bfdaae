//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers.  Transitions are driven
//! entirely by the classifier in [`Fsm::tick`](super::Fsm::tick); the
//! handlers only decide what the cycle does once the bucket is known.
//!
//! ```text
//!               ┌──────────[raw >= dry]──────────▶ DRY ──┐
//!               │                                  ▲ │   │
//!  STARTED ─────┼──[mod <= raw < dry]──▶ MODERATELY_DRY  │
//!               │                                  │ ▼   │
//!               └──────────[raw < mod]─────────────▶ WET ◀┘
//!
//!  Every bucket reaches every other bucket; none returns to STARTED.
//! ```

use super::context::{FsmContext, PumpRequest};
use super::{MoistureState, StateDescriptor};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; MoistureState::COUNT] {
    [
        // Index 0: Started
        StateDescriptor {
            id: MoistureState::Started,
            name: "Started",
            on_enter: None,
            on_cycle: None,
        },
        // Index 1: Dry
        StateDescriptor {
            id: MoistureState::Dry,
            name: "Dry",
            on_enter: Some(dry_enter),
            on_cycle: Some(dry_cycle),
        },
        // Index 2: ModeratelyDry
        StateDescriptor {
            id: MoistureState::ModeratelyDry,
            name: "ModeratelyDry",
            on_enter: Some(moderately_dry_enter),
            on_cycle: Some(moderately_dry_cycle),
        },
        // Index 3: Wet
        StateDescriptor {
            id: MoistureState::Wet,
            name: "Wet",
            on_enter: Some(wet_enter),
            on_cycle: Some(wet_cycle),
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  DRY state: water the plant
// ═══════════════════════════════════════════════════════════════════════════

fn dry_enter(ctx: &mut FsmContext) {
    info!(
        "DRY: raw {} at or above {}, soil needs water",
        ctx.sample.raw, ctx.thresholds.dry_raw
    );
}

fn dry_cycle(ctx: &mut FsmContext) {
    ctx.commands
        .show_status(MoistureState::Dry.tag(), ctx.sample.display_percent);
    ctx.commands.pump = PumpRequest::Run {
        duration_ms: ctx.config.pump_run_ms,
    };
    info!("Sensor value: {} | pump requested", ctx.sample.raw);
}

// ═══════════════════════════════════════════════════════════════════════════
//  MODERATELY_DRY state
// ═══════════════════════════════════════════════════════════════════════════

fn moderately_dry_enter(_ctx: &mut FsmContext) {
    info!("MODERATELY_DRY: soil drying out, holding off");
}

fn moderately_dry_cycle(ctx: &mut FsmContext) {
    ctx.commands
        .show_status(MoistureState::ModeratelyDry.tag(), ctx.sample.display_percent);
    info!(
        "Sensor value: {} | pump is not running: plant is watered",
        ctx.sample.raw
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  WET state
// ═══════════════════════════════════════════════════════════════════════════

fn wet_enter(_ctx: &mut FsmContext) {
    info!("WET: soil saturated");
}

fn wet_cycle(ctx: &mut FsmContext) {
    ctx.commands
        .show_status(MoistureState::Wet.tag(), ctx.sample.display_percent);
    info!(
        "Sensor value: {} | pump is not running: plant is watered",
        ctx.sample.raw
    );
}
