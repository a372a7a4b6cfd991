//! Ledge Dash - A side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, patrols, level runtime, generation)
//! - `catalog`: Ordered level descriptors with lock state
//! - `game`: Screen state machine routing ticks and input
//! - `scheduler`: Fixed-interval tick driver
//! - `settings`: Explicit session context (developer mode, sound, viewport)

pub mod catalog;
pub mod game;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use catalog::{LevelCatalog, LevelDescriptor};
pub use game::{Action, ButtonLayout, Frame, Game, Key, Screen, ScreenKind, Surface};
pub use scheduler::{Scheduler, SchedulerHandle};
pub use settings::Settings;

use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Nominal tick interval in milliseconds (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Maximum ticks delivered per scheduler pump to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player body
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Spawn X in world space
    pub const PLAYER_START_X: f32 = 50.0;
    /// Horizontal speed (pixels/tick)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gravity (pixels/tick²)
    pub const GRAVITY: f32 = 0.5;
    /// Jump impulse (pixels/tick, negative is up)
    pub const JUMP_IMPULSE: f32 = -12.0;
    /// Height of the landing probe below the feet
    pub const FEET_PROBE_HEIGHT: f32 = 1.0;

    /// Start platform, placed at the world origin
    pub const START_PLATFORM_Y: f32 = 500.0;
    pub const START_PLATFORM_WIDTH: f32 = 400.0;
    pub const PLATFORM_THICKNESS: f32 = 20.0;

    /// Finish marker (flag) size, independent of platform size
    pub const FINISH_WIDTH: f32 = 25.0;
    pub const FINISH_HEIGHT: f32 = 50.0;

    /// Trap kill-zone margins (spike tips are lethal before visual contact)
    pub const TRAP_KILL_MARGIN_X: f32 = 4.0;
    pub const TRAP_KILL_MARGIN_Y: f32 = 6.0;
    /// Extra height above a column hazard covered by its spike
    pub const COLUMN_SPIKE_HEIGHT: f32 = 20.0;
}

/// Logical screen size the simulation measures against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: consts::SCREEN_WIDTH,
            height: consts::SCREEN_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Horizontal offset of the player from the left edge when the camera follows
    #[inline]
    pub fn follow_offset(&self) -> f32 {
        self.width / 3.0
    }
}

/// Spread a level number and run seed into a per-level seed
#[inline]
pub fn level_seed(run_seed: u64, level: u32) -> u64 {
    (level as u64).wrapping_mul(2654435761).wrapping_add(run_seed)
}
