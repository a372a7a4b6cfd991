//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (list order decides ties)
//! - No rendering or platform dependencies

pub mod authored;
pub mod collision;
pub mod generate;
pub mod level;
pub mod patrol;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Landing, hazard_hit, resolve_landing};
pub use generate::generate_level;
pub use level::{Level, trap_kill_zone};
pub use patrol::{Axis, ColumnHazard, Enemy, MovingPlatform, patrol_step};
pub use rect::Rect;
pub use state::{DeathCause, GameEvent, Player, Session};
pub use tick::{TickOutcome, tick};
