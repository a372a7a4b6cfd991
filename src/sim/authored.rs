//! Hand-authored level layouts
//!
//! These levels are identified by number and bypass procedural generation.
//! Coordinates are world space for a 600px tall screen.

use super::level::Level;
use super::patrol::{Axis, ColumnHazard, Enemy, MovingPlatform};
use super::rect::Rect;
use crate::consts::PLATFORM_THICKNESS;

/// Level numbers with literal layouts
pub const TRAP_ALLEY: u32 = 4;
pub const MOVING_PARTS: u32 = 5;

const TRAP_WIDTH: f32 = 40.0;
const TRAP_HEIGHT: f32 = 15.0;

fn platform(x: f32, y: f32, w: f32) -> Rect {
    Rect::new(x, y, w, PLATFORM_THICKNESS)
}

/// Spike strip resting on a surface at `surface_y`
fn trap(x: f32, surface_y: f32) -> Rect {
    Rect::new(x, surface_y - TRAP_HEIGHT, TRAP_WIDTH, TRAP_HEIGHT)
}

/// Whether `number` has a literal layout
pub fn is_authored(number: u32) -> bool {
    matches!(number, TRAP_ALLEY | MOVING_PARTS)
}

/// Append the literal layout for `number`; returns false if it has none
pub fn apply_authored(number: u32, level: &mut Level) -> bool {
    match number {
        TRAP_ALLEY => trap_alley(level),
        MOVING_PARTS => moving_parts(level),
        _ => return false,
    }
    true
}

/// Static platforms guarded by spikes and patrolling enemies
fn trap_alley(level: &mut Level) {
    level.platforms.extend([
        platform(520.0, 470.0, 260.0),
        platform(880.0, 440.0, 300.0),
        platform(1280.0, 480.0, 350.0),
        platform(1740.0, 430.0, 240.0),
        platform(2080.0, 460.0, 380.0),
        platform(2560.0, 420.0, 220.0),
        platform(2900.0, 470.0, 400.0),
        platform(3420.0, 440.0, 260.0),
        platform(3800.0, 480.0, 320.0),
    ]);

    level.traps.extend([
        trap(1000.0, 440.0),
        trap(1420.0, 480.0),
        trap(2200.0, 460.0),
        trap(3050.0, 470.0),
    ]);

    level.enemies.extend([
        Enemy::new(1290.0, 480.0, 200.0, 2.0),
        Enemy::new(2090.0, 460.0, 300.0, 2.5),
        Enemy::new(2910.0, 470.0, 300.0, 3.0),
        Enemy::new(3810.0, 480.0, 250.0, 2.0),
    ]);
}

/// Moving platforms and rising columns between short static ledges
fn moving_parts(level: &mut Level) {
    level.platforms.extend([
        platform(520.0, 470.0, 200.0),
        platform(1250.0, 460.0, 300.0),
        platform(1900.0, 440.0, 280.0),
        platform(2300.0, 470.0, 240.0),
        platform(3150.0, 450.0, 360.0),
        platform(3620.0, 420.0, 200.0),
        platform(4200.0, 460.0, 360.0),
        platform(4700.0, 440.0, 260.0),
    ]);

    level.moving_platforms.extend([
        MovingPlatform::new(platform(800.0, 450.0, 120.0), Axis::Horizontal, 200.0, 1.5),
        MovingPlatform::new(platform(1650.0, 380.0, 120.0), Axis::Vertical, 120.0, 1.0),
        MovingPlatform::new(platform(2650.0, 430.0, 120.0), Axis::Horizontal, 250.0, 2.0),
        MovingPlatform::new(platform(3920.0, 360.0, 120.0), Axis::Vertical, 140.0, 1.2),
    ]);

    level.columns.extend([
        ColumnHazard::new(1380.0, 460.0, 50.0, 80.0, 1.5),
        ColumnHazard::new(3300.0, 450.0, 60.0, 90.0, 2.0),
    ]);

    level.traps.extend([trap(2400.0, 470.0), trap(4330.0, 460.0)]);

    level.enemies.extend([
        Enemy::new(1910.0, 440.0, 230.0, 2.0),
        Enemy::new(4210.0, 460.0, 300.0, 2.5),
    ]);
}
