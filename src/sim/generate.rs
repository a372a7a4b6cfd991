//! Level layout generation
//!
//! Procedural levels are grown left to right from the start platform using a
//! seeded RNG; hand-authored levels replace that step with a literal layout.
//! Both finish with the same final approach so the flag is always reachable.

use rand::Rng;

use super::authored;
use super::level::Level;
use super::patrol::Enemy;
use super::rect::Rect;
use crate::Viewport;
use crate::catalog::LevelDescriptor;
use crate::consts::{PLATFORM_THICKNESS, START_PLATFORM_WIDTH};

/// Gap between platforms at difficulty 1.0 (min, max)
pub const BASE_GAP: (f32, f32) = (60.0, 140.0);
/// Platform width at difficulty 1.0 (min, max)
pub const BASE_WIDTH: (f32, f32) = (120.0, 260.0);
/// Range shrink per unit of difficulty above 1.0
pub const GAP_SHRINK: f32 = 20.0;
pub const WIDTH_SHRINK: f32 = 40.0;
/// Floors the shrinking ranges never go below
pub const MIN_GAP: f32 = 30.0;
pub const MIN_WIDTH: f32 = 60.0;
/// Lowest platform top, measured up from the bottom of the screen
pub const BOTTOM_CLEARANCE: f32 = 80.0;

/// Final approach geometry
pub const FINAL_PLATFORM_WIDTH: f32 = 400.0;
pub const FINAL_PLATFORM_RISE: f32 = 150.0;
pub const STEP_WIDTH: f32 = 100.0;
pub const STEP_GAP: f32 = 60.0;
pub const STEP_COUNT: usize = 3;
/// Step heights alternate between these offsets below the final platform
pub const STEP_DROP_LOW: f32 = 50.0;
pub const STEP_DROP_HIGH: f32 = 10.0;

/// A (min, max) range shrunk linearly by difficulty and clamped to `floor`
pub fn scaled_range(base: (f32, f32), shrink: f32, floor: f32, difficulty: f32) -> (f32, f32) {
    let delta = shrink * (difficulty.max(0.0) - 1.0);
    let lo = (base.0 - delta).max(floor);
    let hi = (base.1 - delta).max(lo);
    (lo, hi)
}

/// Gap range between consecutive procedural platforms
pub fn gap_range(difficulty: f32) -> (f32, f32) {
    scaled_range(BASE_GAP, GAP_SHRINK, MIN_GAP, difficulty)
}

/// Width range of procedural platforms
pub fn width_range(difficulty: f32) -> (f32, f32) {
    scaled_range(BASE_WIDTH, WIDTH_SHRINK, MIN_WIDTH, difficulty)
}

/// Horizontal span of the final approach (steps plus the wide platform)
pub fn approach_length() -> f32 {
    FINAL_PLATFORM_WIDTH + STEP_COUNT as f32 * (STEP_WIDTH + STEP_GAP)
}

/// X where the final approach begins; procedural platforms must end before it
pub fn approach_start(length: f32) -> f32 {
    length - approach_length()
}

/// Level length that always fits `platform_count` procedural platforms
///
/// Assumes every draw hits the top of its range, then rounds up past the
/// next hundred.
pub fn fitted_length(platform_count: u32, difficulty: f32) -> f32 {
    let (gap_min, gap_max) = gap_range(difficulty);
    let (_, width_max) = width_range(difficulty);
    let worst = START_PLATFORM_WIDTH
        + platform_count as f32 * (gap_max + width_max)
        + gap_min
        + approach_length();
    ((worst / 100.0).floor() + 1.0) * 100.0
}

/// Vertical band procedural platform tops are drawn from
fn height_range(viewport: Viewport) -> (f32, f32) {
    let y_min = viewport.height / 2.0;
    (y_min, (viewport.height - BOTTOM_CLEARANCE).max(y_min))
}

/// Build a level from its descriptor
pub fn generate_level<R: Rng>(desc: &LevelDescriptor, viewport: Viewport, rng: &mut R) -> Level {
    let mut level = Level::new(desc.length);

    if authored::apply_authored(desc.number, &mut level) {
        log::info!("Level {}: hand-authored layout", desc.number);
    } else {
        place_procedural(&mut level, desc, viewport, rng);
        level.traps.extend(desc.traps.iter().copied());
        level.enemies.extend(
            desc.enemies
                .iter()
                .map(|e| Enemy::new(e.x, e.ground_y, e.range, e.speed)),
        );
    }

    append_final_approach(&mut level, viewport);
    level.place_finish();

    log::info!(
        "Level {}: length={}, platforms={}, moving={}, traps={}, enemies={}, columns={}",
        desc.number,
        level.length,
        level.platforms.len(),
        level.moving_platforms.len(),
        level.traps.len(),
        level.enemies.len(),
        level.columns.len()
    );
    level
}

/// Append `platform_count` random platforms after the start platform, then
/// bridge whatever space is left before the final approach
fn place_procedural<R: Rng>(level: &mut Level, desc: &LevelDescriptor, viewport: Viewport, rng: &mut R) {
    let gap = gap_range(desc.difficulty);
    let width = width_range(desc.difficulty);
    let heights = height_range(viewport);
    let limit = approach_start(desc.length);

    let mut right = level.rightmost_edge();
    for i in 0..desc.platform_count {
        let g = rng.random_range(gap.0..=gap.1);
        let w = rng.random_range(width.0..=width.1);
        let y = rng.random_range(heights.0..=heights.1);

        let x = right + g;
        if x + w + gap.0 > limit {
            log::debug!(
                "Level {}: stopped after {} of {} platforms to leave room for the approach",
                desc.number,
                i,
                desc.platform_count
            );
            break;
        }

        level.platforms.push(Rect::new(x, y, w, PLATFORM_THICKNESS));
        right = x + w;
    }

    bridge_to_approach(level, right, limit, gap, width, heights, rng);
}

/// Add platforms until the space before `limit` is no wider than the largest gap
///
/// Far from the approach this keeps drawing regular platforms. The last one is
/// centred in the remaining space so the gaps on both sides stay in range.
fn bridge_to_approach<R: Rng>(
    level: &mut Level,
    mut right: f32,
    limit: f32,
    gap: (f32, f32),
    width: (f32, f32),
    heights: (f32, f32),
    rng: &mut R,
) {
    let mid_gap = (gap.0 + gap.1) / 2.0;
    let mut bridges = 0;

    while limit - right > gap.1 {
        let remaining = limit - right;
        let y = rng.random_range(heights.0..=heights.1);
        let (g, w) = if remaining > 2.0 * gap.1 + width.1 {
            (rng.random_range(gap.0..=gap.1), rng.random_range(width.0..=width.1))
        } else {
            let target = remaining - 2.0 * mid_gap;
            let mut w = target.min(width.1);
            if w < width.0 {
                w = width.0.min(remaining / 3.0).max(target);
            }
            ((remaining - w) / 2.0, w)
        };

        level.platforms.push(Rect::new(right + g, y, w, PLATFORM_THICKNESS));
        right += g + w;
        bridges += 1;
    }

    if bridges > 0 {
        log::debug!("Bridged {} platforms up to the final approach", bridges);
    }
}

/// Append the wide final platform and the three steps leading up to it
///
/// The steps are stored before the wide platform, keeping the list ordered
/// left to right and leaving the wide platform as the last one placed.
fn append_final_approach(level: &mut Level, viewport: Viewport) {
    let final_y = viewport.height - FINAL_PLATFORM_RISE;
    let final_x = level.length - FINAL_PLATFORM_WIDTH;

    for i in (0..STEP_COUNT).rev() {
        let x = final_x - (i + 1) as f32 * (STEP_WIDTH + STEP_GAP);
        let drop = if i % 2 == 0 { STEP_DROP_LOW } else { STEP_DROP_HIGH };
        level
            .platforms
            .push(Rect::new(x, final_y + drop, STEP_WIDTH, PLATFORM_THICKNESS));
    }

    level.platforms.push(Rect::new(
        final_x,
        final_y,
        FINAL_PLATFORM_WIDTH,
        PLATFORM_THICKNESS,
    ));
}
