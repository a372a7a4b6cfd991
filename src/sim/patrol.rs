//! Patrol entities: enemies, column hazards and moving platforms
//!
//! All three oscillate along a single axis inside a closed interval using the
//! same reversal rule: step by `speed * direction`, and if that would leave the
//! interval, flip the direction and step again from the pre-flip position.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::COLUMN_SPIKE_HEIGHT;

/// Advance `pos` one step inside `[min, max]`, reversing at the bounds
///
/// Returns the new position; `direction` is flipped in place on reversal.
pub fn patrol_step(pos: f32, speed: f32, direction: &mut f32, min: f32, max: f32) -> f32 {
    let next = pos + speed * *direction;
    if next > max || next < min {
        *direction = -*direction;
        // A range narrower than one step would bounce past the far bound
        (pos + speed * *direction).clamp(min, max)
    } else {
        next
    }
}

/// Horizontal patrol enemy; touching its body is lethal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Rect,
    /// Left bound of the patrol
    pub home_x: f32,
    /// Patrol width; X stays within [home_x, home_x + range]
    pub range: f32,
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
}

impl Enemy {
    pub const WIDTH: f32 = 40.0;
    pub const HEIGHT: f32 = 40.0;

    /// Enemy standing on a surface at `ground_y`, starting at its home X moving right
    pub fn new(home_x: f32, ground_y: f32, range: f32, speed: f32) -> Self {
        Self {
            body: Rect::new(home_x, ground_y - Self::HEIGHT, Self::WIDTH, Self::HEIGHT),
            home_x,
            range: range.max(0.0),
            speed,
            direction: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.body.x = patrol_step(
            self.body.x,
            self.speed,
            &mut self.direction,
            self.home_x,
            self.home_x + self.range,
        );
    }
}

/// Vertically oscillating column with a spike on top
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnHazard {
    pub body: Rect,
    /// Surface Y of the platform the column stands on
    pub anchor_y: f32,
    /// How far above its resting position the column rises
    pub range: f32,
    pub speed: f32,
    pub direction: f32,
}

impl ColumnHazard {
    pub const WIDTH: f32 = 30.0;

    /// Column resting on the platform surface, about to rise
    pub fn new(x: f32, anchor_y: f32, height: f32, range: f32, speed: f32) -> Self {
        Self {
            body: Rect::new(x, anchor_y - height, Self::WIDTH, height),
            anchor_y,
            range: range.max(0.0),
            speed,
            direction: -1.0,
        }
    }

    /// Highest point (smallest Y) the body top reaches
    pub fn ceiling_y(&self) -> f32 {
        self.anchor_y - self.body.h - self.range
    }

    /// Resting point of the body top, flush with the platform
    pub fn floor_y(&self) -> f32 {
        self.anchor_y - self.body.h
    }

    pub fn update(&mut self) {
        let (min, max) = (self.ceiling_y(), self.floor_y());
        self.body.y = patrol_step(self.body.y, self.speed, &mut self.direction, min, max);
    }

    /// Lethal region: the body plus the spike above it
    pub fn kill_zone(&self) -> Rect {
        self.body.extend_up(COLUMN_SPIKE_HEIGHT)
    }
}

/// Movement axis of a moving platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Platform oscillating along exactly one axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub body: Rect,
    /// Start coordinate on the movement axis; lower bound of the oscillation
    pub start: f32,
    pub range: f32,
    pub speed: f32,
    pub direction: f32,
    pub axis: Axis,
}

impl MovingPlatform {
    pub fn new(body: Rect, axis: Axis, range: f32, speed: f32) -> Self {
        let start = match axis {
            Axis::Horizontal => body.x,
            Axis::Vertical => body.y,
        };
        Self {
            body,
            start,
            range: range.max(0.0),
            speed,
            direction: 1.0,
            axis,
        }
    }

    pub fn update(&mut self) {
        let (min, max) = (self.start, self.start + self.range);
        let slot = match self.axis {
            Axis::Horizontal => &mut self.body.x,
            Axis::Vertical => &mut self.body.y,
        };
        *slot = patrol_step(*slot, self.speed, &mut self.direction, min, max);
    }
}
