//! Level geometry and per-tick runtime
//!
//! A `Level` is produced by the layout generator and then advanced once per
//! tick: the camera follows the player, patrol entities step, and the finish
//! marker is checked for completion.

use serde::{Deserialize, Serialize};

use super::patrol::{ColumnHazard, Enemy, MovingPlatform};
use super::rect::Rect;
use crate::consts::*;

/// Trap kill-zone: the visual rectangle enlarged so spike tips kill slightly early
pub fn trap_kill_zone(trap: &Rect) -> Rect {
    trap.expand(TRAP_KILL_MARGIN_X, TRAP_KILL_MARGIN_Y)
}

/// A playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// Static platforms, left to right
    pub platforms: Vec<Rect>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub traps: Vec<Rect>,
    pub enemies: Vec<Enemy>,
    pub columns: Vec<ColumnHazard>,
    /// Total horizontal length in world units
    pub length: f32,
    /// Player start X used as the zero point for progress
    pub start_x: f32,
    /// Finish marker, derived from the last placed platform
    pub finish: Rect,
    camera_x: f32,
    completed: bool,
}

impl Level {
    /// Empty level containing only the start platform
    pub fn new(length: f32) -> Self {
        let start = Rect::new(0.0, START_PLATFORM_Y, START_PLATFORM_WIDTH, PLATFORM_THICKNESS);
        let mut level = Self {
            platforms: vec![start],
            moving_platforms: Vec::new(),
            traps: Vec::new(),
            enemies: Vec::new(),
            columns: Vec::new(),
            length,
            start_x: PLAYER_START_X,
            finish: Rect::default(),
            camera_x: 0.0,
            completed: false,
        };
        level.place_finish();
        level
    }

    /// Position the finish marker on top of the last placed platform, flush with its right edge
    pub fn place_finish(&mut self) {
        debug_assert!(!self.platforms.is_empty(), "level must keep its start platform");
        let last = self.platforms.last().copied().unwrap_or(Rect::new(
            0.0,
            START_PLATFORM_Y,
            START_PLATFORM_WIDTH,
            PLATFORM_THICKNESS,
        ));
        self.finish = Rect::new(
            last.right() - FINISH_WIDTH,
            last.top() - FINISH_HEIGHT,
            FINISH_WIDTH,
            FINISH_HEIGHT,
        );
    }

    pub fn camera_x(&self) -> f32 {
        self.camera_x
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Largest camera offset that still keeps the view inside the level
    pub fn max_camera(&self, screen_width: f32) -> f32 {
        (self.length - screen_width).max(0.0)
    }

    /// Follow the player, keeping them a third of the way across the screen
    pub fn update_camera(&mut self, player_x: f32, screen_width: f32) {
        self.camera_x = (player_x - screen_width / 3.0).clamp(0.0, self.max_camera(screen_width));
    }

    /// Advance every patrol entity by one step
    pub fn advance_patrols(&mut self) {
        for enemy in &mut self.enemies {
            enemy.update();
        }
        for column in &mut self.columns {
            column.update();
        }
        for platform in &mut self.moving_platforms {
            platform.update();
        }
    }

    /// Per-tick runtime update: camera then patrols
    pub fn update(&mut self, player_x: f32, screen_width: f32) {
        self.update_camera(player_x, screen_width);
        self.advance_patrols();
    }

    /// Flip the completion flag if the player touches the finish marker
    ///
    /// Returns true only on the tick the flag changes.
    pub fn check_completion(&mut self, player: &Rect) -> bool {
        if self.completed || !player.intersects(&self.finish) {
            return false;
        }
        self.completed = true;
        true
    }

    /// Normalized travel toward the finish marker
    pub fn progress(&self, screen_width: f32) -> f32 {
        if self.length <= self.start_x {
            return 1.0;
        }
        let span = self.finish.x - self.start_x;
        if span <= 0.0 {
            return 1.0;
        }
        let travelled = self.camera_x + screen_width / 3.0 - self.start_x;
        (travelled / span).clamp(0.0, 1.0)
    }

    /// Landing candidates: static platforms in order, then moving platforms in order
    pub fn solid_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.platforms
            .iter()
            .copied()
            .chain(self.moving_platforms.iter().map(|p| p.body))
    }

    pub fn trap_kill_zones(&self) -> impl Iterator<Item = Rect> + '_ {
        self.traps.iter().map(trap_kill_zone)
    }

    /// Rightmost edge of any static platform
    pub fn rightmost_edge(&self) -> f32 {
        self.platforms.iter().map(Rect::right).fold(0.0, f32::max)
    }
}
