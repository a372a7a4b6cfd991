//! Player and session state
//!
//! A session is the single Player + Level pair owned by the Playing screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::rect::Rect;
use crate::consts::*;

/// Why a run ended in death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Fell below the bottom of the screen
    Fell,
    /// Touched a patrolling enemy
    Enemy,
    /// Touched a column hazard or its spike
    Column,
    /// Touched a trap kill-zone
    Trap,
}

/// Notable moments for the audio/visual collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    Died(DeathCause),
    LevelCompleted(u32),
    LevelUnlocked(u32),
    Victory,
}

/// The player body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner in world space
    pub pos: Vec2,
    /// Vertical velocity (pixels/tick, positive is down)
    pub vel_y: f32,
    pub moving_left: bool,
    pub moving_right: bool,
    pub size: Vec2,
}

impl Player {
    /// Player standing just above a surface at `ground_y`
    pub fn new(x: f32, ground_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, ground_y - PLAYER_HEIGHT - 1.0),
            vel_y: 0.0,
            moving_left: false,
            moving_right: false,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }

    /// Player at the standard spawn point above the start platform
    pub fn spawn() -> Self {
        Self::new(PLAYER_START_X, START_PLATFORM_Y)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Thin probe directly below the feet used for landing
    pub fn feet_probe(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y + self.size.y, self.size.x, FEET_PROBE_HEIGHT)
    }

    /// Y coordinate of the feet
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Zero vertical velocity is the grounded sentinel
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.vel_y == 0.0
    }

    /// Net horizontal intent (-1, 0 or +1)
    pub fn horizontal_intent(&self) -> f32 {
        match (self.moving_left, self.moving_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Start a jump if grounded; returns whether the jump happened
    pub fn jump(&mut self) -> bool {
        if self.is_grounded() {
            self.vel_y = JUMP_IMPULSE;
            true
        } else {
            false
        }
    }

    /// Integrate one tick of horizontal intent and gravity (no collision)
    ///
    /// Position uses the velocity from the previous tick; gravity is applied
    /// afterwards.
    pub fn integrate(&mut self) {
        self.pos.x += self.horizontal_intent() * PLAYER_SPEED;
        self.pos.y += self.vel_y;
        self.vel_y += GRAVITY;
    }

    /// Snap the feet onto a surface and stop falling
    pub fn land_on(&mut self, surface_y: f32) {
        self.pos.y = surface_y - self.size.y;
        self.vel_y = 0.0;
    }

    /// Whether the player has dropped below the bottom of the screen
    pub fn fell_below(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }
}

/// The Player + Level pair of one Playing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub level_number: u32,
    pub player: Player,
    pub level: Level,
}

impl Session {
    pub fn new(level_number: u32, level: Level) -> Self {
        Self {
            level_number,
            player: Player::spawn(),
            level,
        }
    }

    /// Fraction of the level travelled, for the HUD
    pub fn progress(&self, screen_width: f32) -> f32 {
        self.level.progress(screen_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_above_start_platform() {
        let player = Player::spawn();
        assert_eq!(player.pos, Vec2::new(50.0, 459.0));
        assert_eq!(player.feet_y(), 499.0);
        assert!(player.is_grounded());
    }

    #[test]
    fn test_integrate_is_semi_implicit() {
        let mut player = Player::spawn();
        player.integrate();
        // Velocity used this tick was the previous one (zero)
        assert_eq!(player.pos.y, 459.0);
        assert_eq!(player.vel_y, 0.5);
        player.integrate();
        assert_eq!(player.pos.y, 459.5);
        assert_eq!(player.vel_y, 1.0);
    }

    #[test]
    fn test_opposing_intents_cancel() {
        let mut player = Player::spawn();
        player.moving_left = true;
        player.moving_right = true;
        player.integrate();
        assert_eq!(player.pos.x, 50.0);

        player.moving_left = false;
        player.integrate();
        assert_eq!(player.pos.x, 55.0);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut player = Player::spawn();
        assert!(player.jump());
        assert_eq!(player.vel_y, JUMP_IMPULSE);
        assert!(!player.jump());
        assert_eq!(player.vel_y, JUMP_IMPULSE);
    }
}
