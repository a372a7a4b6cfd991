//! Collision detection and response for the player
//!
//! Two independent checks run every tick:
//! - landing: the feet probe against solid platforms, only while falling
//! - hazards: the full body against enemy bodies and hazard kill-zones

use super::level::Level;
use super::rect::Rect;
use super::state::{DeathCause, Player};

/// Result of a landing check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landing {
    /// The platform the player landed on
    pub platform: Rect,
    /// Vertical velocity at the moment of impact
    pub impact_speed: f32,
}

/// Resolve a landing against `platforms`
///
/// The first platform (in iteration order) whose top the feet probe touches
/// while the player is falling wins; the feet snap onto its surface and
/// vertical velocity is zeroed. Later platforms are not tested.
pub fn resolve_landing<I>(player: &mut Player, platforms: I) -> Option<Landing>
where
    I: IntoIterator<Item = Rect>,
{
    if player.vel_y <= 0.0 {
        return None;
    }

    let probe = player.feet_probe();
    let platform = platforms.into_iter().find(|p| probe.intersects(p))?;
    let impact_speed = player.vel_y;
    player.land_on(platform.top());
    Some(Landing {
        platform,
        impact_speed,
    })
}

/// Check the player body against every lethal rectangle in the level
///
/// Columns are tested first, then enemies, then traps; the first hit decides
/// the reported cause.
pub fn hazard_hit(body: &Rect, level: &Level) -> Option<DeathCause> {
    if level.columns.iter().any(|c| body.intersects(&c.kill_zone())) {
        return Some(DeathCause::Column);
    }
    if level.enemies.iter().any(|e| body.intersects(&e.body)) {
        return Some(DeathCause::Enemy);
    }
    if level.trap_kill_zones().any(|zone| body.intersects(&zone)) {
        return Some(DeathCause::Trap);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::patrol::{ColumnHazard, Enemy};

    #[test]
    fn test_landing_snaps_feet_to_surface() {
        let mut player = Player::new(50.0, 500.0);
        player.vel_y = 3.0;
        player.pos.y = 500.0 - PLAYER_HEIGHT + 2.0; // Feet 2px into the platform
        let platform = Rect::new(0.0, 500.0, 400.0, 20.0);

        let landing = resolve_landing(&mut player, [platform]);
        assert_eq!(landing.map(|l| l.platform), Some(platform));
        assert_eq!(player.feet_y(), 500.0);
        assert_eq!(player.vel_y, 0.0);
    }

    #[test]
    fn test_rising_player_passes_through() {
        let mut player = Player::new(50.0, 500.0);
        player.vel_y = -5.0;
        player.pos.y = 490.0;
        let before = player.pos;

        assert!(resolve_landing(&mut player, [Rect::new(0.0, 500.0, 400.0, 20.0)]).is_none());
        assert_eq!(player.pos, before);
        assert_eq!(player.vel_y, -5.0);
    }

    #[test]
    fn test_first_platform_wins() {
        let mut player = Player::new(50.0, 500.0);
        player.vel_y = 2.0;
        player.pos.y = 505.0 - PLAYER_HEIGHT;
        let first = Rect::new(0.0, 504.0, 100.0, 20.0);
        let second = Rect::new(0.0, 500.0, 100.0, 20.0);

        let landing = resolve_landing(&mut player, [first, second]);
        assert_eq!(landing.map(|l| l.platform), Some(first));
        assert_eq!(player.feet_y(), 504.0);
    }

    #[test]
    fn test_no_platform_below() {
        let mut player = Player::new(500.0, 500.0);
        player.vel_y = 2.0;
        assert!(resolve_landing(&mut player, [Rect::new(0.0, 500.0, 400.0, 20.0)]).is_none());
    }

    #[test]
    fn test_hazards() {
        let mut level = Level::new(3200.0);
        let body = Rect::new(600.0, 440.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        assert_eq!(hazard_hit(&body, &level), None);

        // Trap whose visual rect sits 3px right of the body still kills via its margin
        level.traps.push(Rect::new(633.0, 460.0, 40.0, 20.0));
        assert_eq!(hazard_hit(&body, &level), Some(DeathCause::Trap));

        level.enemies.push(Enemy::new(610.0, 480.0, 50.0, 2.0));
        assert_eq!(hazard_hit(&body, &level), Some(DeathCause::Enemy));

        // Spike above the column reaches the body even though the column body does not
        level.columns.push(ColumnHazard::new(600.0, 535.0, 40.0, 0.0, 1.0));
        assert_eq!(level.columns[0].body.top(), 495.0);
        assert_eq!(hazard_hit(&body, &level), Some(DeathCause::Column));
    }
}
