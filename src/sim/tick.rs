//! Fixed timestep simulation tick
//!
//! Advances one Playing session by one tick and reports how it ended.

use super::collision::{hazard_hit, resolve_landing};
use super::state::{DeathCause, GameEvent, Session};
use crate::Viewport;

/// How a tick left the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing terminal happened
    Continue,
    /// The player died (fell off screen or touched a hazard)
    Died(DeathCause),
    /// The player touched the finish marker for the first time
    Completed,
}

/// Advance the session by one fixed tick
///
/// Order: player integration and landing, level runtime (camera, patrols),
/// hazard check, fall check, completion check.
pub fn tick(session: &mut Session, viewport: Viewport, events: &mut Vec<GameEvent>) -> TickOutcome {
    let player = &mut session.player;
    let level = &mut session.level;

    let was_airborne = !player.is_grounded();
    player.integrate();
    if resolve_landing(player, level.solid_rects()).is_some() && was_airborne {
        events.push(GameEvent::Landed);
    }

    level.update(player.pos.x, viewport.width);

    let body = player.rect();
    if let Some(cause) = hazard_hit(&body, level) {
        events.push(GameEvent::Died(cause));
        return TickOutcome::Died(cause);
    }

    if player.fell_below(viewport.height) {
        events.push(GameEvent::Died(DeathCause::Fell));
        return TickOutcome::Died(DeathCause::Fell);
    }

    if level.check_completion(&body) {
        events.push(GameEvent::LevelCompleted(session.level_number));
        return TickOutcome::Completed;
    }

    TickOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::level::Level;
    use crate::sim::rect::Rect;

    fn session() -> Session {
        Session::new(1, Level::new(3200.0))
    }

    #[test]
    fn test_spawn_settles_on_start_platform() {
        let mut s = session();
        let mut events = Vec::new();

        assert_eq!(tick(&mut s, Viewport::default(), &mut events), TickOutcome::Continue);
        assert_eq!(s.player.vel_y, 0.5);
        assert_eq!(s.player.pos.y, 459.0);

        tick(&mut s, Viewport::default(), &mut events);
        assert_eq!(s.player.vel_y, 0.0);
        assert_eq!(s.player.feet_y(), START_PLATFORM_Y);
        assert_eq!(events, vec![GameEvent::Landed]);

        // Standing still stays grounded tick after tick
        for _ in 0..10 {
            tick(&mut s, Viewport::default(), &mut events);
            assert!(s.player.is_grounded());
            assert_eq!(s.player.feet_y(), START_PLATFORM_Y);
        }
    }

    #[test]
    fn test_walking_off_the_edge_falls_and_dies() {
        let mut s = session();
        let mut events = Vec::new();
        // Keep the flag out of the way of the walk off the start platform
        s.level.finish = Rect::new(3175.0, 400.0, FINISH_WIDTH, FINISH_HEIGHT);
        s.player.moving_right = true;

        let mut outcome = TickOutcome::Continue;
        let mut last_vel = 0.0;
        let mut last_y = 0.0;
        for _ in 0..200 {
            outcome = tick(&mut s, Viewport::default(), &mut events);
            if outcome != TickOutcome::Continue {
                break;
            }
            if s.player.pos.x > START_PLATFORM_WIDTH + 5.0 {
                assert!(s.player.vel_y > last_vel);
                assert!(s.player.pos.y >= last_y);
            }
            last_vel = s.player.vel_y;
            last_y = s.player.pos.y;
        }
        assert_eq!(outcome, TickOutcome::Died(DeathCause::Fell));
        assert_eq!(events.last(), Some(&GameEvent::Died(DeathCause::Fell)));
    }

    #[test]
    fn test_reaching_finish_completes_once() {
        let mut s = session();
        let mut events = Vec::new();
        s.level.platforms.push(Rect::new(2800.0, 450.0, 400.0, PLATFORM_THICKNESS));
        s.level.place_finish();
        s.player.pos.x = 3160.0;
        s.player.pos.y = 450.0 - PLAYER_HEIGHT - 1.0;

        assert_eq!(tick(&mut s, Viewport::default(), &mut events), TickOutcome::Completed);
        for _ in 0..5 {
            assert_eq!(tick(&mut s, Viewport::default(), &mut events), TickOutcome::Continue);
        }
        assert!(s.level.is_completed());
    }

    #[test]
    fn test_enemy_contact_kills() {
        let mut s = session();
        let mut events = Vec::new();
        s.level
            .enemies
            .push(crate::sim::patrol::Enemy::new(70.0, START_PLATFORM_Y, 0.0, 0.0));
        assert_eq!(
            tick(&mut s, Viewport::default(), &mut events),
            TickOutcome::Died(DeathCause::Enemy)
        );
    }

    #[test]
    fn test_lands_on_moving_platform() {
        let mut s = Session::new(1, Level::new(3200.0));
        let mut events = Vec::new();
        s.level.platforms.clear();
        s.level.moving_platforms.push(crate::sim::patrol::MovingPlatform::new(
            Rect::new(0.0, 500.0, 200.0, PLATFORM_THICKNESS),
            crate::sim::patrol::Axis::Horizontal,
            100.0,
            1.0,
        ));
        for _ in 0..5 {
            tick(&mut s, Viewport::default(), &mut events);
        }
        assert!(s.player.is_grounded());
        assert_eq!(s.player.feet_y(), 500.0);
    }
}
