//! Ledge Dash headless runner
//!
//! Drives the game through the tick scheduler with a simple autopilot and
//! logs what happens. Rendering and audio belong to a front end; this binary
//! only exercises the simulation.
//!
//! Usage: `ledge-dash [settings.json] [level]`

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ledge_dash::sim::{GameEvent, Rect};
use ledge_dash::{Game, Key, Scheduler, ScreenKind, Settings};

/// Simulated frame length (60 fps)
const FRAME: Duration = Duration::from_micros(16_667);
/// Give up after this much simulated time
const MAX_RUN_SECS: u64 = 600;
/// Retries per level before moving on
const MAX_ATTEMPTS: u32 = 5;

/// Hold right; jump at ledges and in front of hazards
fn autopilot(game: &mut Game) {
    let Some(snap) = game.snapshot() else {
        return;
    };
    let body = snap.player.rect();
    let below_ahead = Rect::new(body.right(), body.bottom(), 25.0, 2.0);
    let in_front = Rect::new(body.right(), body.top(), 70.0, body.h);

    let ground_ahead = snap.level.solid_rects().any(|r| r.intersects(&below_ahead));
    let hazard_ahead = snap.level.enemies.iter().any(|e| e.body.intersects(&in_front))
        || snap.level.columns.iter().any(|c| c.kill_zone().intersects(&in_front))
        || snap.level.trap_kill_zones().any(|z| z.intersects(&in_front));
    let jump = snap.player.is_grounded() && (!ground_ahead || hazard_ahead);

    game.handle_key(Key::Right, true);
    if jump {
        game.handle_key(Key::Space, true);
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => Settings::from_json(&json),
        Err(e) => {
            log::warn!("Could not read {} ({}), using default settings", path, e);
            Settings::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let settings = load_settings(args.get(1).map(String::as_str));
    let first_level = args.get(2).and_then(|s| s.parse::<u32>().ok()).unwrap_or(1);

    let mut scheduler = Scheduler::new(settings.tick_interval());
    let game = Rc::new(RefCell::new(Game::with_defaults(settings, scheduler.handle())));
    {
        let game = game.clone();
        scheduler.on_tick(move || game.borrow_mut().update());
    }

    log::info!("Ledge Dash starting at level {}", first_level);
    if !game.borrow_mut().start_level(first_level) {
        log::warn!("Level {} is locked, starting from the menu selection", first_level);
        game.borrow_mut().handle_key(Key::Enter, true);
    }

    let mut attempts = 1;
    let mut elapsed = Duration::ZERO;
    while elapsed < Duration::from_secs(MAX_RUN_SECS) {
        autopilot(&mut game.borrow_mut());
        scheduler.advance(FRAME);
        elapsed += FRAME;

        let mut g = game.borrow_mut();
        let sound = g.settings().sound_enabled;
        for event in g.drain_events() {
            match event {
                GameEvent::Jumped | GameEvent::Landed => {
                    if sound {
                        log::trace!("cue {:?}", event);
                    }
                }
                other => log::info!("{:?}", other),
            }
        }

        match g.kind() {
            ScreenKind::Playing => {}
            ScreenKind::GameOver if attempts < MAX_ATTEMPTS => {
                attempts += 1;
                log::info!("Retrying (attempt {})", attempts);
                g.handle_key(Key::R, true);
            }
            ScreenKind::GameOver => {
                log::info!("Out of attempts");
                break;
            }
            ScreenKind::LevelCompleted => {
                attempts = 1;
                g.handle_key(Key::N, true);
            }
            ScreenKind::FinalVictory => {
                log::info!("All levels cleared in {:.1}s of game time", elapsed.as_secs_f32());
                break;
            }
            other => {
                log::warn!("Unexpected screen {:?}", other);
                break;
            }
        }
    }

    let g = game.borrow();
    log::info!(
        "Finished on {:?} after {} ticks; unlocked {:.0}% of levels",
        g.kind(),
        scheduler.ticks(),
        g.catalog().total_progress() * 100.0
    );
}
