//! End-to-end flows through the scheduler and the screen state machine

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use ledge_dash::consts::*;
use ledge_dash::sim::{DeathCause, GameEvent, Level, Rect, Session};
use ledge_dash::{Game, Key, Scheduler, Screen, ScreenKind, Settings};

const STEP: Duration = Duration::from_millis(TICK_INTERVAL_MS);

fn wired(settings: Settings) -> (Scheduler, Rc<RefCell<Game>>) {
    let mut scheduler = Scheduler::new(settings.tick_interval());
    let game = Rc::new(RefCell::new(Game::with_defaults(settings, scheduler.handle())));
    let g = game.clone();
    scheduler.on_tick(move || g.borrow_mut().update());
    (scheduler, game)
}

/// Pump the scheduler one interval at a time until the screen leaves Playing
fn run_until_not_playing(scheduler: &mut Scheduler, game: &Rc<RefCell<Game>>, max_steps: usize) {
    for _ in 0..max_steps {
        if game.borrow().kind() != ScreenKind::Playing {
            return;
        }
        scheduler.advance(STEP);
    }
    panic!("still playing after {} steps", max_steps);
}

fn flat_session(finish: Option<Rect>) -> Session {
    let mut level = Level::new(3200.0);
    if let Some(finish) = finish {
        level.finish = finish;
    }
    Session::new(1, level)
}

#[test]
fn scheduler_runs_only_while_playing() {
    let (mut scheduler, game) = wired(Settings::default());
    assert_eq!(scheduler.advance(STEP * 3), 0);

    game.borrow_mut().handle_key(Key::Enter, true);
    assert!(scheduler.is_running());
    assert_eq!(scheduler.advance(STEP * 3), 3);

    game.borrow_mut().handle_key(Key::P, true);
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.advance(STEP * 3), 0);

    game.borrow_mut().handle_key(Key::P, true);
    assert!(scheduler.is_running());
    assert_eq!(scheduler.advance(STEP), 1);
    assert_eq!(scheduler.ticks(), 4);
}

#[test]
fn player_settles_on_start_platform() {
    let (mut scheduler, game) = wired(Settings::default());
    game.borrow_mut().handle_key(Key::Enter, true);
    scheduler.advance(STEP * 4);

    let g = game.borrow();
    let snap = g.snapshot().expect("playing");
    assert_eq!(snap.player.feet_y(), START_PLATFORM_Y);
    assert!(snap.player.is_grounded());
    assert_eq!(snap.camera_x, 0.0);
}

#[test]
fn walking_off_the_start_platform_ends_the_run() {
    let (mut scheduler, game) = wired(Settings::default());
    game.borrow_mut()
        .change_state(Screen::Playing(Box::new(flat_session(Some(Rect::new(3175.0, 450.0, 25.0, 50.0))))));
    game.borrow_mut().handle_key(Key::Right, true);

    run_until_not_playing(&mut scheduler, &game, 1000);

    let mut g = game.borrow_mut();
    assert!(matches!(
        g.screen(),
        Screen::GameOver {
            level: 1,
            cause: Some(DeathCause::Fell)
        }
    ));
    assert!(!scheduler.is_running());
    assert!(g.drain_events().contains(&GameEvent::Died(DeathCause::Fell)));
}

#[test]
fn next_after_finish_unlocks_and_advances() {
    let (mut scheduler, game) = wired(Settings::default());
    // Level::new places the finish on the start platform's right edge
    game.borrow_mut().change_state(Screen::Playing(Box::new(flat_session(None))));
    game.borrow_mut().handle_key(Key::Right, true);

    run_until_not_playing(&mut scheduler, &game, 1000);

    {
        let mut g = game.borrow_mut();
        assert!(matches!(g.screen(), Screen::LevelCompleted { level: 1 }));
        assert!(!g.catalog().is_stored_unlocked(2));
        let events = g.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::LevelCompleted(1)).count(), 1);
    }
    assert!(!scheduler.is_running());

    game.borrow_mut().handle_key(Key::N, true);
    assert!(scheduler.is_running());
    let mut g = game.borrow_mut();
    assert_eq!(g.kind(), ScreenKind::Playing);
    assert_eq!(g.snapshot().map(|s| s.level_number), Some(2));
    assert_eq!(g.catalog().current_number(), 2);
    assert!(g.catalog().is_stored_unlocked(2));
    assert!(g.drain_events().contains(&GameEvent::LevelUnlocked(2)));
}

#[test]
fn locked_levels_need_developer_mode() {
    let (_scheduler, game) = wired(Settings::default());
    let mut g = game.borrow_mut();

    g.handle_key(Key::L, true);
    g.handle_key(Key::Num(3), true);
    assert_eq!(g.kind(), ScreenKind::LevelSelect);

    g.handle_key(Key::Escape, true);
    g.handle_key(Key::S, true);
    g.handle_key(Key::D, true);
    assert!(g.settings().developer_mode);
    g.handle_key(Key::Escape, true);

    g.handle_key(Key::L, true);
    g.handle_key(Key::Num(3), true);
    assert_eq!(g.kind(), ScreenKind::Playing);
    assert_eq!(g.snapshot().map(|s| s.level_number), Some(3));

    g.handle_key(Key::Escape, true);
    g.handle_key(Key::S, true);
    g.handle_key(Key::D, true);
    assert!(!g.catalog().is_level_unlocked(3));
    assert!(!g.catalog().is_stored_unlocked(3));
}

#[test]
fn retry_rebuilds_the_same_layout() {
    let (mut scheduler, game) = wired(Settings::default());
    game.borrow_mut().handle_key(Key::Enter, true);
    let first: Vec<Rect> = game.borrow().snapshot().expect("playing").level.platforms.clone();

    // Stand still on the start platform, then force a game over and retry
    scheduler.advance(STEP * 3);
    game.borrow_mut().game_over();
    assert_eq!(game.borrow().kind(), ScreenKind::GameOver);
    game.borrow_mut().handle_key(Key::R, true);

    let g = game.borrow();
    let snap = g.snapshot().expect("playing again");
    assert_eq!(snap.level.platforms, first);
    assert_eq!(snap.player.pos.x, PLAYER_START_X);
}

#[test]
fn same_seed_same_level_across_games() {
    let settings = Settings {
        seed: 99,
        ..Settings::default()
    };
    let (_a_sched, a) = wired(settings.clone());
    let (_b_sched, b) = wired(settings);
    a.borrow_mut().handle_key(Key::Enter, true);
    b.borrow_mut().handle_key(Key::Enter, true);

    let a = a.borrow();
    let b = b.borrow();
    assert_eq!(
        a.snapshot().map(|s| s.level.platforms.clone()),
        b.snapshot().map(|s| s.level.platforms.clone())
    );
}
