//! Screen state machine
//!
//! Exactly one `Screen` is active. Every operation (update, key, click,
//! enter, exit, resize, render) is a `match` over the active variant.
//! Transitions always run `on_exit` for the old screen, swap, then `on_enter`
//! for the new one.

use std::mem;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::catalog::{LevelCatalog, LevelDescriptor};
use crate::scheduler::SchedulerHandle;
use crate::settings::Settings;
use crate::sim::{DeathCause, GameEvent, Level, Player, Session, TickOutcome, generate_level, tick};
use crate::{Viewport, level_seed};

/// Enumerated key codes the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    Enter,
    Escape,
    P,
    R,
    N,
    M,
    L,
    S,
    D,
    H,
    /// Number row, used for level selection
    Num(u8),
}

/// A request coming from a key press or a button click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    OpenLevels,
    OpenSettings,
    OpenRules,
    Menu,
    Pause,
    Resume,
    Retry,
    NextLevel,
    SelectLevel(u32),
    ToggleSound,
    ToggleDeveloperMode,
}

/// The active screen and the data it owns
#[derive(Debug)]
pub enum Screen {
    MainMenu,
    Playing(Box<Session>),
    /// Holds the screen it paused so it can be drawn underneath and resumed as-is
    Paused {
        previous: Box<Screen>,
    },
    GameOver {
        level: u32,
        cause: Option<DeathCause>,
    },
    LevelCompleted {
        level: u32,
    },
    FinalVictory,
    Settings,
    Rules,
    LevelSelect,
}

/// Payload-free tag of a `Screen`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    MainMenu,
    Playing,
    Paused,
    GameOver,
    LevelCompleted,
    FinalVictory,
    Settings,
    Rules,
    LevelSelect,
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::MainMenu => ScreenKind::MainMenu,
            Screen::Playing(_) => ScreenKind::Playing,
            Screen::Paused { .. } => ScreenKind::Paused,
            Screen::GameOver { .. } => ScreenKind::GameOver,
            Screen::LevelCompleted { .. } => ScreenKind::LevelCompleted,
            Screen::FinalVictory => ScreenKind::FinalVictory,
            Screen::Settings => ScreenKind::Settings,
            Screen::Rules => ScreenKind::Rules,
            Screen::LevelSelect => ScreenKind::LevelSelect,
        }
    }

    /// The live session, looking through pause overlays
    pub fn session(&self) -> Option<&Session> {
        match self {
            Screen::Playing(session) => Some(&**session),
            Screen::Paused { previous } => previous.session(),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            Screen::Playing(session) => Some(&mut **session),
            Screen::Paused { previous } => previous.session_mut(),
            _ => None,
        }
    }
}

/// Maps a click to an action; button layout is computed by the presentation layer
pub trait ButtonLayout {
    fn action_at(&self, screen: ScreenKind, point: Vec2) -> Option<Action>;
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub level_number: u32,
    pub player: &'a Player,
    pub level: &'a Level,
    pub camera_x: f32,
    pub progress: f32,
}

/// Per-level row on the level select screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelEntry {
    pub number: u32,
    pub unlocked: bool,
}

/// Everything the presentation layer needs to draw one frame
#[derive(Debug)]
pub enum Frame<'a> {
    MainMenu,
    Playing(Snapshot<'a>),
    Paused { underneath: Box<Frame<'a>> },
    GameOver { level: u32, cause: Option<DeathCause> },
    LevelCompleted { level: u32, has_next: bool },
    FinalVictory,
    Settings(&'a Settings),
    Rules,
    LevelSelect { levels: Vec<LevelEntry>, total_progress: f32 },
}

/// Drawing surface supplied by the presentation layer
pub trait Surface {
    fn present(&mut self, frame: &Frame<'_>);
}

/// Key binding table for screens that react to discrete presses
fn key_action(screen: ScreenKind, key: Key) -> Option<Action> {
    use Key::*;
    match (screen, key) {
        (ScreenKind::MainMenu, Enter | Space) => Some(Action::Start),
        (ScreenKind::MainMenu, L) => Some(Action::OpenLevels),
        (ScreenKind::MainMenu, S) => Some(Action::OpenSettings),
        (ScreenKind::MainMenu, H) => Some(Action::OpenRules),

        (ScreenKind::LevelSelect, Num(n)) => Some(Action::SelectLevel(n as u32)),
        (ScreenKind::Settings, S) => Some(Action::ToggleSound),
        (ScreenKind::Settings, D) => Some(Action::ToggleDeveloperMode),
        (ScreenKind::Rules, Enter) => Some(Action::Menu),

        (ScreenKind::Playing, Escape) => Some(Action::Menu),
        (ScreenKind::Playing, P) => Some(Action::Pause),

        (ScreenKind::Paused, P | Enter) => Some(Action::Resume),

        (ScreenKind::GameOver, R | Enter) => Some(Action::Retry),

        (ScreenKind::LevelCompleted, R) => Some(Action::Retry),
        (ScreenKind::LevelCompleted, N | Enter) => Some(Action::NextLevel),

        (ScreenKind::FinalVictory, Enter) => Some(Action::Menu),

        (ScreenKind::MainMenu | ScreenKind::Playing, _) => None,
        (_, Escape | M) => Some(Action::Menu),
        _ => None,
    }
}

/// The game: active screen, session context and level catalog
pub struct Game {
    screen: Screen,
    settings: Settings,
    catalog: LevelCatalog,
    scheduler: SchedulerHandle,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings, catalog: LevelCatalog, scheduler: SchedulerHandle) -> Self {
        let mut catalog = catalog;
        catalog.set_developer_mode(settings.developer_mode);
        log::info!(
            "Game created: {} levels, seed {}, developer mode {}",
            catalog.len(),
            settings.seed,
            settings.developer_mode
        );
        Self {
            screen: Screen::MainMenu,
            settings,
            catalog,
            scheduler,
            events: Vec::new(),
        }
    }

    /// Game with the built-in level catalog
    pub fn with_defaults(settings: Settings, scheduler: SchedulerHandle) -> Self {
        let catalog = LevelCatalog::with_defaults(&settings);
        Self::new(settings, catalog, scheduler)
    }

    // === Queries ===

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn viewport(&self) -> Viewport {
        self.settings.viewport
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Read-only geometry of the current session (also while paused)
    pub fn snapshot(&self) -> Option<Snapshot<'_>> {
        let session = self.screen.session()?;
        Some(Snapshot {
            level_number: session.level_number,
            player: &session.player,
            level: &session.level,
            camera_x: session.level.camera_x(),
            progress: session.progress(self.settings.viewport.width),
        })
    }

    // === Transitions ===

    /// Exit the current screen, swap in the one built from it, enter the new one
    fn transition_with<F>(&mut self, build: F)
    where
        F: FnOnce(Screen) -> Screen,
    {
        self.on_exit();
        let current = mem::replace(&mut self.screen, Screen::MainMenu);
        let from = current.kind();
        self.screen = build(current);
        log::info!("Screen {:?} -> {:?}", from, self.screen.kind());
        self.on_enter();
    }

    pub fn transition(&mut self, next: Screen) {
        self.transition_with(|_| next);
    }

    /// Public alias of `transition`
    pub fn change_state(&mut self, next: Screen) {
        self.transition(next);
    }

    fn on_enter(&mut self) {
        match &self.screen {
            Screen::Playing(_) => self.scheduler.start(),
            Screen::FinalVictory => self.events.push(GameEvent::Victory),
            Screen::MainMenu
            | Screen::Paused { .. }
            | Screen::GameOver { .. }
            | Screen::LevelCompleted { .. }
            | Screen::Settings
            | Screen::Rules
            | Screen::LevelSelect => {}
        }
    }

    fn on_exit(&mut self) {
        match &self.screen {
            Screen::Playing(_) => self.scheduler.stop(),
            Screen::MainMenu
            | Screen::Paused { .. }
            | Screen::GameOver { .. }
            | Screen::LevelCompleted { .. }
            | Screen::FinalVictory
            | Screen::Settings
            | Screen::Rules
            | Screen::LevelSelect => {}
        }
    }

    /// Build a fresh Player + Level for `desc` and start playing it
    pub fn start_new_game(&mut self, desc: &LevelDescriptor) {
        // Direct starts run locked levels too; the selection follows the level being played
        if !self.catalog.focus(desc.number) {
            log::debug!("Level {} is not in the catalog", desc.number);
        }
        let mut rng = Pcg32::seed_from_u64(level_seed(self.settings.seed, desc.number));
        let level = generate_level(desc, self.settings.viewport, &mut rng);
        let session = Session::new(desc.number, level);
        self.transition(Screen::Playing(Box::new(session)));
    }

    /// Start level `number` if the catalog allows it
    pub fn start_level(&mut self, number: u32) -> bool {
        if !self.catalog.select_level(number) {
            return false;
        }
        match self.catalog.current().cloned() {
            Some(desc) => {
                self.start_new_game(&desc);
                true
            }
            None => false,
        }
    }

    /// Replay a level the player has already reached
    fn restart_level(&mut self, number: u32) -> bool {
        match self.catalog.get(number).cloned() {
            Some(desc) => {
                self.start_new_game(&desc);
                true
            }
            None => false,
        }
    }

    /// End the current run
    pub fn game_over(&mut self) {
        self.end_run(None);
    }

    fn end_run(&mut self, cause: Option<DeathCause>) {
        let level = self
            .screen
            .session()
            .map(|s| s.level_number)
            .unwrap_or_else(|| self.catalog.current_number());
        log::info!("Level {} over: {:?}", level, cause);
        self.transition(Screen::GameOver { level, cause });
    }

    fn complete_level(&mut self, level: u32) {
        if self.catalog.next_after(level).is_some() {
            log::info!("Level {} completed", level);
            self.transition(Screen::LevelCompleted { level });
        } else {
            log::info!("Final level {} completed", level);
            self.transition(Screen::FinalVictory);
        }
    }

    /// Unlock the level after `level` and start it
    fn next_level(&mut self, level: u32) -> bool {
        if let Some(number) = self.catalog.unlock_after(level) {
            self.events.push(GameEvent::LevelUnlocked(number));
        }
        match self.catalog.next_after(level).cloned() {
            Some(desc) => {
                self.start_new_game(&desc);
                true
            }
            None => false,
        }
    }

    // === Per-tick update ===

    /// Tick handler: advances the session while Playing, no-op elsewhere
    pub fn update(&mut self) {
        let outcome = match &mut self.screen {
            Screen::Playing(session) => {
                let outcome = tick(session, self.settings.viewport, &mut self.events);
                (outcome, session.level_number)
            }
            Screen::MainMenu
            | Screen::Paused { .. }
            | Screen::GameOver { .. }
            | Screen::LevelCompleted { .. }
            | Screen::FinalVictory
            | Screen::Settings
            | Screen::Rules
            | Screen::LevelSelect => return,
        };

        match outcome {
            (TickOutcome::Continue, _) => {}
            (TickOutcome::Died(cause), _) => self.end_run(Some(cause)),
            (TickOutcome::Completed, level) => self.complete_level(level),
        }
    }

    // === Input ===

    /// Key press (`pressed = true`) or release
    pub fn handle_key(&mut self, key: Key, pressed: bool) {
        match &mut self.screen {
            Screen::Playing(session) => {
                let player = &mut session.player;
                match key {
                    Key::Left => player.moving_left = pressed,
                    Key::Right => player.moving_right = pressed,
                    Key::Up | Key::Space => {
                        if pressed && player.jump() {
                            self.events.push(GameEvent::Jumped);
                        }
                    }
                    _ if pressed => {
                        if let Some(action) = key_action(ScreenKind::Playing, key) {
                            self.apply(action);
                        }
                    }
                    _ => {}
                }
            }
            Screen::Paused { previous } => {
                // Releases still reach the paused player so it does not resume running
                if !pressed {
                    if let Some(session) = previous.session_mut() {
                        match key {
                            Key::Left => session.player.moving_left = false,
                            Key::Right => session.player.moving_right = false,
                            _ => {}
                        }
                    }
                } else if let Some(action) = key_action(ScreenKind::Paused, key) {
                    self.apply(action);
                }
            }
            screen => {
                if !pressed {
                    return;
                }
                if let Some(action) = key_action(screen.kind(), key) {
                    self.apply(action);
                }
            }
        }
    }

    /// Mouse click at `point`, resolved through the presentation's button layout
    pub fn handle_click<L>(&mut self, point: Vec2, layout: &L) -> bool
    where
        L: ButtonLayout + ?Sized,
    {
        match layout.action_at(self.kind(), point) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Perform `action` on the active screen; returns false when it does not apply
    pub fn apply(&mut self, action: Action) -> bool {
        match (&self.screen, action) {
            (Screen::MainMenu, Action::Start) => {
                let number = self.catalog.current_number();
                self.start_level(number)
            }
            (Screen::MainMenu, Action::OpenLevels) => self.go(Screen::LevelSelect),
            (Screen::MainMenu, Action::OpenSettings) => self.go(Screen::Settings),
            (Screen::MainMenu, Action::OpenRules) => self.go(Screen::Rules),

            (Screen::LevelSelect, Action::SelectLevel(n)) => self.start_level(n),

            (Screen::Settings, Action::ToggleSound) => {
                let on = self.settings.toggle_sound();
                log::info!("Sound {}", if on { "on" } else { "off" });
                true
            }
            (Screen::Settings, Action::ToggleDeveloperMode) => {
                let on = self.settings.toggle_developer_mode();
                self.catalog.set_developer_mode(on);
                log::info!("Developer mode {}", if on { "on" } else { "off" });
                true
            }

            (Screen::Playing(_), Action::Pause) => {
                self.transition_with(|current| Screen::Paused {
                    previous: Box::new(current),
                });
                true
            }

            (Screen::Paused { .. }, Action::Resume) => {
                self.transition_with(|current| match current {
                    Screen::Paused { previous } => *previous,
                    other => other,
                });
                true
            }

            (&Screen::GameOver { level, .. }, Action::Retry)
            | (&Screen::LevelCompleted { level }, Action::Retry) => self.restart_level(level),
            (&Screen::LevelCompleted { level }, Action::NextLevel) => self.next_level(level),

            (Screen::MainMenu, Action::Menu) => false,
            (_, Action::Menu) => self.go(Screen::MainMenu),

            (screen, action) => {
                log::debug!("Ignoring {:?} on {:?}", action, screen.kind());
                false
            }
        }
    }

    fn go(&mut self, next: Screen) -> bool {
        self.transition(next);
        true
    }

    // === Presentation hooks ===

    /// Screen size changed
    pub fn resize(&mut self, width: f32, height: f32) {
        self.settings.viewport = Viewport::new(width, height);
        log::debug!("Resized to {}x{}", width, height);
        let viewport = self.settings.viewport;
        match &mut self.screen {
            Screen::Playing(session) => {
                let x = session.player.pos.x;
                session.level.update_camera(x, viewport.width);
            }
            Screen::MainMenu
            | Screen::Paused { .. }
            | Screen::GameOver { .. }
            | Screen::LevelCompleted { .. }
            | Screen::FinalVictory
            | Screen::Settings
            | Screen::Rules
            | Screen::LevelSelect => {}
        }
    }

    /// View of the active screen for the presentation layer
    pub fn frame(&self) -> Frame<'_> {
        self.frame_for(&self.screen)
    }

    fn frame_for<'a>(&'a self, screen: &'a Screen) -> Frame<'a> {
        match screen {
            Screen::MainMenu => Frame::MainMenu,
            Screen::Playing(session) => Frame::Playing(Snapshot {
                level_number: session.level_number,
                player: &session.player,
                level: &session.level,
                camera_x: session.level.camera_x(),
                progress: session.progress(self.settings.viewport.width),
            }),
            Screen::Paused { previous } => Frame::Paused {
                underneath: Box::new(self.frame_for(previous)),
            },
            Screen::GameOver { level, cause } => Frame::GameOver {
                level: *level,
                cause: *cause,
            },
            Screen::LevelCompleted { level } => Frame::LevelCompleted {
                level: *level,
                has_next: self.catalog.next_after(*level).is_some(),
            },
            Screen::FinalVictory => Frame::FinalVictory,
            Screen::Settings => Frame::Settings(&self.settings),
            Screen::Rules => Frame::Rules,
            Screen::LevelSelect => Frame::LevelSelect {
                levels: self
                    .catalog
                    .levels()
                    .iter()
                    .map(|l| LevelEntry {
                        number: l.number,
                        unlocked: self.catalog.is_level_unlocked(l.number),
                    })
                    .collect(),
                total_progress: self.catalog.total_progress(),
            },
        }
    }

    pub fn render<S>(&self, surface: &mut S)
    where
        S: Surface + ?Sized,
    {
        surface.present(&self.frame());
    }
}
