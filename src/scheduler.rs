//! Fixed-interval tick scheduler
//!
//! The scheduler never owns a thread. The host pumps it with elapsed wall
//! time and it fires its single `on_tick` callback once per elapsed interval
//! while running. Callbacks run synchronously, so one tick always finishes
//! before the next begins.
//!
//! The game only needs to start and stop ticking, so it holds a cheap
//! [`SchedulerHandle`] sharing the running flag rather than the scheduler
//! itself; the callback is then free to capture the game.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::consts::{MAX_CATCHUP_TICKS, TICK_INTERVAL_MS};

/// Start/stop control shared between the scheduler and the game
#[derive(Debug, Clone, Default)]
pub struct SchedulerHandle {
    running: Rc<Cell<bool>>,
}

impl SchedulerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        if !self.running.replace(true) {
            log::debug!("Scheduler started");
        }
    }

    pub fn stop(&self) {
        if self.running.replace(false) {
            log::debug!("Scheduler stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

type TickCallback = Box<dyn FnMut()>;

/// Fixed-interval driver with a single tick callback
pub struct Scheduler {
    interval: Duration,
    handle: SchedulerHandle,
    accumulator: Duration,
    on_tick: Option<TickCallback>,
    ticks: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_INTERVAL_MS))
    }
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            handle: SchedulerHandle::new(),
            accumulator: Duration::ZERO,
            on_tick: None,
            ticks: 0,
        }
    }

    /// Handle for starting and stopping from inside the game
    pub fn handle(&self) -> SchedulerHandle {
        self.handle.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks delivered so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn start(&mut self) {
        self.handle.start();
    }

    pub fn stop(&mut self) {
        self.handle.stop();
        self.accumulator = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Register the tick callback, replacing any previous one
    pub fn on_tick<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        if self.on_tick.is_some() {
            log::debug!("Replacing tick callback");
        }
        self.on_tick = Some(Box::new(callback));
    }

    /// Feed elapsed wall time and deliver any due ticks; returns how many fired
    ///
    /// At most `MAX_CATCHUP_TICKS` fire per call. A callback that stops the
    /// scheduler ends the batch immediately and drops the remaining backlog.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.is_running() {
            self.accumulator = Duration::ZERO;
            return 0;
        }

        self.accumulator += elapsed.min(self.interval * MAX_CATCHUP_TICKS);

        let mut fired = 0;
        while self.accumulator >= self.interval && fired < MAX_CATCHUP_TICKS {
            self.accumulator -= self.interval;
            if let Some(callback) = self.on_tick.as_mut() {
                callback();
            }
            fired += 1;
            self.ticks += 1;

            if !self.is_running() {
                self.accumulator = Duration::ZERO;
                break;
            }
        }
        fired
    }
}
