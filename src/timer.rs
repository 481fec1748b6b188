//! Elapsed-seconds counter driven by a host-side one-second ticker.
//!
//! The timer never spawns anything itself. Each `start` hands out a fresh
//! [`TickerId`]; the host forwards its periodic callback to [`Timer::tick`] with that
//! id. Stopping, restarting or resetting invalidates the id, so ticks still in
//! flight from an old ticker are dropped instead of advancing a newer game.

use std::fmt;

/// Identifies one logical ticker. Only the most recently issued id is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickerId(u64);

pub type TickListener = Box<dyn FnMut(u32)>;

#[derive(Default)]
pub struct Timer {
    elapsed: u32,
    active: Option<TickerId>,
    next_id: u64,
    listener: Option<TickListener>,
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("elapsed", &self.elapsed)
            .field("active", &self.active)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener(listener: impl FnMut(u32) + 'static) -> Self {
        Self {
            listener: Some(Box::new(listener)),
            ..Self::default()
        }
    }

    pub fn set_listener(&mut self, listener: impl FnMut(u32) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Cancel any running ticker, zero the count and begin a new ticker.
    pub fn start(&mut self) -> TickerId {
        self.stop();
        self.elapsed = 0;
        self.notify();
        self.issue()
    }

    /// Keep counting from `elapsed`. An already running ticker is kept.
    pub fn resume(&mut self, elapsed: u32) -> TickerId {
        self.elapsed = elapsed;
        self.notify();
        match self.active {
            Some(id) => id,
            None => self.issue(),
        }
    }

    /// Stop and show `elapsed` without counting further.
    pub fn restore(&mut self, elapsed: u32) {
        self.stop();
        self.elapsed = elapsed;
        self.notify();
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.active.take() {
            log::trace!("stopped ticker {id:?} at {}s", self.elapsed);
        }
    }

    pub fn reset(&mut self) {
        self.stop();
        self.elapsed = 0;
        self.notify();
    }

    /// Periodic callback. Returns false for ticks from a cancelled ticker.
    pub fn tick(&mut self, id: TickerId) -> bool {
        if self.active != Some(id) {
            log::trace!("dropping stale tick from {id:?}");
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        self.notify();
        true
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_ticker(&self) -> Option<TickerId> {
        self.active
    }

    fn issue(&mut self) -> TickerId {
        let id = TickerId(self.next_id);
        self.next_id += 1;
        self.active = Some(id);
        id
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(self.elapsed);
        }
    }
}
