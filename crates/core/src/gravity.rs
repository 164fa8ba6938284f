//! Gravity timer for the external scheduler.
//!
//! The front-end feeds elapsed frame time in; the timer says when a gravity
//! step is due. It follows the engine's run state and is stopped the moment
//! the session leaves `Running`, so a stray tick can never reach a finished
//! board.

use crate::scoring::gravity_interval_ms;
use crate::types::RunState;

#[derive(Debug, Clone, Default)]
pub struct GravityTimer {
    elapsed_ms: u32,
    running: bool,
}

impl GravityTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
        self.elapsed_ms = 0;
    }

    /// Stop and discard accumulated time.
    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed_ms = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Start or stop to match the engine's run state.
    pub fn follow(&mut self, state: RunState) {
        match (state == RunState::Running, self.running) {
            (true, false) => self.start(),
            (false, true) => self.stop(),
            _ => {}
        }
    }

    /// Accumulate `elapsed_ms`; returns true when a gravity step is due.
    ///
    /// At most one step is reported per call, and the remainder is dropped,
    /// matching a fixed-interval timer that fires once per period.
    pub fn advance(&mut self, elapsed_ms: u32, score: u32) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        if self.elapsed_ms >= gravity_interval_ms(score) {
            self.elapsed_ms = 0;
            return true;
        }
        false
    }
}
