//! Cancellable scheduled tasks driven by the frame clock.
//!
//! Every delayed or repeating behavior in the simulation (spawn delay, shot
//! cooldown, damage flash, per-frame loops) is one of these handles, owned by
//! the component it belongs to. Cancelling one handle never affects another.

/// One-shot delay. Fires once when its time has elapsed, then goes idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timer {
    remaining_secs: Option<f32>,
}

impl Timer {
    /// A timer that is already pending.
    pub fn started(secs: f32) -> Self {
        Self {
            remaining_secs: Some(secs.max(0.0)),
        }
    }

    /// Start (or restart) the delay.
    pub fn start(&mut self, secs: f32) {
        self.remaining_secs = Some(secs.max(0.0));
    }

    /// Cancel if pending. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.remaining_secs.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.remaining_secs.is_some()
    }

    pub fn remaining_secs(&self) -> Option<f32> {
        self.remaining_secs
    }

    /// Advance by `dt`. Returns true exactly once, on the frame the delay elapses.
    pub fn tick(&mut self, dt: f32) -> bool {
        match self.remaining_secs.as_mut() {
            Some(remaining) => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.remaining_secs = None;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }
}

/// A loop that runs its body once per frame until cancelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameLoop {
    running: bool,
}

impl FrameLoop {
    /// Start the loop. Returns false if it was already running.
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.running, true)
    }

    /// Cancel the loop. Returns false if it was not running.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
