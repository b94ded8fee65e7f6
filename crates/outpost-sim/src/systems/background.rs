//! Endless vertical background scroll.
//!
//! Moves down at a constant speed and wraps back to the upper bound once it
//! passes the lower one.

use outpost_core::config::BackgroundConfig;

#[derive(Debug, Clone)]
pub struct Background {
    config: BackgroundConfig,
    y: f32,
}

impl Background {
    pub fn new(config: BackgroundConfig) -> Self {
        Self {
            y: config.upper_bound,
            config,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn update(&mut self, dt: f32) {
        self.y -= self.config.speed * dt;
        if self.y <= self.config.lower_bound {
            self.y = self.config.upper_bound;
        }
    }
}
