//! Presentation collaborator.
//!
//! Sprites, animators, tracers and UI panels live outside the simulation.
//! The simulation pushes state changes through `Presentation` and never reads
//! anything back.

use glam::Vec2;

use outpost_core::enums::BaseTint;
use outpost_core::events::PresentationEvent;

pub trait Presentation {
    fn player_animation(&mut self, direction: Option<Vec2>, flip_x: Option<bool>, moving: bool);
    fn attack_trigger(&mut self);
    fn tracer(&mut self, from: Vec2, to: Vec2);
    fn explosion(&mut self, at: Vec2);
    fn health_text(&mut self, value: i32);
    fn health_panel(&mut self, visible: bool);
    fn game_over_panel(&mut self, visible: bool, title: Option<&str>);
    fn base_tint(&mut self, tint: BaseTint);
}

/// Headless presentation that records every push as a `PresentationEvent`.
#[derive(Debug, Default)]
pub struct PresentationLog {
    events: Vec<PresentationEvent>,
}

impl PresentationLog {
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Take the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Presentation for PresentationLog {
    fn player_animation(&mut self, direction: Option<Vec2>, flip_x: Option<bool>, moving: bool) {
        self.events.push(PresentationEvent::PlayerAnimation {
            direction,
            flip_x,
            moving,
        });
    }

    fn attack_trigger(&mut self) {
        self.events.push(PresentationEvent::AttackTrigger);
    }

    fn tracer(&mut self, from: Vec2, to: Vec2) {
        self.events.push(PresentationEvent::Tracer { from, to });
    }

    fn explosion(&mut self, at: Vec2) {
        self.events.push(PresentationEvent::Explosion { at });
    }

    fn health_text(&mut self, value: i32) {
        self.events.push(PresentationEvent::HealthText { value });
    }

    fn health_panel(&mut self, visible: bool) {
        self.events.push(PresentationEvent::HealthPanel { visible });
    }

    fn game_over_panel(&mut self, visible: bool, title: Option<&str>) {
        self.events.push(PresentationEvent::GameOverPanel {
            visible,
            title: title.map(str::to_string),
        });
    }

    fn base_tint(&mut self, tint: BaseTint) {
        self.events.push(PresentationEvent::BaseTint { tint });
    }
}
