//! Collaborator handles passed explicitly into every component that needs them.

use crate::audio::AudioService;
use crate::presentation::Presentation;

pub struct Services<'a> {
    pub audio: &'a mut dyn AudioService,
    pub presentation: &'a mut dyn Presentation,
}

impl<'a> Services<'a> {
    pub fn new(audio: &'a mut dyn AudioService, presentation: &'a mut dyn Presentation) -> Self {
        Self {
            audio,
            presentation,
        }
    }
}
