//! Audio collaborator.
//!
//! The simulation only knows sounds by symbolic name. `AudioService` is the
//! narrow contract it calls; `SoundBank` is the headless implementation that
//! tracks playback state and records what happened for the frontend.
//! An unknown name is a warning and a no-op, never an error.

use std::collections::HashMap;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::warn;

use outpost_core::config::{AudioConfig, SoundConfig};
use outpost_core::enums::PlaybackState;
use outpost_core::events::AudioEvent;

pub trait AudioService {
    fn play(&mut self, sound: &str, randomize_pitch: bool);
    fn stop(&mut self, sound: &str);
    fn pause(&mut self, sound: &str);
    fn silence(&mut self, silenced: bool);
}

#[derive(Debug, Clone)]
struct Sound {
    config: SoundConfig,
    /// Pitch of the most recent playback.
    pitch: f32,
    state: PlaybackState,
}

pub struct SoundBank {
    sounds: HashMap<String, Sound>,
    silenced: bool,
    rng: ChaCha8Rng,
    events: Vec<AudioEvent>,
}

impl SoundBank {
    pub fn new(config: &AudioConfig, rng: ChaCha8Rng) -> Self {
        let sounds = config
            .sounds
            .iter()
            .map(|s| {
                (
                    s.name.clone(),
                    Sound {
                        config: s.clone(),
                        pitch: s.pitch,
                        state: PlaybackState::Stopped,
                    },
                )
            })
            .collect();
        Self {
            sounds,
            silenced: false,
            rng,
            events: Vec::new(),
        }
    }

    pub fn state(&self, sound: &str) -> Option<PlaybackState> {
        self.sounds.get(sound).map(|s| s.state)
    }

    pub fn is_silenced(&self) -> bool {
        self.silenced
    }

    /// Stop every sound in the bank.
    pub fn stop_all(&mut self) {
        let mut names: Vec<&String> = self.sounds.keys().collect();
        names.sort();
        for name in names {
            self.events.push(AudioEvent::Stopped {
                sound: name.clone(),
            });
        }
        for sound in self.sounds.values_mut() {
            sound.state = PlaybackState::Stopped;
        }
    }

    /// Take the events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.events)
    }

    fn find(&mut self, name: &str) -> Option<&mut Sound> {
        let sound = self.sounds.get_mut(name);
        if sound.is_none() {
            warn!(sound = name, "sound not found");
        }
        sound
    }
}

impl AudioService for SoundBank {
    fn play(&mut self, name: &str, randomize_pitch: bool) {
        let variation = match self.sounds.get(name) {
            Some(sound) if randomize_pitch => sound.config.pitch_variation,
            _ => 0.0,
        };
        let jitter = if variation > 0.0 {
            self.rng.gen_range(-variation..=variation)
        } else {
            0.0
        };
        let Some(sound) = self.find(name) else {
            return;
        };
        if randomize_pitch {
            sound.pitch = sound.config.pitch + jitter;
        }
        // One-shot sounds finish on their own; only looped ones stay Playing.
        sound.state = if sound.config.looped {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        };
        let event = AudioEvent::Played {
            sound: name.to_string(),
            pitch: sound.pitch,
            volume: sound.config.volume,
        };
        self.events.push(event);
    }

    fn stop(&mut self, name: &str) {
        let Some(sound) = self.find(name) else {
            return;
        };
        sound.state = PlaybackState::Stopped;
        self.events.push(AudioEvent::Stopped {
            sound: name.to_string(),
        });
    }

    fn pause(&mut self, name: &str) {
        let Some(sound) = self.find(name) else {
            return;
        };
        if sound.state == PlaybackState::Playing {
            sound.state = PlaybackState::Paused;
        }
        self.events.push(AudioEvent::Paused {
            sound: name.to_string(),
        });
    }

    fn silence(&mut self, silenced: bool) {
        if self.silenced != silenced {
            self.silenced = silenced;
            self.events.push(AudioEvent::Silenced { silenced });
        }
    }
}

/// Records every call verbatim. Used by component tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct AudioLog {
    pub played: Vec<String>,
    pub stopped: Vec<String>,
    pub paused: Vec<String>,
    pub silenced: Option<bool>,
}

#[cfg(test)]
impl AudioService for AudioLog {
    fn play(&mut self, sound: &str, _randomize_pitch: bool) {
        self.played.push(sound.to_string());
    }

    fn stop(&mut self, sound: &str) {
        self.stopped.push(sound.to_string());
    }

    fn pause(&mut self, sound: &str) {
        self.paused.push(sound.to_string());
    }

    fn silence(&mut self, silenced: bool) {
        self.silenced = Some(silenced);
    }
}
