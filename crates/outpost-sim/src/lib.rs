//! Simulation engine for Outpost.
//!
//! Owns the pooled enemy world, the player and the match state machine, runs
//! them on a fixed physics clock and a variable frame clock, and produces
//! GameStateSnapshots for the host.

pub mod audio;
pub mod coordinator;
pub mod enemy;
pub mod engine;
pub mod input;
pub mod player;
pub mod pool;
pub mod presentation;
pub mod services;
pub mod spawner;
pub mod systems;
pub mod targeting;
pub mod tasks;

pub use engine::{SimConfig, SimulationEngine};
pub use outpost_core as core;
