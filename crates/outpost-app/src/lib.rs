//! Outpost headless runner.
//!
//! Drives the simulation engine on its own thread at real-time pace and
//! exposes a small command/poll surface to the host.

pub mod game_loop;
pub mod state;

pub use outpost_core as core;
