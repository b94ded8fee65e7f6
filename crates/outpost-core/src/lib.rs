//! Core types and definitions for the Outpost simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! identifiers, commands, events, configuration, errors, state snapshots
//! and tuning constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
