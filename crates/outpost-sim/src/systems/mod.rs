//! Systems that run over the pooled enemy world each step.
//!
//! Systems are plain functions over `&mut World` (or read-only views of the pool).
//! They do not own match state; the coordinator does.

pub mod background;
pub mod finish_line;
pub mod movement;
pub mod snapshot;
