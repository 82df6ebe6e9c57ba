//! Core gallery logic – track layout, damped motion, and the
//! walk/approach/inspect state machine.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared across async tasks.

pub mod camera;
pub mod gallery;
pub mod motion;
pub mod scroll;
pub mod transition;
