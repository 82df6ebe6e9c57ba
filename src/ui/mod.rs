//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No state mutation happens here; geometry helpers are pure
//! so the input handler can reuse them for hit-testing.

pub mod layout;
pub mod lightbox;
pub mod overlay;
pub mod theme;
pub mod track;
