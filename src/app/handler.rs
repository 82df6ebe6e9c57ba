//! Input handling — maps key/mouse events to state mutations.
//!
//! Selection, deselection and exits all funnel through the transition
//! controller; this module never touches the mode tag directly.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::ui::layout::AppLayout;
use crate::ui::lightbox::{next_index, prev_index};
use crate::ui::track::panel_geometry;

use super::state::{ActiveView, AppState};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Gallery => handle_gallery_key(state, key),
        ActiveView::Lightbox => handle_lightbox_key(state, key),
    }
}

// ── Gallery view (configurable bindings) ────────────────────────

fn handle_gallery_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };
    match action {
        Action::ScrollBack => {
            state.scroll.nudge(-state.config.scroll_step);
        }
        Action::ScrollForward => {
            state.scroll.nudge(state.config.scroll_step);
        }
        Action::SelectNearest => {
            if let Some(ix) = state.layout.nearest_interactive(state.smoothed.value()) {
                state.controller.select(
                    ix,
                    &state.layout,
                    &mut state.scroll,
                    &mut state.avatar,
                );
            }
        }
        Action::ExitInspect => {
            state
                .controller
                .exit_inspect(&mut state.scroll, &mut state.avatar);
        }
        Action::ViewWork => {
            if state.inspected_media_count() > 0 {
                state.media_index = 0;
                state.active_view = ActiveView::Lightbox;
            }
        }
        // Media navigation only means something inside the lightbox.
        Action::PrevMedia | Action::NextMedia => {}
        Action::Quit => state.should_quit = true,
    }
}

// ── Lightbox ────────────────────────────────────────────────────

fn handle_lightbox_key(state: &mut AppState, key: KeyEvent) {
    let count = state.inspected_media_count();
    match state.config.match_key(key) {
        Some(Action::PrevMedia) => state.media_index = prev_index(state.media_index, count),
        Some(Action::NextMedia) => state.media_index = next_index(state.media_index, count),
        Some(Action::ExitInspect | Action::ViewWork) => close_lightbox(state),
        Some(Action::Quit) => state.should_quit = true,
        _ => match key.code {
            // Arrow keys work even if rebound for scrolling.
            KeyCode::Left => state.media_index = prev_index(state.media_index, count),
            KeyCode::Right => state.media_index = next_index(state.media_index, count),
            _ => {}
        },
    }
}

fn close_lightbox(state: &mut AppState) {
    state.active_view = ActiveView::Gallery;
    state.media_index = 0;
}

// ── Mouse ───────────────────────────────────────────────────────

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view == ActiveView::Lightbox {
        handle_lightbox_mouse(state, mouse);
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll.nudge(-state.config.scroll_step),
        MouseEventKind::ScrollDown => state.scroll.nudge(state.config.scroll_step),
        MouseEventKind::Down(MouseButton::Left) => {
            let layout = AppLayout::from_area(
                state.terminal_area,
                state.controller.overlay().is_some(),
            );
            if !point_in_rect(layout.track_area, mouse.column, mouse.row) {
                return;
            }
            let hits = panel_geometry(
                layout.track_area,
                &state.layout,
                state.smoothed.value(),
                state.camera.zoom(),
            );
            // Panels can overlap at the strip edges; take the last drawn
            // (topmost) hit, matching the paint order.
            let clicked = hits
                .iter()
                .rev()
                .find(|h| point_in_rect(h.rect, mouse.column, mouse.row));
            if let Some(hit) = clicked {
                state.controller.select(
                    hit.artwork,
                    &state.layout,
                    &mut state.scroll,
                    &mut state.avatar,
                );
            }
        }
        _ => {}
    }
}

fn handle_lightbox_mouse(state: &mut AppState, mouse: MouseEvent) {
    let count = state.inspected_media_count();
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(zones) = state.lightbox_zones else {
                close_lightbox(state);
                return;
            };
            if point_in_rect(zones.close_rect, mouse.column, mouse.row) {
                close_lightbox(state);
            } else if point_in_rect(zones.prev_rect, mouse.column, mouse.row) {
                state.media_index = prev_index(state.media_index, count);
            } else if point_in_rect(zones.next_rect, mouse.column, mouse.row) {
                state.media_index = next_index(state.media_index, count);
            } else if !point_in_rect(zones.content_rect, mouse.column, mouse.row) {
                // Clicking the dimmed background dismisses.
                close_lightbox(state);
            }
        }
        MouseEventKind::ScrollUp => {
            state.media_index = prev_index(state.media_index, count);
        }
        MouseEventKind::ScrollDown => {
            state.media_index = next_index(state.media_index, count);
        }
        _ => {}
    }
}

fn point_in_rect(area: ratatui::layout::Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
