//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the track pane, an optional overlay sidebar while
/// inspecting, and a bottom status bar.
pub struct AppLayout {
    pub track_area: Rect,
    /// Present only while the overlay payload is non-null.
    pub overlay_area: Option<Rect>,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect, overlay_up: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // track pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        if !overlay_up {
            return Self {
                track_area: rows[0],
                overlay_area: None,
                status_area: rows[1],
            };
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[0]);

        Self {
            track_area: cols[0],
            overlay_area: Some(cols[1]),
            status_area: rows[1],
        }
    }
}
