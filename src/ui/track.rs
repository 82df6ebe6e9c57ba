//! Gallery track widget — the horizontal strip of artwork panels plus the
//! avatar.
//!
//! ## Architecture
//!
//! * **Geometry** ([`PanelHit`], [`panel_geometry`]) — pure layout math
//!   shared between the widget (rendering) and the handler (hit-testing).
//! * **Widget** ([`TrackWidget`]) — draws the panels, the floor line and the
//!   avatar from the current damped quantities.
//!
//! The strip slides left as the smoothed offset grows, exactly like the
//! track group in the scene this recreates: a panel's world X is
//! `slot × spacing − smoothed × track_length`, and the avatar stays near
//! the viewport center while the world moves past it.

use glam::Vec3;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Widget},
};

use crate::core::gallery::{ArtworkIx, GalleryLayout};
use crate::core::motion::{Facing, Gait};
use crate::ui::theme::Theme;

/// World units visible across the track pane while walking.
const VISIBLE_SPAN_WALK: f32 = 60.0;
/// World units visible when fully zoomed into an inspect.
const VISIBLE_SPAN_INSPECT: f32 = 26.0;
/// Panel width as a fraction of one module's on-screen width.
const PANEL_WIDTH_RATIO: f32 = 0.72;

/// Clickable region for one interactive artwork panel.
#[derive(Debug, Clone, Copy)]
pub struct PanelHit {
    pub artwork: ArtworkIx,
    pub rect: Rect,
}

fn visible_span(zoom: f32) -> f32 {
    VISIBLE_SPAN_WALK + (VISIBLE_SPAN_INSPECT - VISIBLE_SPAN_WALK) * zoom.clamp(0.0, 1.0)
}

/// Columns per world unit for the given pane width and camera zoom.
fn cols_per_unit(area: Rect, zoom: f32) -> f32 {
    f32::from(area.width.max(1)) / visible_span(zoom)
}

/// Screen column for a world X coordinate, if it lands inside the pane.
fn world_to_col(area: Rect, zoom: f32, world_x: f32) -> Option<u16> {
    let center = f32::from(area.x) + f32::from(area.width) / 2.0;
    let col = center + world_x * cols_per_unit(area, zoom);
    if col < f32::from(area.x) || col >= f32::from(area.x + area.width) {
        return None;
    }
    Some(col as u16)
}

/// Panel rectangles for every artwork currently on screen.  Interactive and
/// non-interactive panels are both returned; the handler filters on
/// `interactive` via the layout.
pub fn panel_geometry(
    area: Rect,
    layout: &GalleryLayout,
    smoothed_offset: f32,
    zoom: f32,
) -> Vec<PanelHit> {
    let mut hits = Vec::new();
    if area.width < 4 || area.height < 5 {
        return hits;
    }
    let ppu = cols_per_unit(area, zoom);
    let shift = smoothed_offset * layout.total_track_length();
    let panel_width = ((layout.module_spacing() * ppu * PANEL_WIDTH_RATIO) as u16).clamp(7, 40);
    let panel_height = area.height.saturating_sub(3).max(3);
    let top = area.y + 1;

    for (ix, art) in layout.artworks().iter().enumerate() {
        let world_x = layout.slot_x(art.slot) - shift;
        let Some(center_col) = world_to_col(area, zoom, world_x) else {
            continue;
        };
        let half = panel_width / 2;
        let left = center_col.saturating_sub(half).max(area.x);
        let right = (center_col + half).min(area.x + area.width);
        if right <= left {
            continue;
        }
        hits.push(PanelHit {
            artwork: ix,
            rect: Rect::new(left, top, right - left, panel_height),
        });
    }
    hits
}

/// The gallery strip widget.
pub struct TrackWidget<'a> {
    pub layout: &'a GalleryLayout,
    pub smoothed_offset: f32,
    pub zoom: f32,
    /// Live camera position (the z distance feeds the HUD).
    pub camera_pos: Vec3,
    pub avatar_x: f32,
    pub gait: Gait,
    pub facing: Facing,
    /// Artwork involved in the current approach/inspect, highlighted.
    pub active: Option<ArtworkIx>,
}

impl TrackWidget<'_> {
    fn render_panel(&self, hit: PanelHit, buf: &mut Buffer) {
        let Some(art) = self.layout.artwork(hit.artwork) else {
            return;
        };
        let style = if self.active == Some(hit.artwork) {
            Theme::selected_panel_style()
        } else if art.interactive {
            Theme::panel_style()
        } else {
            Theme::muted_panel_style()
        };

        let title = art
            .heading
            .clone()
            .unwrap_or_else(|| art.id.replace('-', " "));
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(Line::styled(format!(" {title} "), Theme::panel_title_style()));
        let inner = block.inner(hit.rect);
        block.render(hit.rect, buf);

        if let Some(sub) = &art.subheading {
            if inner.height > 0 {
                buf.set_stringn(
                    inner.x,
                    inner.y,
                    sub,
                    inner.width as usize,
                    Theme::subheading_style(),
                );
            }
        }
        if art.interactive && inner.height > 1 {
            let tag = if self.active == Some(hit.artwork) {
                "● selected"
            } else if art.has_detail_media() {
                "▶ artwork"
            } else {
                "○ artwork"
            };
            buf.set_stringn(
                inner.x,
                inner.y + inner.height - 1,
                tag,
                inner.width as usize,
                style,
            );
        }
    }

    fn render_avatar(&self, area: Rect, buf: &mut Buffer) {
        let Some(col) = world_to_col(area, self.zoom, self.avatar_x) else {
            return;
        };
        let floor_y = area.y + area.height.saturating_sub(2);
        if floor_y <= area.y + 1 {
            return;
        }
        // Tiny three-row figure standing on the floor line.
        let (head, body) = match (self.gait, self.facing) {
            (Gait::Walking, Facing::Right) => ("o", "/>"),
            (Gait::Walking, Facing::Left) => ("o", "<\\"),
            (Gait::Idle, _) => ("o", "|"),
        };
        let style = Theme::avatar_style();
        buf.set_string(col, floor_y.saturating_sub(2), head, style);
        buf.set_string(col, floor_y.saturating_sub(1), body, style);
    }
}

impl Widget for TrackWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 5 {
            return;
        }

        // Tiny HUD in the top-left corner.
        let hud = format!(
            " {:>3.0}% · cam {:.1} ",
            self.smoothed_offset * 100.0,
            self.camera_pos.z,
        );
        buf.set_stringn(
            area.x,
            area.y,
            hud,
            area.width as usize,
            Theme::floor_style(),
        );

        // Floor line across the full pane.
        let floor_y = area.y + area.height.saturating_sub(2);
        let floor: String = "─".repeat(area.width as usize);
        buf.set_string(area.x, floor_y, floor, Theme::floor_style());

        for hit in panel_geometry(area, self.layout, self.smoothed_offset, self.zoom) {
            self.render_panel(hit, buf);
        }

        self.render_avatar(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gallery::{builtin_artworks, GalleryLayout, MODULE_SPACING_WIDE};

    fn layout() -> GalleryLayout {
        GalleryLayout::new(builtin_artworks(), MODULE_SPACING_WIDE).unwrap()
    }

    #[test]
    fn geometry_centers_targeted_artwork() {
        let layout = layout();
        let area = Rect::new(0, 0, 120, 30);
        // Smoothed offset exactly at an artwork's target puts its panel at
        // the pane center.
        let ix = layout.first_interactive().unwrap();
        let offset = layout.target_offset(ix).unwrap();
        let hits = panel_geometry(area, &layout, offset, 0.0);
        let hit = hits.iter().find(|h| h.artwork == ix).expect("panel visible");
        let panel_center = hit.rect.x + hit.rect.width / 2;
        let pane_center = area.width / 2;
        assert!((i32::from(panel_center) - i32::from(pane_center)).abs() <= 1);
    }

    #[test]
    fn offscreen_panels_are_culled() {
        let layout = layout();
        let area = Rect::new(0, 0, 80, 24);
        // At offset 0 the far end of the track is well outside the pane.
        let hits = panel_geometry(area, &layout, 0.0, 0.0);
        assert!(hits.len() < layout.artworks().len());
        assert!(hits.iter().any(|h| h.artwork == 0));
    }

    #[test]
    fn degenerate_area_yields_no_geometry() {
        let layout = layout();
        assert!(panel_geometry(Rect::new(0, 0, 3, 2), &layout, 0.0, 0.0).is_empty());
    }

    #[test]
    fn zoom_widens_panels() {
        let layout = layout();
        let area = Rect::new(0, 0, 120, 30);
        let ix = layout.first_interactive().unwrap();
        let offset = layout.target_offset(ix).unwrap();
        let walk = panel_geometry(area, &layout, offset, 0.0);
        let inspect = panel_geometry(area, &layout, offset, 1.0);
        let w = |hits: &[PanelHit]| {
            hits.iter()
                .find(|h| h.artwork == ix)
                .map(|h| h.rect.width)
                .unwrap_or(0)
        };
        assert!(w(&inspect) >= w(&walk));
    }
}
