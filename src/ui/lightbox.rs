//! Full-screen detail-media lightbox overlay.
//!
//! Renders one item of the inspected artwork's carousel, centred on the
//! terminal, with navigation arrows, a close button and a position
//! indicator (e.g. "2 / 3").  Portrait items get a tall frame, landscape a
//! wide one — a nod to the aspect handling of the site this recreates.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::core::gallery::{DetailMedia, MediaKind, Orientation};
use crate::ui::theme::Theme;

/// The lightbox overlay widget.
pub struct LightboxWidget<'a> {
    /// The inspected artwork's full carousel.
    pub items: &'a [DetailMedia],
    /// Index of the currently displayed item.
    pub current: usize,
}

/// Clickable regions returned after rendering, for mouse hit-testing.
#[derive(Debug, Clone, Copy)]
pub struct LightboxHitZones {
    pub close_rect: Rect,
    pub prev_rect: Rect,
    pub next_rect: Rect,
    /// Clicking anywhere outside this dismisses the lightbox.
    pub content_rect: Rect,
}

impl LightboxWidget<'_> {
    /// Compute the overlay area (centred, aspect-dependent).
    fn overlay_area(terminal: Rect, orientation: Orientation) -> Rect {
        let (w_frac, h_frac) = match orientation {
            Orientation::Landscape => (0.8, 0.6),
            Orientation::Portrait => (0.45, 0.85),
        };
        let width = ((f32::from(terminal.width) * w_frac) as u16).clamp(24, terminal.width);
        let height = ((f32::from(terminal.height) * h_frac) as u16).clamp(8, terminal.height);
        Rect::new(
            terminal.x + (terminal.width.saturating_sub(width)) / 2,
            terminal.y + (terminal.height.saturating_sub(height)) / 2,
            width,
            height,
        )
    }

    /// Render and return hit zones for mouse interaction.
    pub fn render_and_hit(self, terminal_area: Rect, buf: &mut Buffer) -> LightboxHitZones {
        let item = self.items.get(self.current).or_else(|| self.items.first());
        let orientation = item.map_or(Orientation::Landscape, |i| i.orientation);
        let area = Self::overlay_area(terminal_area, orientation);

        Clear.render(area, buf);

        let title = match item {
            Some(_) => format!(" {}/{} ", self.current + 1, self.items.len()),
            None => " no media ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        if let Some(item) = item {
            let kind = match item.kind {
                MediaKind::Image => "image",
                MediaKind::Video => "video",
            };
            let mut lines = vec![
                Line::raw(""),
                Line::styled(
                    format!("[{kind}] {}", item.source),
                    Theme::panel_title_style(),
                ),
            ];
            if let Some(alt) = &item.alt_text {
                lines.push(Line::raw(""));
                lines.push(Line::styled(alt.as_str(), Theme::subheading_style()));
            }
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .render(inner, buf);
        }

        // Chrome: close button top-left, arrows on the vertical midline.
        let close_rect = Rect::new(area.x + 1, area.y, 3, 1);
        buf.set_string(close_rect.x, close_rect.y, " × ", Theme::heading_style());

        let mid_y = area.y + area.height / 2;
        let prev_rect = Rect::new(area.x, mid_y, 1, 1);
        let next_rect = Rect::new(area.x + area.width.saturating_sub(1), mid_y, 1, 1);
        if self.items.len() > 1 {
            buf.set_string(prev_rect.x, prev_rect.y, "‹", Theme::heading_style());
            buf.set_string(next_rect.x, next_rect.y, "›", Theme::heading_style());
        }

        LightboxHitZones {
            close_rect,
            prev_rect,
            next_rect,
            content_rect: area,
        }
    }
}

/// Wrapping next/previous index math for the carousel.
pub fn next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

pub fn prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_indices_wrap() {
        assert_eq!(next_index(2, 3), 0);
        assert_eq!(prev_index(0, 3), 2);
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(next_index(0, 0), 0);
        assert_eq!(prev_index(0, 0), 0);
    }

    #[test]
    fn portrait_frame_is_taller_than_wide() {
        let terminal = Rect::new(0, 0, 100, 40);
        let portrait = LightboxWidget::overlay_area(terminal, Orientation::Portrait);
        let landscape = LightboxWidget::overlay_area(terminal, Orientation::Landscape);
        assert!(portrait.height > landscape.height);
        assert!(portrait.width < landscape.width);
    }

    #[test]
    fn hit_zones_lie_within_the_frame() {
        let terminal = Rect::new(0, 0, 80, 24);
        let items = vec![DetailMedia {
            kind: MediaKind::Video,
            source: "media/clip.mp4".into(),
            alt_text: Some("clip".into()),
            orientation: Orientation::Landscape,
        }];
        let mut buf = Buffer::empty(terminal);
        let zones = LightboxWidget {
            items: &items,
            current: 0,
        }
        .render_and_hit(terminal, &mut buf);
        let contains = |outer: Rect, inner: Rect| {
            inner.x >= outer.x
                && inner.y >= outer.y
                && inner.x + inner.width <= outer.x + outer.width
                && inner.y + inner.height <= outer.y + outer.height
        };
        assert!(contains(zones.content_rect, zones.close_rect));
        assert!(contains(zones.content_rect, zones.prev_rect));
        assert!(contains(zones.content_rect, zones.next_rect));
    }
}
