//! Artwork overlay panel — heading, subheading, body and the "view work"
//! affordance.
//!
//! Rendered only while the transition controller exposes an overlay payload,
//! which by contract means inspect has been fully reached.  Absent fields
//! render nothing; an artwork without detail media simply has no affordance
//! line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::core::gallery::BodyLine;
use crate::core::transition::OverlayContent;
use crate::ui::theme::Theme;

pub struct OverlayWidget<'a> {
    pub content: &'a OverlayContent,
    /// Status-bar style hint for the affordance, e.g. `"v"`.
    pub view_key: String,
}

impl OverlayWidget<'_> {
    fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();

        if let Some(heading) = &self.content.heading {
            lines.push(Line::styled(heading.as_str(), Theme::heading_style()));
        }
        if let Some(sub) = &self.content.subheading {
            lines.push(Line::styled(sub.as_str(), Theme::subheading_style()));
        }
        if !lines.is_empty() && !self.content.body.is_empty() {
            lines.push(Line::raw(""));
        }

        for body_line in &self.content.body {
            match body_line {
                BodyLine::Text(text) => lines.push(Line::raw(text.as_str())),
                BodyLine::Link { text, url } => lines.push(Line::from(vec![
                    Span::styled(text.as_str(), Theme::link_style()),
                    Span::raw("  "),
                    Span::styled(url.as_str(), Theme::subheading_style()),
                ])),
            }
        }

        if !self.content.detail_media.is_empty() {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!(
                    "▶ view work ({} item{}) — {}",
                    self.content.detail_media.len(),
                    if self.content.detail_media.len() == 1 { "" } else { "s" },
                    self.view_key,
                ),
                Theme::affordance_style(),
            ));
        }

        lines
    }
}

impl Widget for OverlayWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_style())
            .title(Line::styled(" inspect ", Theme::title_style()));
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.lines())
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
