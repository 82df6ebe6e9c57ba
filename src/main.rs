//! A scroll-driven terminal art gallery.
//!
//! Scroll to walk the avatar along the track; click an artwork (or press
//! Enter) to step up and inspect it, and scroll away to leave.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::Paragraph,
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    frame, handler,
    state::{ActiveView, AppState},
};
use crate::core::gallery::{
    builtin_artworks, GalleryLayout, MODULE_SPACING_NARROW, MODULE_SPACING_WIDE,
};
use crate::ui::{
    layout::AppLayout, lightbox::LightboxWidget, overlay::OverlayWidget, theme::Theme,
    track::TrackWidget,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven terminal art gallery")]
struct Cli {
    /// Reduce animation aggressiveness (battery-friendly).
    #[arg(long)]
    low_power: bool,

    /// Walk straight to the first artwork on launch.
    #[arg(long)]
    auto_focus: bool,

    /// Use the narrow-viewport layout constants.
    #[arg(long)]
    narrow: bool,

    /// Target frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u64,
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    // ── configuration ─────────────────────────────────────────
    // CLI flags override persisted options.
    let mut user_config = config::AppConfig::load();
    user_config.low_power |= cli.low_power;
    user_config.auto_focus_first |= cli.auto_focus;
    user_config.narrow_viewport |= cli.narrow;

    // The viewport-width branch is resolved exactly once, here.
    let module_spacing = if user_config.narrow_viewport {
        MODULE_SPACING_NARROW
    } else {
        MODULE_SPACING_WIDE
    };
    let layout = GalleryLayout::new(builtin_artworks(), module_spacing)?;
    let mut state = AppState::new(layout, user_config);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── event loop ────────────────────────────────────────────
    let fps = cli.fps.clamp(10, 120);
    let frame_period = Duration::from_millis(1000 / fps);
    let mut events = spawn_event_reader(frame_period);

    loop {
        terminal.draw(|f| {
            state.terminal_area = f.area();
            let overlay = state.controller.overlay();
            let layout = AppLayout::from_area(f.area(), overlay.is_some());

            let track = TrackWidget {
                layout: &state.layout,
                smoothed_offset: state.smoothed.value(),
                zoom: state.camera.zoom(),
                camera_pos: state.camera.position(),
                avatar_x: state.avatar.position(),
                gait: state.avatar.gait(),
                facing: state.avatar.facing(),
                active: state.controller.mode().artwork(),
            };
            f.render_widget(track, layout.track_area);

            if let (Some(content), Some(area)) = (overlay, layout.overlay_area) {
                let widget = OverlayWidget {
                    content,
                    view_key: "v".into(),
                };
                f.render_widget(widget, area);
            }

            let hint = match overlay {
                Some(content) => state
                    .config
                    .inspect_hint(!content.detail_media.is_empty()),
                None => state.config.walk_hint(),
            };
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            f.render_widget(status, layout.status_area);

            state.lightbox_zones = if state.active_view == ActiveView::Lightbox {
                overlay.map(|content| {
                    LightboxWidget {
                        items: &content.detail_media,
                        current: state.media_index,
                    }
                    .render_and_hit(f.area(), f.buffer_mut())
                })
            } else {
                None
            };
        })?;

        match events.recv().await {
            Some(AppEvent::Key(k)) => handler::handle_key(&mut state, k),
            Some(AppEvent::Mouse(m)) => handler::handle_mouse(&mut state, m),
            Some(AppEvent::Resize(_, _)) => {}
            Some(AppEvent::Frame(dt)) => frame::advance(&mut state, dt),
            None => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
