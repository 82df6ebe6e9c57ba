//! Central application state.
//!
//! All mutable state lives here so the rest of the app can be pure functions
//! over `&AppState` (rendering) or `&mut AppState` (event handling).  Each
//! animated quantity has exactly one writer: the scroll source owns the raw
//! offset, the smoothed offset owns its damped copy, the avatar owns its
//! position, and the transition controller owns the mode tag.  Everything
//! else only reads.

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::camera::CameraFraming;
use crate::core::gallery::GalleryLayout;
use crate::core::motion::AvatarMotion;
use crate::core::scroll::{offset_damping, ScrollSource, SmoothedOffset};
use crate::core::transition::TransitionController;
use crate::ui::lightbox::LightboxHitZones;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Gallery,
    Lightbox,
}

/// Top-level application state.
pub struct AppState {
    /// Static track layout, resolved once at startup.
    pub layout: GalleryLayout,
    /// Raw normalized scroll position (plus programmatic glides).
    pub scroll: ScrollSource,
    /// Damped copy of the raw offset — the perceptual gallery position.
    pub smoothed: SmoothedOffset,
    /// Avatar position, gait and facing.
    pub avatar: AvatarMotion,
    /// The walk/approach/inspect state machine.
    pub controller: TransitionController,
    /// Live camera transform.
    pub camera: CameraFraming,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Index into the inspected artwork's detail media (lightbox).
    pub media_index: usize,
    /// Hit zones from the last lightbox render, for mouse hit-testing.
    pub lightbox_zones: Option<LightboxHitZones>,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// User configuration.
    pub config: AppConfig,
    /// Last known terminal area, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Set once the startup auto-focus has fired.
    pub auto_focus_done: bool,
}

impl AppState {
    pub fn new(layout: GalleryLayout, config: AppConfig) -> Self {
        let low_power = config.low_power;
        let damping = offset_damping(config.narrow_viewport);
        Self {
            layout,
            scroll: ScrollSource::new(),
            smoothed: SmoothedOffset::new(0.0, damping),
            avatar: AvatarMotion::new(low_power),
            controller: TransitionController::new(),
            camera: CameraFraming::new(),
            active_view: ActiveView::default(),
            media_index: 0,
            lightbox_zones: None,
            should_quit: false,
            status_message: None,
            config,
            terminal_area: Rect::default(),
            auto_focus_done: false,
        }
    }

    /// Number of detail-media items on the piece currently inspected, or 0
    /// when the overlay is down.
    pub fn inspected_media_count(&self) -> usize {
        self.controller
            .overlay()
            .map_or(0, |o| o.detail_media.len())
    }
}
