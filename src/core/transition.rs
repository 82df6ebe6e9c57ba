//! The walk → approach → inspect state machine.
//!
//! [`TransitionController`] owns the [`Mode`] tag exclusively.  Selecting an
//! artwork starts an *approach*: the scroll source glides toward the slot's
//! offset while the avatar walks to its inspect stand position.  Each frame
//! the controller polls both damped quantities against their targets and
//! promotes to *inspect* only when the two converge in the same tick.  While
//! inspecting, scrolling past a small threshold drops straight back to walk
//! so the user's scroll is never fought.
//!
//! All transitions run inside the single frame loop, so a stale approach is
//! cancelled simply by the mode tag having moved on — there is no captured
//! callback to race against.

use tracing::debug;

use crate::core::gallery::{ArtworkIx, BodyLine, DetailMedia, GalleryLayout};
use crate::core::motion::{AvatarMotion, INSPECT_X, WALK_X};
use crate::core::scroll::ScrollSource;

/// Convergence epsilon for the smoothed offset.
pub const CENTER_EPSILON: f32 = 0.01;
/// Convergence epsilon for the avatar's lateral position.
pub const POSITION_EPSILON: f32 = 0.05;
/// How far the smoothed offset may drift from the latched target before an
/// inspect is abandoned.
pub const EXIT_THRESHOLD: f32 = 0.015;

/// Which phase the gallery is in.  Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// Free scrolling along the track.
    Walk,
    /// Transit toward a selected artwork; convergence is polled every frame.
    Approach {
        artwork: ArtworkIx,
        target_offset: f32,
    },
    /// Standing in front of an artwork with the overlay up.
    Inspect {
        artwork: ArtworkIx,
        target_offset: f32,
    },
}

impl Mode {
    /// The artwork involved in the current phase, if any.
    pub fn artwork(&self) -> Option<ArtworkIx> {
        match *self {
            Mode::Walk => None,
            Mode::Approach { artwork, .. } | Mode::Inspect { artwork, .. } => Some(artwork),
        }
    }

    pub fn is_inspect(&self) -> bool {
        matches!(self, Mode::Inspect { .. })
    }
}

/// Payload handed to the overlay presenter.  `None` everywhere except a
/// fully reached inspect.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayContent {
    pub artwork: ArtworkIx,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub body: Vec<BodyLine>,
    pub detail_media: Vec<DetailMedia>,
}

/// Owner of [`Mode`] and the overlay payload.
#[derive(Debug, Clone)]
pub struct TransitionController {
    mode: Mode,
    /// Raw offset latched at the moment inspect was entered.
    last_raw_offset: f32,
    overlay: Option<OverlayContent>,
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionController {
    pub fn new() -> Self {
        Self {
            mode: Mode::Walk,
            last_raw_offset: 0.0,
            overlay: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Overlay payload for the presenter.  Suppressed during approach so the
    /// overlay never flickers in mid-transit.
    pub fn overlay(&self) -> Option<&OverlayContent> {
        self.overlay.as_ref()
    }

    pub fn last_raw_offset(&self) -> f32 {
        self.last_raw_offset
    }

    /// Handle a click/tap on an artwork.
    ///
    /// From walk (or while inspecting another piece) this begins an approach:
    /// the scroll source glides to the slot's clamped offset and the avatar
    /// heads to its stand position.  Clicking the piece already being
    /// inspected deselects instead, dropping straight back to walk.
    /// Non-interactive pieces are ignored.
    pub fn select(
        &mut self,
        artwork: ArtworkIx,
        layout: &GalleryLayout,
        scroll: &mut ScrollSource,
        avatar: &mut AvatarMotion,
    ) {
        let Some(art) = layout.artwork(artwork) else {
            return;
        };
        if !art.interactive {
            return;
        }

        if let Mode::Inspect { artwork: current, .. } = self.mode {
            if current == artwork {
                debug!(id = %art.id, "deselect via re-click");
                self.to_walk(scroll, avatar);
                return;
            }
        }

        let Some(target_offset) = layout.target_offset(artwork) else {
            return;
        };
        debug!(id = %art.id, target_offset, "approach");
        self.mode = Mode::Approach {
            artwork,
            target_offset,
        };
        self.overlay = None;
        scroll.glide_to(target_offset);
        avatar.set_target_x(INSPECT_X);
    }

    /// Poll convergence while approaching; promotes to inspect when both the
    /// smoothed offset and the avatar are within epsilon of their targets in
    /// the same tick.  Outside approach this is a no-op, so a superseded
    /// approach can never fire a stale promotion.
    ///
    /// There is no timeout: a target unreachable because of clamping keeps
    /// the approach pending forever.
    pub fn poll_convergence(
        &mut self,
        smoothed_offset: f32,
        avatar_x: f32,
        raw_offset: f32,
        layout: &GalleryLayout,
    ) {
        let Mode::Approach {
            artwork,
            target_offset,
        } = self.mode
        else {
            return;
        };

        let centered = (smoothed_offset - target_offset).abs() < CENTER_EPSILON;
        let in_place = (avatar_x - INSPECT_X).abs() < POSITION_EPSILON;
        if !(centered && in_place) {
            return;
        }

        self.mode = Mode::Inspect {
            artwork,
            target_offset,
        };
        self.last_raw_offset = raw_offset;
        self.overlay = layout.artwork(artwork).map(|art| OverlayContent {
            artwork,
            heading: art.heading.clone(),
            subheading: art.subheading.clone(),
            body: art.body.clone(),
            detail_media: art.detail_media.clone(),
        });
        debug!(artwork, "inspect");
    }

    /// While inspecting, scrolling away past the threshold abandons the
    /// inspect and returns to walk.  No-op outside inspect.
    pub fn check_exit(
        &mut self,
        smoothed_offset: f32,
        scroll: &mut ScrollSource,
        avatar: &mut AvatarMotion,
    ) {
        let Mode::Inspect { target_offset, .. } = self.mode else {
            return;
        };
        if (smoothed_offset - target_offset).abs() > EXIT_THRESHOLD {
            debug!(smoothed_offset, target_offset, "scrolled away, exiting inspect");
            self.to_walk(scroll, avatar);
        }
    }

    /// Manual exit (Esc, close button).  Same effect as scrolling away.
    pub fn exit_inspect(&mut self, scroll: &mut ScrollSource, avatar: &mut AvatarMotion) {
        if matches!(self.mode, Mode::Walk) {
            return;
        }
        self.to_walk(scroll, avatar);
    }

    /// Common walk-return path: clear the overlay, stop fighting the user's
    /// scroll, send the avatar back to the walk line.
    fn to_walk(&mut self, scroll: &mut ScrollSource, avatar: &mut AvatarMotion) {
        self.mode = Mode::Walk;
        self.overlay = None;
        scroll.cancel_glide();
        avatar.set_target_x(WALK_X);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gallery::Artwork;

    const DT: f32 = 1.0 / 60.0;

    fn artwork(id: &str, slot: u32) -> Artwork {
        Artwork {
            id: id.into(),
            slot,
            interactive: true,
            heading: Some(format!("{id} heading")),
            subheading: None,
            body: Vec::new(),
            detail_media: Vec::new(),
        }
    }

    /// Two artworks at slots 1 and 2, spacing 10 → track length 10.
    fn layout() -> GalleryLayout {
        GalleryLayout::new(vec![artwork("a", 1), artwork("b", 2)], 10.0).unwrap()
    }

    struct Rig {
        controller: TransitionController,
        scroll: ScrollSource,
        avatar: AvatarMotion,
        layout: GalleryLayout,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                controller: TransitionController::new(),
                scroll: ScrollSource::new(),
                avatar: AvatarMotion::new(false),
                layout: layout(),
            }
        }

        fn select(&mut self, ix: ArtworkIx) {
            self.controller
                .select(ix, &self.layout, &mut self.scroll, &mut self.avatar);
        }

        /// Drive the approach with externally chosen damped values, the way
        /// the frame loop feeds live ones.
        fn poll(&mut self, smoothed: f32, avatar_x: f32) {
            self.controller
                .poll_convergence(smoothed, avatar_x, smoothed, &self.layout);
        }

        /// Run real damped dynamics until the mode settles or `max` frames
        /// pass.
        fn run_to_convergence(&mut self, max: usize) {
            let mut smoothed = crate::core::scroll::SmoothedOffset::new(
                self.scroll.offset(),
                crate::core::scroll::OFFSET_DAMPING,
            );
            for _ in 0..max {
                self.scroll.step(DT);
                smoothed.step(self.scroll.offset(), DT);
                self.avatar.step(smoothed.value(), DT);
                self.controller.poll_convergence(
                    smoothed.value(),
                    self.avatar.position(),
                    self.scroll.offset(),
                    &self.layout,
                );
                if self.controller.mode().is_inspect() {
                    return;
                }
            }
        }
    }

    #[test]
    fn select_clamps_offset_to_one() {
        let mut rig = Rig::new();
        // Slot 2 × spacing 10 / length 10 = 2.0 → clamped to exactly 1.0.
        rig.select(1);
        match rig.controller.mode() {
            Mode::Approach { target_offset, .. } => assert_eq!(target_offset, 1.0),
            other => panic!("expected approach, got {other:?}"),
        }
    }

    #[test]
    fn convergence_requires_both_quantities() {
        let mut rig = Rig::new();
        rig.select(0); // target offset 1.0
        // Offset centered, avatar still out of place → stay approaching.
        rig.poll(0.995, -0.5);
        assert!(matches!(rig.controller.mode(), Mode::Approach { .. }));
        // Avatar in place, offset off-center → still approaching.
        rig.poll(0.95, INSPECT_X);
        assert!(matches!(rig.controller.mode(), Mode::Approach { .. }));
        // Both inside epsilon in the same tick → inspect.
        rig.poll(0.995, INSPECT_X + 0.01);
        assert!(rig.controller.mode().is_inspect());
    }

    #[test]
    fn convergence_is_idempotent() {
        let mut rig = Rig::new();
        rig.select(0);
        rig.poll(0.995, INSPECT_X);
        let mode = rig.controller.mode();
        assert!(mode.is_inspect());
        for _ in 0..10 {
            rig.poll(0.995, INSPECT_X);
        }
        assert_eq!(rig.controller.mode(), mode);
    }

    #[test]
    fn second_select_supersedes_first() {
        let mut rig = Rig::new();
        rig.select(1);
        // Before anything converges, pick the other piece.
        rig.select(0);
        rig.run_to_convergence(5000);
        assert_eq!(rig.controller.mode().artwork(), Some(0));
        assert!(rig.controller.mode().is_inspect());
    }

    #[test]
    fn reselecting_inspected_artwork_deselects() {
        let mut rig = Rig::new();
        rig.select(0);
        rig.poll(0.995, INSPECT_X);
        assert!(rig.controller.mode().is_inspect());
        // Same piece again → straight to walk, no intermediate approach.
        rig.select(0);
        assert_eq!(rig.controller.mode(), Mode::Walk);
        assert!(!rig.scroll.is_gliding());
        assert_eq!(rig.avatar.target_x(), WALK_X);
    }

    #[test]
    fn exit_fires_only_past_threshold() {
        let mut rig = Rig::new();
        // Reach inspect with the target latched at 1.0.
        rig.select(0);
        rig.poll(0.995, INSPECT_X);
        assert!(rig.controller.mode().is_inspect());

        // Drift within the threshold (target 1.0): |0.99 − 1.0| = 0.01.
        rig.controller
            .check_exit(0.99, &mut rig.scroll, &mut rig.avatar);
        assert!(rig.controller.mode().is_inspect());
        // |0.986 − 1.0| = 0.014, still inside.
        rig.controller
            .check_exit(0.986, &mut rig.scroll, &mut rig.avatar);
        assert!(rig.controller.mode().is_inspect());
        // |0.984 − 1.0| = 0.016 > 0.015 → walk.
        rig.controller
            .check_exit(0.984, &mut rig.scroll, &mut rig.avatar);
        assert_eq!(rig.controller.mode(), Mode::Walk);
        assert_eq!(rig.avatar.target_x(), WALK_X);
    }

    #[test]
    fn overlay_suppressed_until_inspect() {
        let mut rig = Rig::new();
        assert!(rig.controller.overlay().is_none());
        rig.select(0);
        // Throughout approach the presenter sees null.
        rig.poll(0.5, -0.3);
        rig.poll(0.9, -1.0);
        assert!(rig.controller.overlay().is_none());
        rig.poll(0.995, INSPECT_X);
        let overlay = rig.controller.overlay().expect("overlay after inspect");
        assert_eq!(overlay.heading.as_deref(), Some("a heading"));
        // Any exit clears it again.
        rig.controller
            .exit_inspect(&mut rig.scroll, &mut rig.avatar);
        assert!(rig.controller.overlay().is_none());
    }

    #[test]
    fn select_ignores_non_interactive() {
        let mut artworks = vec![artwork("title", 0), artwork("a", 1)];
        artworks[0].interactive = false;
        let layout = GalleryLayout::new(artworks, 10.0).unwrap();
        let mut controller = TransitionController::new();
        let mut scroll = ScrollSource::new();
        let mut avatar = AvatarMotion::new(false);
        controller.select(0, &layout, &mut scroll, &mut avatar);
        assert_eq!(controller.mode(), Mode::Walk);
        assert!(!scroll.is_gliding());
    }

    #[test]
    fn end_to_end_select_converges_to_inspect() {
        let mut rig = Rig::new();
        rig.select(0); // slot 1 → target offset 1.0
        assert!(rig.scroll.is_gliding());

        // Scripted damped ticks closing in on the targets.
        let offsets = [0.9, 0.95, 0.991, 0.996];
        let avatar_xs = [-0.5, -0.9, -1.1, -1.18];
        let mut inspect_at = None;
        for (i, (&off, &x)) in offsets.iter().zip(&avatar_xs).enumerate() {
            rig.poll(off, x);
            if rig.controller.mode().is_inspect() && inspect_at.is_none() {
                inspect_at = Some(i);
            }
        }
        // Tick 2 has the offset centered (|0.991−1| < 0.01) but the avatar
        // still out of place; only tick 3 satisfies both.
        assert_eq!(inspect_at, Some(3));
        assert_eq!(rig.controller.last_raw_offset(), 0.996);
    }

    #[test]
    fn full_dynamics_land_in_inspect() {
        let mut rig = Rig::new();
        rig.select(0);
        rig.run_to_convergence(5000);
        assert!(rig.controller.mode().is_inspect());
        assert_eq!(rig.controller.mode().artwork(), Some(0));
    }
}
