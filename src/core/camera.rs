//! Camera framing – pure function of [`Mode`] plus a damped live transform.
//!
//! Walk and approach share one fixed side-on framing; inspect pulls in close
//! and slightly low, looking up at the piece.  The live transform chases the
//! target with the same frame-scaled lerp as everything else, with a
//! slightly softer constant for inspect so the close-up eases in rather
//! than snapping.

use glam::Vec3;

use crate::core::motion::frame_scale;
use crate::core::transition::Mode;

/// Walk/approach camera position (side view).
pub const WALK_POS: Vec3 = Vec3::new(0.0, 1.6, 8.0);
/// Walk/approach look-at point.
pub const WALK_LOOK: Vec3 = Vec3::new(0.0, 1.4, 0.0);
/// Inspect camera position — closer, slightly below mid-height.
pub const INSPECT_POS: Vec3 = Vec3::new(0.0, 1.2, 2.4);
/// Inspect look-at — a bit above mid-height.
pub const INSPECT_LOOK: Vec3 = Vec3::new(0.0, 1.8, 0.0);

/// Damping toward the walk framing (snappier on the way back).
pub const WALK_LERP: f32 = 0.10;
/// Damping toward the inspect framing (gentler ease-in).
pub const INSPECT_LERP: f32 = 0.12;

/// Target framing for a mode.  Approach keeps the walk framing; the camera
/// only moves in once inspect is fully reached.
pub fn framing_for(mode: Mode) -> (Vec3, Vec3) {
    if mode.is_inspect() {
        (INSPECT_POS, INSPECT_LOOK)
    } else {
        (WALK_POS, WALK_LOOK)
    }
}

/// Live camera transform, damped toward the current mode's framing.
#[derive(Debug, Clone)]
pub struct CameraFraming {
    position: Vec3,
    look_at: Vec3,
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraFraming {
    pub fn new() -> Self {
        Self {
            position: WALK_POS,
            look_at: WALK_LOOK,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Normalized zoom in [0,1]: 0 at the walk distance, 1 at the inspect
    /// distance.  The renderer scales the track framing with this.
    pub fn zoom(&self) -> f32 {
        let span = WALK_POS.z - INSPECT_POS.z;
        ((WALK_POS.z - self.position.z) / span).clamp(0.0, 1.0)
    }

    /// One damped step toward the framing for `mode`.  Call once per frame.
    pub fn step(&mut self, mode: Mode, dt: f32) {
        let (target_pos, target_look) = framing_for(mode);
        let k = if mode.is_inspect() {
            INSPECT_LERP
        } else {
            WALK_LERP
        };
        let t = (k * frame_scale(dt)).min(1.0);
        self.position = self.position.lerp(target_pos, t);
        self.look_at = self.look_at.lerp(target_look, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn approach_mode() -> Mode {
        Mode::Approach {
            artwork: 0,
            target_offset: 0.5,
        }
    }

    fn inspect_mode() -> Mode {
        Mode::Inspect {
            artwork: 0,
            target_offset: 0.5,
        }
    }

    #[test]
    fn walk_and_approach_share_framing() {
        assert_eq!(framing_for(Mode::Walk), framing_for(approach_mode()));
        assert_ne!(framing_for(Mode::Walk), framing_for(inspect_mode()));
    }

    #[test]
    fn camera_eases_toward_inspect() {
        let mut cam = CameraFraming::new();
        for _ in 0..600 {
            cam.step(inspect_mode(), DT);
        }
        assert!((cam.position() - INSPECT_POS).length() < 0.05);
        assert!((cam.look_at() - INSPECT_LOOK).length() < 0.05);
        assert!(cam.zoom() > 0.95);
    }

    #[test]
    fn camera_returns_to_walk_framing() {
        let mut cam = CameraFraming::new();
        for _ in 0..600 {
            cam.step(inspect_mode(), DT);
        }
        for _ in 0..600 {
            cam.step(Mode::Walk, DT);
        }
        assert!((cam.position() - WALK_POS).length() < 0.05);
        assert!(cam.zoom() < 0.05);
    }

    #[test]
    fn zoom_is_zero_at_rest() {
        let cam = CameraFraming::new();
        assert_eq!(cam.zoom(), 0.0);
    }
}
