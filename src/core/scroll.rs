//! Scroll input – normalized raw offset plus its damped shadow.
//!
//! [`ScrollSource`] is the single writer of the raw offset: wheel/key nudges
//! land here, and programmatic "scroll to artwork" requests run as an eased
//! glide sampled once per frame (the terminal equivalent of a smooth
//! `scrollTo`).  [`SmoothedOffset`] trails the raw offset with exponential
//! damping and is what every other component actually reads — the raw value
//! only matters for input handling and the inspect-entry latch.

use crate::core::motion::damp;

/// Damping factor for the smoothed offset at the reference frame rate
/// (wide viewports).
pub const OFFSET_DAMPING: f32 = 0.03;
/// Narrow viewports scroll snappier, matching the mobile/desktop ratio of
/// the site this reimplements (0.06 vs 0.15 smoothing time).
pub const OFFSET_DAMPING_NARROW: f32 = 0.075;
/// Duration of a programmatic glide, in seconds.
pub const GLIDE_DURATION: f32 = 0.6;

/// Offset damping constant for the viewport-width branch, resolved once at
/// startup alongside the module spacing.
pub fn offset_damping(narrow: bool) -> f32 {
    if narrow {
        OFFSET_DAMPING_NARROW
    } else {
        OFFSET_DAMPING
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// An in-flight programmatic scroll.
#[derive(Debug, Clone, Copy)]
struct Glide {
    from: f32,
    to: f32,
    /// Seconds elapsed since the glide started.
    elapsed: f32,
}

/// Normalized scroll position in [0,1], with programmatic glide support.
#[derive(Debug, Clone)]
pub struct ScrollSource {
    offset: f32,
    glide: Option<Glide>,
}

impl Default for ScrollSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollSource {
    pub fn new() -> Self {
        Self {
            offset: 0.0,
            glide: None,
        }
    }

    /// Current raw offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Apply a user scroll delta.  User input always wins: any active glide
    /// is cancelled, like grabbing the wheel mid smooth-scroll.
    pub fn nudge(&mut self, delta: f32) {
        self.glide = None;
        self.offset = (self.offset + delta).clamp(0.0, 1.0);
    }

    /// Abandon any in-flight glide, leaving the offset where it is.
    pub fn cancel_glide(&mut self) {
        self.glide = None;
    }

    /// Begin an animated scroll toward `target` (clamped to [0,1]).
    pub fn glide_to(&mut self, target: f32) {
        let to = target.clamp(0.0, 1.0);
        self.glide = Some(Glide {
            from: self.offset,
            to,
            elapsed: 0.0,
        });
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }

    /// Advance an active glide by `dt` seconds.  Call once per frame.
    pub fn step(&mut self, dt: f32) {
        let Some(mut glide) = self.glide else {
            return;
        };
        glide.elapsed += dt;
        let t = glide.elapsed / GLIDE_DURATION;
        self.offset = glide.from + (glide.to - glide.from) * smoothstep(t);
        if t >= 1.0 {
            self.offset = glide.to;
            self.glide = None;
        } else {
            self.glide = Some(glide);
        }
    }
}

/// Exponentially damped copy of the raw offset — the perceptual gallery
/// position.
#[derive(Debug, Clone)]
pub struct SmoothedOffset {
    value: f32,
    damping: f32,
}

impl SmoothedOffset {
    pub fn new(initial: f32, damping: f32) -> Self {
        Self {
            value: initial,
            damping,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// One damped step toward the raw offset.  Call once per frame.
    pub fn step(&mut self, raw: f32, dt: f32) {
        self.value = damp(self.value, raw, self.damping, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn nudge_clamps_to_unit_range() {
        let mut scroll = ScrollSource::new();
        scroll.nudge(1.7);
        assert_eq!(scroll.offset(), 1.0);
        scroll.nudge(-2.5);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn glide_reaches_target_exactly() {
        let mut scroll = ScrollSource::new();
        scroll.glide_to(0.8);
        for _ in 0..100 {
            scroll.step(DT);
        }
        assert_eq!(scroll.offset(), 0.8);
        assert!(!scroll.is_gliding());
    }

    #[test]
    fn glide_target_is_clamped() {
        let mut scroll = ScrollSource::new();
        scroll.glide_to(1.3);
        for _ in 0..100 {
            scroll.step(DT);
        }
        assert_eq!(scroll.offset(), 1.0);
    }

    #[test]
    fn glide_is_monotonic_and_eased() {
        let mut scroll = ScrollSource::new();
        scroll.glide_to(1.0);
        let mut prev = 0.0;
        let mut first_delta = None;
        while scroll.is_gliding() {
            scroll.step(DT);
            assert!(scroll.offset() >= prev);
            if first_delta.is_none() {
                first_delta = Some(scroll.offset() - prev);
            }
            prev = scroll.offset();
        }
        // Smoothstep starts slow: the first frame moves less than the
        // average per-frame distance.
        let frames = (GLIDE_DURATION / DT).ceil();
        assert!(first_delta.unwrap() < 1.0 / frames);
    }

    #[test]
    fn nudge_cancels_active_glide() {
        let mut scroll = ScrollSource::new();
        scroll.glide_to(1.0);
        scroll.step(DT);
        scroll.nudge(-0.01);
        assert!(!scroll.is_gliding());
        let before = scroll.offset();
        scroll.step(DT);
        assert_eq!(scroll.offset(), before);
    }

    #[test]
    fn smoothed_lags_raw() {
        let mut smoothed = SmoothedOffset::new(0.0, OFFSET_DAMPING);
        smoothed.step(1.0, DT);
        assert!(smoothed.value() > 0.0 && smoothed.value() < 0.1);
        for _ in 0..2000 {
            smoothed.step(1.0, DT);
        }
        assert!((smoothed.value() - 1.0).abs() < 0.001);
    }

    #[test]
    fn narrow_viewport_damping_settles_faster() {
        let mut wide = SmoothedOffset::new(0.0, offset_damping(false));
        let mut narrow = SmoothedOffset::new(0.0, offset_damping(true));
        for _ in 0..60 {
            wide.step(1.0, DT);
            narrow.step(1.0, DT);
        }
        assert!(narrow.value() > wide.value());
        // Both still trail the raw offset.
        assert!(narrow.value() < 1.0);
    }
}
