//! Frame-rate-normalized damping and avatar motion.
//!
//! All smoothing in the app goes through [`damp`]: exponential interpolation
//! toward a target, with the per-tick factor scaled by elapsed frame time so
//! behaviour is identical at 30 and 144 fps.  The factor is capped so a
//! long stall (tab switch, suspended terminal) cannot teleport anything.

/// Reference frame rate the damping constants are tuned against.
pub const REFERENCE_RATE: f32 = 60.0;
/// Cap on the frame-time multiplier after a stall.
pub const FRAME_SCALE_CAP: f32 = 2.0;

/// How fast the avatar moves toward its target X.
pub const POSITION_LERP: f32 = 0.08;
/// How fast the scroll velocity estimate settles.
pub const VELOCITY_SMOOTH: f32 = 0.15;
/// Low-power mode lets velocity settle faster so the avatar doesn't
/// walk forever on trailing noise.
pub const LOW_POWER_VELOCITY_FACTOR: f32 = 1.8;
/// Velocity magnitude above which the avatar is definitely walking.
pub const MOVING_THRESHOLD: f32 = 0.0002;
/// Velocity magnitude below which the avatar *may* go idle.
pub const STILL_THRESHOLD: f32 = 0.0002;
/// How long velocity must stay under the still threshold before idling (s).
pub const STILL_TIME_REQUIRED: f32 = 0.12;
/// How fast the avatar turns toward its facing direction.
pub const ROTATION_LERP: f32 = 0.12;

/// Where the avatar stands while inspecting: slightly left of center so the
/// artwork stays unobstructed.
pub const INSPECT_X: f32 = -1.2;
/// Default stand position while walking.
pub const WALK_X: f32 = 0.0;

/// Linear interpolation.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Frame-time multiplier relative to [`REFERENCE_RATE`], capped.
pub fn frame_scale(dt: f32) -> f32 {
    (dt * REFERENCE_RATE).min(FRAME_SCALE_CAP)
}

/// One damped step of `current` toward `target` with per-reference-frame
/// factor `k`, normalized over elapsed time `dt`.
pub fn damp(current: f32, target: f32, k: f32, dt: f32) -> f32 {
    lerp(current, target, (k * frame_scale(dt)).min(1.0))
}

// ───────────────────────────────────────── gait ──────────────

/// Whether the avatar is currently playing the walk or idle cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gait {
    #[default]
    Idle,
    Walking,
}

/// Horizontal facing, driven by scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

// ───────────────────────────────────────── avatar ────────────

/// Damped lateral avatar position plus the gait/facing signals derived from
/// scroll velocity.
///
/// The gait uses a hysteresis band: above [`MOVING_THRESHOLD`] we walk,
/// below [`STILL_THRESHOLD`] for [`STILL_TIME_REQUIRED`] we idle, and in
/// between we keep whatever we were doing — otherwise velocity jitter near
/// zero makes the avatar stutter between cycles.  Facing never flips inside
/// the band, so the avatar can't spin in place.
#[derive(Debug, Clone)]
pub struct AvatarMotion {
    position: f32,
    target_x: f32,
    /// Damped scroll velocity (offset units per tick).
    velocity: f32,
    prev_offset: f32,
    /// Seconds the velocity has stayed under the still threshold.
    still_time: f32,
    gait: Gait,
    facing: Facing,
    /// Yaw in radians, damped toward the facing direction.
    yaw: f32,
    low_power: bool,
}

impl AvatarMotion {
    pub fn new(low_power: bool) -> Self {
        Self {
            position: WALK_X,
            target_x: WALK_X,
            velocity: 0.0,
            prev_offset: 0.0,
            still_time: 0.0,
            gait: Gait::Idle,
            facing: Facing::Right,
            yaw: Self::yaw_for(Facing::Right),
            low_power,
        }
    }

    fn yaw_for(facing: Facing) -> f32 {
        match facing {
            Facing::Right => -std::f32::consts::FRAC_PI_2,
            Facing::Left => std::f32::consts::FRAC_PI_2,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    pub fn set_target_x(&mut self, x: f32) {
        self.target_x = x;
    }

    pub fn gait(&self) -> Gait {
        self.gait
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Advance one frame: damp position toward the target and re-derive
    /// gait/facing from the smoothed offset's velocity.
    pub fn step(&mut self, smoothed_offset: f32, dt: f32) {
        self.position = damp(self.position, self.target_x, POSITION_LERP, dt);

        let raw_vel = smoothed_offset - self.prev_offset;
        self.prev_offset = smoothed_offset;

        let vel_k = if self.low_power {
            VELOCITY_SMOOTH * LOW_POWER_VELOCITY_FACTOR
        } else {
            VELOCITY_SMOOTH
        };
        self.velocity = damp(self.velocity, raw_vel, vel_k, dt);
        let speed = self.velocity.abs();

        if speed < STILL_THRESHOLD {
            self.still_time += dt;
        } else {
            self.still_time = 0.0;
        }

        self.gait = if speed > MOVING_THRESHOLD {
            Gait::Walking
        } else if self.still_time > STILL_TIME_REQUIRED {
            Gait::Idle
        } else {
            // Hysteresis zone: hold the current gait.
            self.gait
        };

        if speed > STILL_THRESHOLD {
            self.facing = if self.velocity > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            };
        }

        self.yaw = damp(self.yaw, Self::yaw_for(self.facing), ROTATION_LERP, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn frame_scale_is_capped_after_stall() {
        assert!((frame_scale(DT) - 1.0).abs() < 1e-5);
        assert_eq!(frame_scale(1.0), FRAME_SCALE_CAP);
    }

    #[test]
    fn damp_converges_without_overshoot() {
        let mut x = 0.0;
        for _ in 0..600 {
            let next = damp(x, 1.0, 0.08, DT);
            assert!(next >= x && next <= 1.0);
            x = next;
        }
        assert!((x - 1.0).abs() < 0.01);
    }

    #[test]
    fn position_converges_to_target() {
        let mut avatar = AvatarMotion::new(false);
        avatar.set_target_x(INSPECT_X);
        for _ in 0..600 {
            avatar.step(0.0, DT);
        }
        assert!((avatar.position() - INSPECT_X).abs() < 0.05);
    }

    #[test]
    fn sustained_scroll_starts_walking() {
        let mut avatar = AvatarMotion::new(false);
        let mut offset = 0.0;
        for _ in 0..30 {
            offset += 0.005;
            avatar.step(offset, DT);
        }
        assert_eq!(avatar.gait(), Gait::Walking);
        assert_eq!(avatar.facing(), Facing::Right);
    }

    #[test]
    fn idle_requires_sustained_stillness() {
        let mut avatar = AvatarMotion::new(false);
        let mut offset = 0.0;
        for _ in 0..30 {
            offset += 0.005;
            avatar.step(offset, DT);
        }
        assert_eq!(avatar.gait(), Gait::Walking);

        // One still frame is inside the hysteresis window — gait holds.
        avatar.step(offset, DT);
        // Velocity is damped, not zeroed, so walking persists briefly.
        assert_eq!(avatar.gait(), Gait::Walking);

        // A long run of still frames must eventually idle.
        for _ in 0..120 {
            avatar.step(offset, DT);
        }
        assert_eq!(avatar.gait(), Gait::Idle);
    }

    #[test]
    fn facing_flips_on_reverse_scroll() {
        let mut avatar = AvatarMotion::new(false);
        let mut offset = 0.5;
        for _ in 0..30 {
            offset += 0.005;
            avatar.step(offset, DT);
        }
        assert_eq!(avatar.facing(), Facing::Right);
        for _ in 0..60 {
            offset -= 0.005;
            avatar.step(offset, DT);
        }
        assert_eq!(avatar.facing(), Facing::Left);
    }

    #[test]
    fn facing_holds_when_effectively_still() {
        let mut avatar = AvatarMotion::new(false);
        let mut offset = 0.5;
        for _ in 0..30 {
            offset += 0.005;
            avatar.step(offset, DT);
        }
        let before = avatar.facing();
        // Let velocity settle fully below the still threshold.
        for _ in 0..300 {
            avatar.step(offset, DT);
        }
        // Tiny oscillation inside the band must not flip facing.
        avatar.step(offset - 1e-6, DT);
        avatar.step(offset + 1e-6, DT);
        assert_eq!(avatar.facing(), before);
    }

    #[test]
    fn low_power_settles_velocity_faster() {
        let mut normal = AvatarMotion::new(false);
        let mut low = AvatarMotion::new(true);
        let mut offset = 0.0;
        for _ in 0..30 {
            offset += 0.005;
            normal.step(offset, DT);
            low.step(offset, DT);
        }
        // Stop scrolling; count frames until each goes idle.
        let mut frames_normal = 0;
        while normal.gait() == Gait::Walking && frames_normal < 1000 {
            normal.step(offset, DT);
            frames_normal += 1;
        }
        let mut frames_low = 0;
        while low.gait() == Gait::Walking && frames_low < 1000 {
            low.step(offset, DT);
            frames_low += 1;
        }
        assert!(frames_low <= frames_normal);
    }
}
