//! The central per-frame step.
//!
//! Every animated quantity advances here, in a fixed order, once per frame.
//! Convergence polling and exit checking are ordinary steps in this
//! sequence, guarded by the mode tag — there are no self-rescheduling
//! callbacks, so cancelling a stale approach is just the tag having moved
//! on by the time the next frame runs.
//!
//! Order matters: the glide moves the raw offset first, the smoothed offset
//! chases it, the avatar reads the smoothed value, and only then does the
//! controller look at the freshly damped quantities.

use super::state::{ActiveView, AppState};

/// Advance one frame by `dt` seconds, as measured by the event reader's
/// frame tick.
pub fn advance(state: &mut AppState, dt: f32) {
    // Startup auto-focus: an implicit select of the first interactive
    // artwork, issued on the first frame so it goes through the exact same
    // approach path as a click.
    if state.config.auto_focus_first && !state.auto_focus_done {
        state.auto_focus_done = true;
        if let Some(ix) = state.layout.first_interactive() {
            state.controller.select(
                ix,
                &state.layout,
                &mut state.scroll,
                &mut state.avatar,
            );
        }
    }

    // 1. Programmatic glide (if any) moves the raw offset.
    state.scroll.step(dt);

    // 2. Smoothed offset chases the raw offset.
    state.smoothed.step(state.scroll.offset(), dt);

    // 3. Avatar chases its target and re-derives gait from the smoothed
    //    offset's velocity.
    state.avatar.step(state.smoothed.value(), dt);

    // 4. Mode transitions, reading the quantities damped above.
    let was_inspecting = state.controller.mode().is_inspect();
    state.controller.poll_convergence(
        state.smoothed.value(),
        state.avatar.position(),
        state.scroll.offset(),
        &state.layout,
    );
    state.controller.check_exit(
        state.smoothed.value(),
        &mut state.scroll,
        &mut state.avatar,
    );

    // Leaving inspect closes the lightbox and resets the carousel.
    if was_inspecting && !state.controller.mode().is_inspect() {
        state.active_view = ActiveView::Gallery;
        state.media_index = 0;
    }

    // 5. Camera chases the framing for whatever mode we ended up in.
    state.camera.step(state.controller.mode(), dt);
}
