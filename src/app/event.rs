//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  The
//! reader also owns the frame cadence: a [`AppEvent::Frame`] tick carrying
//! the measured elapsed time fires once per frame period whether or not
//! input arrived, so a sustained burst of wheel events cannot starve the
//! animation.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Per-frame tick; everything animated advances by this many seconds.
    Frame(f32),
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel, interleaved with frame ticks.
pub fn spawn_event_reader(frame_period: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let mut last_frame = Instant::now();
        loop {
            // Poll only for the remainder of the current frame period, so
            // steady input cannot push the next tick out indefinitely.
            let budget = frame_period.saturating_sub(last_frame.elapsed());
            let has_event = event::poll(budget).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => Some(AppEvent::Key(k)),
                        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
                        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(app_event) = app_event {
                        if tx.send(app_event).is_err() {
                            break; // receiver dropped
                        }
                    }
                }
            }

            // A full period has elapsed (with or without input) — tick,
            // reporting how long it actually took.
            let elapsed = last_frame.elapsed();
            if elapsed >= frame_period {
                last_frame = Instant::now();
                if tx.send(AppEvent::Frame(elapsed.as_secs_f32())).is_err() {
                    break;
                }
            }
        }
    });

    rx
}
