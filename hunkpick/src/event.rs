//! Event bus for hunkpick.
//!
//! Terminal input, timers and git worker results are normalised into a single
//! `AppEvent` enum and sent over a tokio unbounded MPSC channel. The main loop
//! receives from this channel and dispatches accordingly.
//!
//! Three independent intervals run inside the event task:
//! - **Render** (33 ms ≈ 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick** (250 ms) is reserved for cheap state housekeeping.
//! - **Refresh** (config `refresh_secs`, optional) asks the main loop to reload
//!   the diff so edits made outside hunkpick reach the ownership tracker.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// A mouse event from the terminal (click, scroll, move).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Housekeeping tick (250 ms).
    Tick,
    /// Render tick — triggers a `terminal.draw()` call.
    Render,
    /// Time to reload the current diff.
    Refresh,
    /// Result from the git background thread.
    GitResult(Box<crate::git::types::GitResultPayload>),
    /// Quit signal.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Send half — clone this for each producer (event task, git worker).
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half — owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an interval that skips missed ticks instead of bursting.
fn steady_interval(period: Duration) -> Interval {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

/// Waits for the next refresh tick, or forever when refreshing is disabled.
async fn next_refresh(timer: &mut Option<Interval>) {
    match timer {
        Some(t) => {
            t.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Spawns the background tokio task that drives the unified event channel.
///
/// The task stops once the receiver is dropped and a send fails.
///
/// `reader.next().fuse()` keeps `tokio::select!` from polling a finished
/// crossterm stream. Release/repeat key events are dropped because Windows
/// reports both press and release for every keystroke.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>, refresh: Option<Duration>) {
    tokio::spawn(async move {
        let mut tick_interval = steady_interval(Duration::from_millis(250));
        let mut render_interval = steady_interval(Duration::from_millis(33));
        let mut refresh_interval = refresh.map(|period| {
            let mut timer = steady_interval(period);
            // The first tick fires immediately; the initial load is requested by main.
            timer.reset();
            timer
        });
        let mut reader = EventStream::new();

        loop {
            let crossterm_event = reader.next().fuse();

            let event = tokio::select! {
                _ = tick_interval.tick() => Some(AppEvent::Tick),
                _ = render_interval.tick() => Some(AppEvent::Render),
                _ = next_refresh(&mut refresh_interval) => Some(AppEvent::Refresh),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        Some(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(w, h))) => Some(AppEvent::Resize(w, h)),
                    Some(Ok(Event::Mouse(mouse))) => Some(AppEvent::Mouse(mouse)),
                    _ => None,
                },
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    });
}
