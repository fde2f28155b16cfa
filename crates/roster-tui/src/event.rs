//! Terminal input plus the app's two clocks.
//!
//! A background task merges crossterm input with a tick clock (toasts,
//! throbber) and a render clock, and hands them to the app loop over an
//! unbounded channel.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Events consumed by the app loop.
#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    Tick,
    Render,
}

/// Tick and render periods, set from `--tick-rate` / `--frame-rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rates {
    pub tick: Duration,
    pub render: Duration,
}

impl Rates {
    /// Build from frequencies in Hz. Zero is treated as 1 Hz.
    pub fn from_hz(tick_hz: u32, frame_hz: u32) -> Self {
        let period = |hz: u32| Duration::from_secs(1) / hz.max(1);
        Self {
            tick: period(tick_hz),
            render: period(frame_hz),
        }
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self::from_hz(4, 30)
    }
}

/// Maps a raw crossterm event to an app event. Key releases and repeats,
/// mouse, focus and paste events are dropped.
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}

fn clock(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Owns the reader task; cancelling (or dropping) stops it.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    pub fn spawn(rates: Rates) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(pump(tx, cancel.clone(), rates));
        Self { rx, cancel }
    }

    /// Next event, or `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn pump(tx: mpsc::UnboundedSender<Event>, cancel: CancellationToken, rates: Rates) {
    let mut input = EventStream::new();
    let mut tick = clock(rates.tick);
    let mut render = clock(rates.render);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            _ = tick.tick() => Event::Tick,
            _ = render.tick() => Event::Render,
            Some(Ok(raw)) = input.next() => match translate(raw) {
                Some(event) => event,
                None => continue,
            },
        };
        if tx.send(event).is_err() {
            break;
        }
    }
}
