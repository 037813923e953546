use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app loop.
#[derive(Clone, Debug)]
pub enum SessionEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, resize).
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError>;
}

/// Production event source backed by a crossterm reader thread.
pub struct CrosstermEvents {
    rx: Receiver<SessionEvent>,
}

impl CrosstermEvents {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(SessionEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(SessionEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEvents {
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed event source for tests.
pub struct TestEventSource {
    rx: Receiver<SessionEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<SessionEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<SessionEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event at a time, synthesizing a Tick
/// whenever the source stays quiet for a full tick interval.
pub struct Runner<E: EventSource> {
    event_source: E,
    tick_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, tick_interval: Duration) -> Self {
        Self {
            event_source,
            tick_interval,
        }
    }

    pub fn step(&self) -> SessionEvent {
        match self.event_source.recv_timeout(self.tick_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                SessionEvent::Tick
            }
        }
    }
}
