//! Terminal input thread
//!
//! Polls crossterm for keyboard and resize events and forwards them to the
//! session's event channel. Polling with a short timeout lets the thread
//! notice the stop flag without needing another input.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::Sender;
use crossterm::event::{self, Event as CrosstermEvent};

use crate::app::event::is_press;
use crate::app::Event;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct InputThread {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputThread {
    /// Start reading from the local terminal
    pub fn spawn(events: Sender<Event>) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = std::thread::Builder::new()
            .name("termfolio-input".to_string())
            .spawn(move || read_loop(&events, &flag))?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }
}

impl Drop for InputThread {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn read_loop(events: &Sender<Event>, stop: &AtomicBool) {
    while !stop.load(Ordering::Relaxed) {
        let ready = match event::poll(POLL_INTERVAL) {
            Ok(ready) => ready,
            Err(e) => {
                tracing::error!(error = %e, "terminal poll failed");
                break;
            }
        };
        if !ready {
            continue;
        }
        match event::read() {
            Ok(raw) => {
                if let Some(event) = translate(raw) {
                    if events.send(event).is_err() {
                        break;
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "terminal read failed");
                break;
            }
        }
    }
    tracing::debug!("input thread finished");
}

/// Map a crossterm event to a session event; mouse, focus, paste and key releases are dropped
pub fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) if is_press(&key) => Some(Event::Key(key)),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    #[test]
    fn test_translate_press_and_resize() {
        let key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert!(matches!(translate(CrosstermEvent::Key(key)), Some(Event::Key(k)) if k.code == KeyCode::Char('j')));
        assert!(matches!(translate(CrosstermEvent::Resize(80, 24)), Some(Event::Resize(80, 24))));
    }

    #[test]
    fn test_translate_drops_release_and_focus() {
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(translate(CrosstermEvent::Key(release)).is_none());
        assert!(translate(CrosstermEvent::FocusGained).is_none());
    }
}
