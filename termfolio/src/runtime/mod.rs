//! Session driver
//!
//! One session is one dispatcher, one scheduler and one event channel. The
//! loop draws, blocks for the next event, dispatches it and hands the
//! resulting effects to the scheduler. Events already queued are processed
//! before the next draw so fast timers cannot make input lag behind.

pub mod input;
pub mod scheduler;

use crossbeam_channel::Receiver;
use ratatui::{backend::Backend, layout::Rect, Terminal};

use crate::app::{Dispatcher, Event};
use crate::error::{Result, TuiError};

pub use input::InputThread;
pub use scheduler::{perform, Scheduler};

/// Drive a session until the dispatcher asks to quit
///
/// # Errors
///
/// Fails when drawing fails or when every event sender is gone.
pub fn run_session<B: Backend>(
    terminal: &mut Terminal<B>,
    dispatcher: &mut Dispatcher,
    scheduler: &mut Scheduler,
    events: &Receiver<Event>,
) -> Result<()> {
    scheduler.execute(dispatcher.start());

    while !dispatcher.should_quit() {
        terminal.draw(|frame| dispatcher.render(frame))?;

        let event = events
            .recv()
            .map_err(|_| TuiError::Event("event channel closed".to_string()))?;
        step(terminal, dispatcher, scheduler, event)?;

        // one frame per burst of queued events
        while !dispatcher.should_quit() {
            match events.try_recv() {
                Ok(event) => step(terminal, dispatcher, scheduler, event)?,
                Err(_) => break,
            }
        }
    }

    tracing::info!(screen = %dispatcher.state().current_screen, "session ended");
    Ok(())
}

fn step<B: Backend>(
    terminal: &mut Terminal<B>,
    dispatcher: &mut Dispatcher,
    scheduler: &mut Scheduler,
    event: Event,
) -> Result<()> {
    if let Event::Resize(width, height) = event {
        terminal.resize(Rect::new(0, 0, width, height))?;
    }
    scheduler.execute(dispatcher.dispatch(event));
    Ok(())
}
