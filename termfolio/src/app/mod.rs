//! Application core
//!
//! - State: what is true right now
//! - Event: what can happen
//! - Command: what screens ask for in response
//! - Dispatcher: routes events to screens and turns their answers into effects
//!
//! Nothing in here performs I/O; the runtime executes the returned effects.

pub mod command;
pub mod dispatcher;
pub mod event;
pub mod registry;
pub mod state;

// Re-export commonly used types
pub use command::{Command, Effect, Job, Request, TimerId, Update};
pub use dispatcher::Dispatcher;
pub use event::{AsyncResult, Event, NavPayload, NavigationRequest};
pub use state::{AppState, ScreenId};
