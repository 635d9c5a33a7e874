//! Terminal management
//!
//! Handles terminal setup, teardown, and restoration for the local driver,
//! plus the fixed-size terminals the remote driver draws into. Ensures the
//! local terminal is restored even on panic.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal, TerminalOptions, Viewport};

use crate::error::Result;

/// The local terminal
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Switch `out` to the alternate screen with a hidden cursor
pub fn enter_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, Clear(ClearType::All), Hide)
}

/// Undo [`enter_screen`]
pub fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Show, LeaveAlternateScreen)
}

/// Setup the local terminal for rendering
///
/// - Enables raw mode (no line buffering, no echo)
/// - Enters alternate screen (restore on exit)
pub fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    enter_screen(&mut stdout)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// Restore the local terminal to normal mode
pub fn restore_terminal(mut terminal: Tui) -> Result<()> {
    leave_screen(terminal.backend_mut())?;
    disable_raw_mode()?;
    Ok(())
}

/// Install panic hook to restore terminal on panic
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());

        original_hook(panic_info);
    }));
}

/// A terminal of known size writing to an arbitrary sink
///
/// The viewport never queries the sink for its size; callers resize it
/// explicitly when the peer reports new dimensions.
pub fn fixed_terminal<W: Write>(out: W, width: u16, height: u16) -> io::Result<Terminal<CrosstermBackend<W>>> {
    Terminal::with_options(
        CrosstermBackend::new(out),
        TerminalOptions {
            viewport: Viewport::Fixed(Rect::new(0, 0, width, height)),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_hook_installs() {
        install_panic_hook();
    }

    #[test]
    fn test_enter_and_leave_emit_alternate_screen() {
        let mut out = Vec::new();
        enter_screen(&mut out).unwrap();
        let entered = String::from_utf8_lossy(&out).to_string();
        assert!(entered.contains("\x1b[?1049h"));

        out.clear();
        leave_screen(&mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("\x1b[?1049l"));
    }

    #[test]
    fn test_fixed_terminal_uses_given_size() {
        let mut terminal = fixed_terminal(Vec::new(), 100, 30).unwrap();
        assert_eq!(terminal.get_frame().area(), Rect::new(0, 0, 100, 30));
    }
}
