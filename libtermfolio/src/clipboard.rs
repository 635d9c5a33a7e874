//! Clipboard access
//!
//! Copying is best effort: a headless box or a remote session usually has no
//! clipboard, and the contact screen just says so.

use std::sync::Mutex;

use crate::error::SourceError;

/// Something that can receive copied text
pub trait ClipboardSink: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), SourceError>;
}

/// System clipboard via `arboard`
///
/// The handle is opened lazily on first copy and kept for the process.
#[derive(Default)]
pub struct ArboardClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for ArboardClipboard {
    fn write_text(&self, text: &str) -> Result<(), SourceError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| SourceError::Clipboard("clipboard lock poisoned".to_string()))?;

        if guard.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|e| SourceError::Clipboard(e.to_string()))?;
            *guard = Some(clipboard);
        }

        match guard.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| SourceError::Clipboard(e.to_string())),
            None => Err(SourceError::Clipboard("no clipboard".to_string())),
        }
    }
}

/// Clipboard that always refuses, for sessions with no local display
pub struct NoClipboard;

impl ClipboardSink for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), SourceError> {
        Err(SourceError::Clipboard("not available in remote sessions".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_clipboard_refuses() {
        let err = NoClipboard.write_text("hello").unwrap_err();
        assert!(matches!(err, SourceError::Clipboard(_)));
    }
}
