//! Copying advice to the system clipboard

use arboard::Clipboard;
use thiserror::Error;
use tracing::debug;

use crate::data::Advice;

/// Errors that can occur when copying to the clipboard
#[derive(Debug, Error)]
pub enum CopyError {
    /// The clipboard could not be opened or written
    #[error("Copy failed: {0}")]
    CopyFailed(#[from] arboard::Error),
}

impl CopyError {
    /// Short message for the transient notification
    pub fn user_message(&self) -> &'static str {
        "Copy failed"
    }
}

/// Something that accepts plain text, normally the system clipboard
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), CopyError>;
}

/// The system clipboard
///
/// Opened on first use and kept open afterwards: on X11 the copied text is
/// only available while the owning handle is alive.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), CopyError> {
        let clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new()?,
        };
        let clipboard = self.clipboard.insert(clipboard);
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Wraps advice text in literal double quotes
pub fn quoted(text: &str) -> String {
    format!("\"{}\"", text)
}

/// Writes `"<advice text>"` to `writer`
pub fn copy_advice(writer: &mut dyn ClipboardWriter, advice: &Advice) -> Result<(), CopyError> {
    writer.write_text(&quoted(&advice.text))?;
    debug!(id = ?advice.id, "copied advice to clipboard");
    Ok(())
}
