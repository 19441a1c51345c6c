use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard. The underlying handle is opened on first use and
/// kept alive, since some platforms drop the contents when it is closed.
///
/// On X11 and Wayland the owning process serves the contents. Dropping the
/// handle offers them to a running clipboard manager; without one, copied
/// text disappears when the process exits.
#[derive(Default)]
pub struct SystemClipboard {
    #[cfg(not(target_os = "android"))]
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_os = "android"))]
impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|err| ClipboardError::Unavailable(err.to_string()))?,
        };
        let clipboard = self.inner.insert(clipboard);
        clipboard
            .set_text(text.to_owned())
            .map_err(|err| ClipboardError::WriteFailed(err.to_string()))
    }
}

/// Android/Termux does not support arboard; return a clear error.
#[cfg(target_os = "android")]
impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "clipboard is unsupported on Android".into(),
        ))
    }
}
