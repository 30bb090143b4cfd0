use crate::encode::frames::write_image_atomic;
use crate::foundation::error::{SeaError, SeaResult};
use crate::render::frame::FrameRGBA;
use crate::session::window::{Key, Window, WindowEvent};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;

/// Window bound to the controlling terminal.
///
/// Keyboard input is read in raw mode: `Esc` cancels and `Ctrl+C` requests a close. The visible
/// surface is an optional preview image, atomically replaced on every `present`, which any image
/// viewer that reloads on change can show live.
///
/// When stdin is not a terminal there is no input; polls only wait out their timeout.
pub struct TerminalWindow {
    open: bool,
    raw: bool,
    preview: Option<PathBuf>,
}

impl TerminalWindow {
    /// Open the window, switching the terminal to raw mode when possible.
    pub fn open(preview: Option<PathBuf>) -> SeaResult<Self> {
        let raw = std::io::stdin().is_terminal();
        if raw {
            crossterm::terminal::enable_raw_mode()
                .map_err(|e| SeaError::config(format!("enable terminal raw mode: {e}")))?;
        }
        tracing::debug!(raw, preview = ?preview, "terminal window opened");
        Ok(Self {
            open: true,
            raw,
            preview,
        })
    }
}

impl Window for TerminalWindow {
    fn is_open(&self) -> bool {
        self.open
    }

    fn poll_event(&mut self, timeout: Duration) -> Option<WindowEvent> {
        if !self.open {
            return None;
        }
        if !self.raw {
            std::thread::sleep(timeout);
            return None;
        }
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) => map_key(key),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!(error = %e, "terminal read failed");
                    None
                }
            },
            Ok(false) => None,
            Err(e) => {
                // The terminal is gone; nothing can reach the session anymore.
                tracing::warn!(error = %e, "terminal poll failed");
                Some(WindowEvent::CloseRequested)
            }
        }
    }

    fn present(&mut self, frame: &FrameRGBA) -> SeaResult<()> {
        match &self.preview {
            Some(path) => write_image_atomic(path, frame),
            None => Ok(()),
        }
    }

    fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        if self.raw {
            if let Err(e) = crossterm::terminal::disable_raw_mode() {
                tracing::warn!(error = %e, "failed to restore terminal mode");
            }
            self.raw = false;
        }
        tracing::debug!("terminal window closed");
    }
}

impl Drop for TerminalWindow {
    fn drop(&mut self) {
        self.close();
    }
}

/// Log sink that keeps lines readable while a [`TerminalWindow`] holds the terminal in raw mode.
///
/// Raw mode disables the `\n` -> `\r\n` translation, so bare newlines are expanded here while
/// it is active. Outside raw mode bytes pass through untouched.
pub struct TerminalLogWriter<W> {
    inner: W,
}

impl TerminalLogWriter<std::io::Stderr> {
    /// Writer over stderr, usable as a `tracing-subscriber` writer factory.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write> TerminalLogWriter<W> {
    /// Wrap `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for TerminalLogWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if crossterm::terminal::is_raw_mode_enabled().unwrap_or(false) {
            self.inner.write_all(&expand_newlines(buf))?;
            Ok(buf.len())
        } else {
            self.inner.write(buf)
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

fn expand_newlines(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len() + 8);
    let mut prev = 0u8;
    for &b in buf {
        if b == b'\n' && prev != b'\r' {
            out.push(b'\r');
        }
        out.push(b);
        prev = b;
    }
    out
}

fn map_key(key: KeyEvent) -> Option<WindowEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(WindowEvent::Key(Key::Escape)),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(WindowEvent::CloseRequested)
        }
        _ => Some(WindowEvent::Key(Key::Other)),
    }
}
