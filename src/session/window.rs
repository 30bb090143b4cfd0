use crate::foundation::error::SeaResult;
use crate::render::frame::FrameRGBA;
use std::time::Duration;

/// Keys the session reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Cancel key; requests the window to close.
    Escape,
    /// Any other key, ignored by the session.
    Other,
}

/// Input delivered by a [`Window`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowEvent {
    /// A key was pressed.
    Key(Key),
    /// The user asked to close the window (close button, interrupt).
    CloseRequested,
}

/// Interactive display surface driven by the session.
///
/// `poll_event` is the only place the session yields. Implementations must return within roughly
/// `timeout` whether or not an event arrived.
pub trait Window {
    /// Return `true` while the surface exists.
    fn is_open(&self) -> bool;

    /// Wait at most `timeout` for the next input event.
    fn poll_event(&mut self, timeout: Duration) -> Option<WindowEvent>;

    /// Show `frame` on the surface.
    fn present(&mut self, frame: &FrameRGBA) -> SeaResult<()>;

    /// Destroy the surface. Calling it again is a no-op.
    fn close(&mut self);
}

impl<W: Window + ?Sized> Window for Box<W> {
    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn poll_event(&mut self, timeout: Duration) -> Option<WindowEvent> {
        (**self).poll_event(timeout)
    }

    fn present(&mut self, frame: &FrameRGBA) -> SeaResult<()> {
        (**self).present(frame)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Window without a visible surface, for tests and unattended runs.
///
/// It can replay scripted input events, and it destroys itself after a fixed number of polls,
/// which models a surface closed by something other than the session.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    open: bool,
    close_after: Option<u64>,
    polls: u64,
    events: std::collections::VecDeque<(u64, WindowEvent)>,
    presented: u64,
    close_calls: u64,
    last_frame: Option<FrameRGBA>,
}

impl HeadlessWindow {
    /// Open window that only closes when asked to.
    pub fn unbounded() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    /// Open window that disappears on its own after `polls` polls.
    pub fn closing_after(polls: u64) -> Self {
        Self {
            open: true,
            close_after: Some(polls),
            ..Self::default()
        }
    }

    /// Deliver `event` from the poll with 1-based number `poll`.
    pub fn with_event_at(mut self, poll: u64, event: WindowEvent) -> Self {
        self.events.push_back((poll, event));
        self.events.make_contiguous().sort_by_key(|(p, _)| *p);
        self
    }

    /// Polls observed so far.
    pub fn polls(&self) -> u64 {
        self.polls
    }

    /// Frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Number of `close` calls, including redundant ones.
    pub fn close_calls(&self) -> u64 {
        self.close_calls
    }

    /// Most recently presented frame.
    pub fn last_frame(&self) -> Option<&FrameRGBA> {
        self.last_frame.as_ref()
    }
}

impl Window for HeadlessWindow {
    fn is_open(&self) -> bool {
        self.open
    }

    fn poll_event(&mut self, _timeout: Duration) -> Option<WindowEvent> {
        if !self.open {
            return None;
        }
        self.polls += 1;
        if self.close_after.is_some_and(|n| self.polls >= n) {
            tracing::debug!(polls = self.polls, "headless window destroyed");
            self.open = false;
        }
        match self.events.front() {
            Some(&(at, ev)) if at <= self.polls => {
                self.events.pop_front();
                Some(ev)
            }
            _ => None,
        }
    }

    fn present(&mut self, frame: &FrameRGBA) -> SeaResult<()> {
        self.presented += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
        self.close_calls += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/window.rs"]
mod tests;
