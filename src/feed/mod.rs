//! Pose sources.
//!
//! A [`PoseFeed`] is polled once per session tick. It never blocks and never fails: a source that
//! cannot be read right now yields `None` ("no update"), which is distinct from an empty read
//! (`Some(vec![])`, "no entities").

use crate::scene::pose::Pose;

pub(crate) mod csv;
pub(crate) mod scripted;

/// Polling, non-blocking source of the current entity poses.
pub trait PoseFeed {
    /// Return the complete current pose set, or `None` when no update is available.
    ///
    /// Every `Some` replaces the previous pose set entirely.
    fn read(&mut self) -> Option<Vec<Pose>>;
}

impl<F: PoseFeed + ?Sized> PoseFeed for Box<F> {
    fn read(&mut self) -> Option<Vec<Pose>> {
        (**self).read()
    }
}
