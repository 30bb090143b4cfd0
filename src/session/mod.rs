//! Interactive display sessions.
//!
//! A [`controller::Session`] owns one drawing surface (a [`window::Window`]) and ticks the
//! feed -> registry -> renderer pipeline until the surface goes away.

pub(crate) mod controller;
pub(crate) mod terminal;
pub(crate) mod window;
