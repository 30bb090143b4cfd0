//! Chart rendering.
//!
//! The registry decides what is drawn, the CPU renderer decides how, and [`frame::FrameRGBA`] is
//! the pixel boundary between rendering and encoding.

pub(crate) mod cpu;
pub(crate) mod frame;
pub(crate) mod registry;
