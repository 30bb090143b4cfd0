//! Frame files and animation output.
//!
//! Captured frames are plain image files named by a [`frames::FramePattern`]; the GIF assembler
//! reads them back in capture order.

pub(crate) mod frames;
pub(crate) mod gif;
