//! Seachart draws a live sea chart: a static environment (seabed, land, shore, shallows, rocks)
//! with moving ships on top, fed from a pose file that another process rewrites at will.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `ChartConfig -> Environment` (once, before any session starts)
//! 2. **Read**: `PoseFeed -> Option<Vec<Pose>>` (every tick; `None` means "no update")
//! 3. **Reconcile**: `PatchRegistry::reconcile` maps poses onto persistent slots
//! 4. **Repaint**: `ChartRenderer` restores the background snapshot and draws visible slots
//! 5. **Capture**: one numbered frame file per tick, later assembled into a GIF
//!
//! A [`Session`] runs steps 2 to 5 on a single thread, yielding once per tick to its [`Window`]
//! for input. [`Chart`] is the entry point for programs driving a simulation.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No ambient settings**: the configuration is passed explicitly to every component.
//! - **Gapless frames**: every tick writes exactly one frame, whether or not poses changed.
//! - **Premultiplied RGBA8** surfaces, unpremultiplied only when encoding.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chart;
mod config;
mod encode;
mod feed;
mod foundation;
mod render;
mod scene;
mod session;

pub use crate::chart::Chart;
pub use crate::config::{ChartConfig, DisplayConfig, FPS_MAX, PathsConfig};
pub use crate::encode::frames::{
    FRAME_DIGITS, FramePattern, ensure_parent_dir, write_image, write_image_atomic,
};
pub use crate::encode::gif::{AnimationStats, assemble_gif};
pub use crate::feed::PoseFeed;
pub use crate::feed::csv::{CsvPoseFeed, parse_poses, read_poses, write_poses};
pub use crate::feed::scripted::ScriptedPoseFeed;
pub use crate::foundation::core::{
    Affine, BezPath, BoundingBox, Canvas, FrameIndex, Point, Rect, Rgba8Premul, Vec2,
};
pub use crate::foundation::error::{SeaError, SeaResult};
pub use crate::render::cpu::ChartRenderer;
pub use crate::render::frame::FrameRGBA;
pub use crate::render::registry::{PatchRegistry, Slot, SlotPolicy};
pub use crate::scene::color::{color, depth_bands, outline};
pub use crate::scene::environment::{Environment, FeatureKind, Layer, supported_names};
pub use crate::scene::pose::{HULL_BEAM, HULL_LENGTH, Hull, Pose, PoseRecord, SHIP, ship_hull};
pub use crate::session::controller::{Session, SessionOpts, SessionState, SessionStats};
pub use crate::session::terminal::{TerminalLogWriter, TerminalWindow};
pub use crate::session::window::{HeadlessWindow, Key, Window, WindowEvent};
