//! Chart configuration.
//!
//! A [`ChartConfig`] is parsed and validated once at startup, then handed by reference to the
//! feed, renderer and session constructors. Nothing reads settings ambiently.

use crate::foundation::core::{BoundingBox, Canvas};
use crate::foundation::error::{SeaError, SeaResult};
use crate::render::registry::SlotPolicy;
use crate::scene::environment::FeatureKind;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound accepted for `display.fps`.
pub const FPS_MAX: u32 = 144;

/// Top-level chart configuration document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    /// Lower-left chart corner (easting, northing).
    pub origin: [f64; 2],
    /// Chart `(width, height)` in chart units.
    pub extent: [f64; 2],
    /// Depth bins shown by the colorbar, shallow first.
    #[serde(default)]
    pub depths: Vec<f64>,
    /// Feature layers to load.
    pub features: Vec<String>,
    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// File locations.
    pub paths: PathsConfig,
}

/// Display / session settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Animation frame rate, also the GIF hold-time repeat count.
    pub fps: u32,
    /// Output surface size.
    pub canvas: Canvas,
    /// Width of the depth colorbar strip in pixels; `0` disables it.
    pub colorbar_width: u32,
    /// Hull scale factor.
    pub ship_scale: f64,
    /// Draw feature edges in black instead of the face color.
    pub outline: bool,
    /// Per-tick yield in milliseconds.
    pub tick_quantum_ms: u64,
    /// How poses are matched to rendered slots.
    pub identity: SlotPolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 20,
            canvas: Canvas {
                width: 800,
                height: 600,
            },
            colorbar_width: 40,
            ship_scale: 1.0,
            outline: false,
            tick_quantum_ms: 1,
            identity: SlotPolicy::Index,
        }
    }
}

impl DisplayConfig {
    /// Per-tick yield as a duration.
    pub fn tick_quantum(&self) -> Duration {
        Duration::from_millis(self.tick_quantum_ms)
    }
}

/// File locations. Relative paths are resolved against the config file's directory.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Static feature geometry (JSON).
    pub environment: PathBuf,
    /// Pose source CSV.
    pub ships: PathBuf,
    /// Directory holding captured frames; created when a chart is opened.
    pub frames_dir: PathBuf,
    /// Frame file pattern; exactly one `*` is replaced by the frame name.
    pub frame_files: String,
    /// Assembled animation output.
    pub simulation: PathBuf,
    /// Optional live preview image rewritten on every flush.
    #[serde(default)]
    pub preview: Option<PathBuf>,
}

impl ChartConfig {
    /// Parse from a JSON reader. Paths are kept as written.
    pub fn from_reader<R: std::io::Read>(r: R) -> SeaResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SeaError::serde(format!("parse chart config JSON: {e}")))
    }

    /// Parse from a JSON file and resolve relative paths against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> SeaResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SeaError::config(format!("open chart config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let Some(dir) = path.parent() {
            cfg.resolve_paths(dir);
        }
        Ok(cfg)
    }

    /// Rebase every relative path onto `root`.
    pub fn resolve_paths(&mut self, root: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = root.join(&*p);
            }
        };
        let p = &mut self.paths;
        rebase(&mut p.environment);
        rebase(&mut p.ships);
        rebase(&mut p.frames_dir);
        rebase(&mut p.simulation);
        if let Some(preview) = p.preview.as_mut() {
            rebase(preview);
        }
        if Path::new(&p.frame_files).is_relative() {
            p.frame_files = root.join(&p.frame_files).to_string_lossy().into_owned();
        }
    }

    /// Validate all fields, reporting the first violation.
    pub fn validate(&self) -> SeaResult<()> {
        self.bounding_box()?;
        self.feature_kinds()?;
        if self.depths.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(SeaError::config("depth bins must be non-negative"));
        }

        let d = &self.display;
        if d.fps == 0 || d.fps > FPS_MAX {
            return Err(SeaError::config(format!(
                "fps '{}' not supported, should be 0 < fps <= {FPS_MAX}",
                d.fps
            )));
        }
        Canvas::new(d.canvas.width, d.canvas.height)?;
        if d.colorbar_width >= d.canvas.width {
            return Err(SeaError::config(
                "colorbar_width must be smaller than the canvas width",
            ));
        }
        if !(d.ship_scale.is_finite() && d.ship_scale > 0.0) {
            return Err(SeaError::config("ship_scale must be a positive number"));
        }

        let stars = self.paths.frame_files.matches('*').count();
        if stars != 1 {
            return Err(SeaError::config(format!(
                "frame_files '{}' must contain exactly one '*'",
                self.paths.frame_files
            )));
        }
        if !Path::new(&self.paths.frame_files).starts_with(&self.paths.frames_dir) {
            return Err(SeaError::config(format!(
                "frame_files '{}' must live under frames_dir '{}'",
                self.paths.frame_files,
                self.paths.frames_dir.display()
            )));
        }
        Ok(())
    }

    /// Chart extent as a bounding box.
    pub fn bounding_box(&self) -> SeaResult<BoundingBox> {
        BoundingBox::from_origin_extent(self.origin, self.extent)
    }

    /// Requested feature layers, in draw order.
    pub fn feature_kinds(&self) -> SeaResult<Vec<FeatureKind>> {
        let mut kinds = self
            .features
            .iter()
            .map(|name| FeatureKind::from_name(name))
            .collect::<SeaResult<Vec<_>>>()?;
        kinds.sort();
        kinds.dedup();
        Ok(kinds)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
