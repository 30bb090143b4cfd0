use crate::foundation::core::FrameIndex;
use crate::foundation::error::{SeaError, SeaResult};
use crate::render::frame::FrameRGBA;
use std::path::{Path, PathBuf};

/// Width of the zero-padded frame number in frame file names.
pub const FRAME_DIGITS: usize = 5;

/// File name pattern for captured frames and snapshots.
///
/// The single `*` in the pattern is replaced by the frame number (zero padded) or by a snapshot
/// name. Zero padding keeps lexical order equal to capture order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FramePattern {
    pattern: String,
}

impl FramePattern {
    /// Wrap a pattern containing exactly one `*`.
    pub fn new(pattern: impl Into<String>) -> SeaResult<Self> {
        let pattern = pattern.into();
        if pattern.matches('*').count() != 1 {
            return Err(SeaError::config(format!(
                "frame pattern '{pattern}' must contain exactly one '*'"
            )));
        }
        Ok(Self { pattern })
    }

    /// The raw pattern, usable as a glob.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Zero-padded frame name for `idx`.
    pub fn frame_name(idx: FrameIndex) -> String {
        format!("{:0width$}", idx.0, width = FRAME_DIGITS)
    }

    /// Path of the numbered frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.named_path(&Self::frame_name(idx))
    }

    /// Path of a snapshot called `name`.
    pub fn named_path(&self, name: &str) -> PathBuf {
        PathBuf::from(self.pattern.replacen('*', name, 1))
    }

    /// All existing files matching the pattern, in lexical order.
    pub fn list(&self) -> SeaResult<Vec<PathBuf>> {
        let entries = glob::glob(&self.pattern)
            .map_err(|e| SeaError::config(format!("invalid frame pattern '{}': {e}", self.pattern)))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable frame path");
                    None
                }
            })
            .collect();
        paths.sort();
        Ok(paths)
    }

    /// Frame number encoded in `path`, if it is a numbered frame of this pattern.
    pub fn frame_index(&self, path: &Path) -> Option<FrameIndex> {
        let (prefix, suffix) = self.pattern.split_once('*')?;
        let s = path.to_str()?;
        let digits = s.strip_prefix(prefix)?.strip_suffix(suffix)?;
        if digits.len() < FRAME_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(FrameIndex)
    }

    /// Existing numbered frames in capture order. Named snapshots are excluded.
    pub fn list_frames(&self) -> SeaResult<Vec<PathBuf>> {
        let mut frames: Vec<(FrameIndex, PathBuf)> = self
            .list()?
            .into_iter()
            .filter_map(|p| self.frame_index(&p).map(|idx| (idx, p)))
            .collect();
        frames.sort_by_key(|(idx, _)| *idx);
        Ok(frames.into_iter().map(|(_, p)| p).collect())
    }

    /// Delete every numbered frame. Named snapshots are kept. Returns how many were removed.
    pub fn clear(&self) -> SeaResult<usize> {
        let mut removed = 0;
        for p in self.list_frames()? {
            std::fs::remove_file(&p)
                .map_err(|e| SeaError::capture(format!("remove frame '{}': {e}", p.display())))?;
            removed += 1;
        }
        Ok(removed)
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> SeaResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            SeaError::capture(format!("create dir '{}': {e}", parent.display()))
        })?;
    }
    Ok(())
}

/// Encode `frame` to `path`; the image format follows the file extension.
pub fn write_image(path: &Path, frame: &FrameRGBA) -> SeaResult<()> {
    let format = image::ImageFormat::from_path(path)
        .map_err(|e| SeaError::capture(format!("image format for '{}': {e}", path.display())))?;
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        format,
    )
    .map_err(|e| SeaError::capture(format!("write image '{}': {e}", path.display())))
}

/// Encode `frame` next to `path` and rename it into place.
///
/// Viewers polling `path` never observe a half-written file.
pub fn write_image_atomic(path: &Path, frame: &FrameRGBA) -> SeaResult<()> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_extension(format!("tmp.{ext}"));
    write_image(&tmp, frame)?;
    std::fs::rename(&tmp, path)
        .map_err(|e| SeaError::capture(format!("replace '{}': {e}", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/frames.rs"]
mod tests;
