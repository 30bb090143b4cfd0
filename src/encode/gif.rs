use crate::encode::frames::{FramePattern, ensure_parent_dir};
use crate::foundation::error::{SeaError, SeaResult};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Summary of one GIF assembly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationStats {
    /// Frame files found by the pattern.
    pub frames_found: usize,
    /// Frame files that could not be decoded and were left out.
    pub frames_skipped: usize,
    /// Frames written to the GIF, including the held copies of the first and last frame.
    pub frames_written: usize,
}

/// Assemble the numbered frames of `pattern` into an infinitely looping GIF at `out`.
///
/// Each frame lasts `1000 / fps` ms. The first and last frames are repeated `hold` extra times so
/// viewers can see where the loop starts and ends. Unreadable frames, and frames whose size
/// differs from the first readable one, are skipped with a warning.
#[tracing::instrument(skip(pattern), fields(pattern = pattern.as_str()))]
pub fn assemble_gif(
    pattern: &FramePattern,
    out: &Path,
    fps: u32,
    hold: usize,
) -> SeaResult<AnimationStats> {
    if fps == 0 {
        return Err(SeaError::encode("animation fps must be non-zero"));
    }
    let paths = pattern.list_frames()?;
    let mut stats = AnimationStats {
        frames_found: paths.len(),
        ..AnimationStats::default()
    };

    let mut images: Vec<RgbaImage> = Vec::with_capacity(paths.len());
    for p in &paths {
        let img = match image::open(p) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                tracing::warn!(path = %p.display(), error = %e, "skipping unreadable frame");
                stats.frames_skipped += 1;
                continue;
            }
        };
        if let Some(first) = images.first()
            && first.dimensions() != img.dimensions()
        {
            tracing::warn!(
                path = %p.display(),
                expected = ?first.dimensions(),
                got = ?img.dimensions(),
                "skipping frame with mismatched size"
            );
            stats.frames_skipped += 1;
            continue;
        }
        images.push(img);
    }

    let (Some(first), Some(last)) = (images.first(), images.last()) else {
        return Err(SeaError::encode(format!(
            "no readable frames match '{}'",
            pattern.as_str()
        )));
    };

    let mut sequence: Vec<&RgbaImage> = Vec::with_capacity(images.len() + 2 * hold);
    sequence.extend(std::iter::repeat_n(first, hold));
    sequence.extend(images.iter());
    sequence.extend(std::iter::repeat_n(last, hold));

    ensure_parent_dir(out)?;
    let f = File::create(out)
        .map_err(|e| SeaError::encode(format!("create '{}': {e}", out.display())))?;
    let mut enc = GifEncoder::new(BufWriter::new(f));
    enc.set_repeat(Repeat::Infinite)
        .map_err(|e| SeaError::encode(format!("gif repeat: {e}")))?;

    let delay = Delay::from_numer_denom_ms(1000, fps);
    for img in sequence {
        enc.encode_frame(Frame::from_parts(img.clone(), 0, 0, delay))
            .map_err(|e| SeaError::encode(format!("encode gif frame: {e}")))?;
        stats.frames_written += 1;
    }

    tracing::info!(
        out = %out.display(),
        frames = stats.frames_written,
        skipped = stats.frames_skipped,
        "animation written"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
