use crate::foundation::error::{SeaError, SeaResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Monotonic tick / frame counter used to name captured frames.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
    serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Return the following index.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Output surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas, rejecting sizes the CPU rasterizer cannot address.
    pub fn new(width: u32, height: u32) -> SeaResult<Self> {
        if width == 0 || height == 0 {
            return Err(SeaError::config("canvas width/height must be non-zero"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(SeaError::config(format!(
                "canvas width/height must be <= {}",
                u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Chart extent in world (easting/northing) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    /// Minimum easting.
    pub x_min: f64,
    /// Minimum northing.
    pub y_min: f64,
    /// Maximum easting.
    pub x_max: f64,
    /// Maximum northing.
    pub y_max: f64,
}

impl BoundingBox {
    /// Build from a lower-left origin and a positive `(width, height)` extent.
    pub fn from_origin_extent(origin: [f64; 2], extent: [f64; 2]) -> SeaResult<Self> {
        let [w, h] = extent;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(SeaError::config("extent must be two positive numbers"));
        }
        if !(origin[0].is_finite() && origin[1].is_finite()) {
            return Err(SeaError::config("origin must be two finite numbers"));
        }
        Ok(Self {
            x_min: origin[0],
            y_min: origin[1],
            x_max: origin[0] + w,
            y_max: origin[1] + h,
        })
    }

    /// Width in world units.
    pub fn width(self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height in world units.
    pub fn height(self) -> f64 {
        self.y_max - self.y_min
    }

    /// Return `true` when `p` lies inside the box (boundary inclusive).
    pub fn contains(self, p: Point) -> bool {
        self.x_min <= p.x && p.x <= self.x_max && self.y_min <= p.y && p.y <= self.y_max
    }

    /// Return `true` when the axis-aligned bounds of `r` overlap the box.
    pub fn intersects(self, r: Rect) -> bool {
        r.x0 <= self.x_max && r.x1 >= self.x_min && r.y0 <= self.y_max && r.y1 >= self.y_min
    }

    /// World -> pixel transform mapping this box onto a `w x h` pixel area.
    ///
    /// Northing grows upwards in the world and downwards in pixel space, so the y axis flips.
    /// The scale is uniform; the chart is centered in the area when aspect ratios differ.
    pub fn to_pixels(self, w: f64, h: f64) -> Affine {
        let s = (w / self.width()).min(h / self.height());
        let pad_x = (w - self.width() * s) * 0.5;
        let pad_y = (h - self.height() * s) * 0.5;
        Affine::translate(Vec2::new(pad_x, h - pad_y))
            * Affine::scale_non_uniform(s, -s)
            * Affine::translate(Vec2::new(-self.x_min, -self.y_min))
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque color from straight RGB.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert from straight (non-premultiplied) RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let af = f64::from(a);
            let bf = f64::from(b);
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
