use crate::config::ChartConfig;
use crate::encode::frames::{FramePattern, write_image};
use crate::foundation::core::{Affine, BezPath, BoundingBox, Canvas, FrameIndex, Rect, Rgba8Premul};
use crate::foundation::error::{SeaError, SeaResult};
use crate::render::frame::FrameRGBA;
use crate::render::registry::PatchRegistry;
use crate::scene::color::{self, depth_bands};
use crate::scene::environment::Environment;
use kurbo::Shape;
use std::path::PathBuf;
use std::sync::Arc;

/// Radius in pixels of point features (rocks).
const POINT_RADIUS_PX: f64 = 3.0;
/// Edge width in pixels when outlines are enabled.
const OUTLINE_WIDTH_PX: f64 = 1.0;

/// CPU chart renderer powered by `vello_cpu`.
///
/// Static layers are rasterized once into a background snapshot. Every repaint restores that
/// snapshot with a single image fill and draws only the visible entity slots on top, so the
/// per-tick cost does not depend on the number of static features.
pub struct ChartRenderer {
    canvas: Canvas,
    chart_area: Rect,
    colorbar: Option<Rect>,
    world_to_px: Affine,
    outline: bool,
    depths: Vec<f64>,
    frames: FramePattern,

    ctx: vello_cpu::RenderContext,
    surface: vello_cpu::Pixmap,
    background: Option<vello_cpu::Image>,
}

impl ChartRenderer {
    /// Create a renderer for the configured canvas and chart extent.
    pub fn new(cfg: &ChartConfig) -> SeaResult<Self> {
        let d = &cfg.display;
        let canvas = Canvas::new(d.canvas.width, d.canvas.height)?;
        let (w, h) = dims_u16(canvas)?;
        let bar = f64::from(d.colorbar_width.min(canvas.width));
        let full_w = f64::from(canvas.width);
        let full_h = f64::from(canvas.height);
        let chart_area = Rect::new(0.0, 0.0, full_w - bar, full_h);
        let colorbar = (bar > 0.0 && !cfg.depths.is_empty())
            .then(|| Rect::new(full_w - bar, 0.0, full_w, full_h));
        let bbox: BoundingBox = cfg.bounding_box()?;

        Ok(Self {
            canvas,
            chart_area,
            colorbar,
            world_to_px: bbox.to_pixels(chart_area.width(), chart_area.height()),
            outline: d.outline,
            depths: cfg.depths.clone(),
            frames: FramePattern::new(cfg.paths.frame_files.clone())?,
            ctx: vello_cpu::RenderContext::new(w, h),
            surface: vello_cpu::Pixmap::new(w, h),
            background: None,
        })
    }

    /// Output size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// World -> pixel transform used for features and hulls.
    pub fn world_to_px(&self) -> Affine {
        self.world_to_px
    }

    /// Frame file pattern used for captures and snapshots.
    pub fn frames(&self) -> &FramePattern {
        &self.frames
    }

    /// Return `true` once the background snapshot exists.
    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    /// Rasterize the static layers and keep the result as the background snapshot.
    ///
    /// The seabed is not drawn as geometry; its color fills the whole surface first. The surface
    /// holds exactly the background afterwards.
    #[tracing::instrument(skip_all)]
    pub fn load_environment(&mut self, env: &Environment) -> SeaResult<()> {
        let base = env
            .bottom()
            .map_or_else(|| color::color("Seabed"), |l| l.color());
        let full = self.full_rect();
        let t = self.world_to_px;
        let outline = self.outline;
        let colorbar = self.colorbar;
        let bands = depth_bands(&self.depths);

        let ctx = &mut self.ctx;
        ctx.reset();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(to_cpu_color(base));
        ctx.fill_rect(&rect_to_cpu(full));

        let mut drawn = 0usize;
        for layer in env.drawn_layers() {
            let face = to_cpu_color(layer.color());
            for ring in layer.polygons() {
                let path = ring_path(ring, t);
                ctx.set_paint(face);
                ctx.fill_path(&path);
                if outline {
                    ctx.set_paint(to_cpu_color(color::outline()));
                    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(OUTLINE_WIDTH_PX));
                    ctx.stroke_path(&path);
                }
                drawn += 1;
            }
            ctx.set_paint(face);
            for &p in layer.points() {
                let dot = kurbo::Circle::new(t * p, POINT_RADIUS_PX);
                let mut path = BezPath::new();
                for el in dot.path_elements(0.1) {
                    path.push(el);
                }
                ctx.fill_path(&bezpath_to_cpu(&path));
                drawn += 1;
            }
        }

        if let Some(bar) = colorbar {
            draw_colorbar(ctx, bar, &bands);
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.surface);

        let snapshot = pixmap_from_premul_bytes(self.surface.data_as_u8_slice(), self.canvas)?;
        self.background = Some(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(snapshot)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        tracing::info!(
            layers = env.layers().len(),
            shapes = drawn,
            "background snapshot captured"
        );
        Ok(())
    }

    /// Restore the background and draw the visible slots of `registry` on top.
    pub fn repaint(&mut self, registry: &PatchRegistry) -> SeaResult<()> {
        let background = self
            .background
            .clone()
            .ok_or_else(|| SeaError::render("repaint before the environment was loaded"))?;
        let full = self.full_rect();
        let t = self.world_to_px;

        let ctx = &mut self.ctx;
        ctx.reset();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(background.clone());
        ctx.fill_rect(&rect_to_cpu(full));

        for slot in registry.visible() {
            ctx.set_paint(to_cpu_color(slot.color()));
            ctx.fill_path(&bezpath_to_cpu(&slot.hull().to_path(t)));
        }

        // Hulls crossing the chart edge must not cover the colorbar.
        if let Some(bar) = self.colorbar {
            ctx.set_paint(background);
            ctx.fill_rect(&rect_to_cpu(bar));
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.surface);
        Ok(())
    }

    /// Current surface content.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.surface.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Persist the surface as the numbered frame `idx`.
    pub fn capture_frame(&self, idx: FrameIndex) -> SeaResult<PathBuf> {
        let path = self.frames.frame_path(idx);
        write_image(&path, &self.frame())?;
        tracing::trace!(frame = idx.0, path = %path.display(), "frame captured");
        Ok(path)
    }

    /// Persist the surface under `name`, outside the frame sequence.
    pub fn save(&self, name: &str) -> SeaResult<PathBuf> {
        let path = self.frames.named_path(name);
        write_image(&path, &self.frame())?;
        tracing::info!(path = %path.display(), "snapshot saved");
        Ok(path)
    }

    fn full_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        )
    }
}

fn draw_colorbar(ctx: &mut vello_cpu::RenderContext, bar: Rect, bands: &[Rgba8Premul]) {
    if bands.is_empty() {
        return;
    }
    let band_h = bar.height() / bands.len() as f64;
    for (i, &c) in bands.iter().enumerate() {
        let y0 = bar.y0 + band_h * i as f64;
        ctx.set_paint(to_cpu_color(c));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(bar.x0, y0, bar.x1, y0 + band_h));
    }
}

fn dims_u16(canvas: Canvas) -> SeaResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| SeaError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| SeaError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

fn ring_path(ring: &[kurbo::Point], t: Affine) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    let mut it = ring.iter();
    if let Some(&first) = it.next() {
        let p = t * first;
        out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y));
        for &q in it {
            let q = t * q;
            out.line_to(vello_cpu::kurbo::Point::new(q.x, q.y));
        }
        out.close_path();
    }
    out
}

fn to_cpu_color(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(bytes: &[u8], canvas: Canvas) -> SeaResult<vello_cpu::Pixmap> {
    let (w, h) = dims_u16(canvas)?;
    if bytes.len() != canvas.rgba_len() {
        return Err(SeaError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
