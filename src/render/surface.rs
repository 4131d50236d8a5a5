use crate::foundation::core::{Point, Rgba8, Viewport};
use crate::foundation::error::{GlimmerError, GlimmerResult};
use kurbo::Shape;

/// Drawable surface backed by a CPU pixmap sized `viewport × dpr`.
///
/// Drawing happens in logical pixels; `begin` installs the scale transform
/// that maps them onto the physical backing store, the CSS-sizing equivalent
/// for crisp output on high-density displays.
#[derive(Debug)]
pub struct CanvasSurface {
    viewport: Viewport,
    pixmap: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
}

impl CanvasSurface {
    pub fn new(viewport: Viewport) -> GlimmerResult<Self> {
        let (w, h) = backing_dims(viewport)?;
        Ok(Self {
            viewport,
            pixmap: vello_cpu::Pixmap::new(w, h),
            ctx: vello_cpu::RenderContext::new(w, h),
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Backing-store dimensions in physical pixels.
    pub fn physical_size(&self) -> (u16, u16) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// Rebuild the backing store for a new viewport snapshot. Previous pixel
    /// content is discarded.
    pub fn resize(&mut self, viewport: Viewport) -> GlimmerResult<()> {
        let (w, h) = backing_dims(viewport)?;
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        self.ctx = vello_cpu::RenderContext::new(w, h);
        self.viewport = viewport;
        Ok(())
    }

    /// Start a frame: reset queued geometry and install the logical→physical
    /// scale. Returns the drawing context for this frame.
    pub fn begin(&mut self) -> &mut vello_cpu::RenderContext {
        self.ctx.reset();
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::scale(self.viewport.dpr));
        &mut self.ctx
    }

    /// Clear the backing store and rasterize everything queued since `begin`.
    pub fn present(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }

    /// Premultiplied RGBA8 bytes of the backing store.
    pub fn pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }
}

fn backing_dims(viewport: Viewport) -> GlimmerResult<(u16, u16)> {
    let w = (viewport.width * viewport.dpr).round();
    let h = (viewport.height * viewport.dpr).round();
    if w < 1.0 || h < 1.0 {
        return Err(GlimmerError::surface(format!(
            "backing store would be empty: {w}x{h}"
        )));
    }
    if w > f64::from(u16::MAX) || h > f64::from(u16::MAX) {
        return Err(GlimmerError::surface(format!(
            "backing store {w}x{h} exceeds rasterizer limit of {}",
            u16::MAX
        )));
    }
    Ok((w as u16, h as u16))
}

pub(crate) fn paint_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

pub(crate) fn circle_path(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    let circle = kurbo::Circle::new(center, radius);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in circle.path_elements(0.1) {
        out.push(path_el_to_cpu(el));
    }
    out
}

pub(crate) fn segment_path(a: Point, b: Point) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(point_to_cpu(a));
    out.line_to(point_to_cpu(b));
    out
}

pub(crate) fn cubic_path(seg: kurbo::CubicBez) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    out.move_to(point_to_cpu(seg.p0));
    out.curve_to(
        point_to_cpu(seg.p1),
        point_to_cpu(seg.p2),
        point_to_cpu(seg.p3),
    );
    out
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn path_el_to_cpu(el: kurbo::PathEl) -> vello_cpu::kurbo::PathEl {
    use kurbo::PathEl;
    match el {
        PathEl::MoveTo(p) => vello_cpu::kurbo::PathEl::MoveTo(point_to_cpu(p)),
        PathEl::LineTo(p) => vello_cpu::kurbo::PathEl::LineTo(point_to_cpu(p)),
        PathEl::QuadTo(p1, p2) => {
            vello_cpu::kurbo::PathEl::QuadTo(point_to_cpu(p1), point_to_cpu(p2))
        }
        PathEl::CurveTo(p1, p2, p3) => vello_cpu::kurbo::PathEl::CurveTo(
            point_to_cpu(p1),
            point_to_cpu(p2),
            point_to_cpu(p3),
        ),
        PathEl::ClosePath => vello_cpu::kurbo::PathEl::ClosePath,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backing_store_scales_by_pixel_ratio() {
        let vp = Viewport::new(320.0, 240.0, 2.0).unwrap();
        let surface = CanvasSurface::new(vp).unwrap();
        assert_eq!(surface.physical_size(), (640, 480));
        assert_eq!(surface.pixels().len(), 640 * 480 * 4);
    }

    #[test]
    fn oversized_backing_store_is_rejected() {
        let vp = Viewport::new(100_000.0, 100.0, 1.0).unwrap();
        let err = CanvasSurface::new(vp).unwrap_err();
        assert!(err.to_string().contains("surface error:"));
    }

    #[test]
    fn resize_replaces_backing_store() {
        let vp = Viewport::new(100.0, 100.0, 1.0).unwrap();
        let mut surface = CanvasSurface::new(vp).unwrap();
        let next = Viewport::new(50.0, 40.0, 2.0).unwrap();
        surface.resize(next).unwrap();
        assert_eq!(surface.physical_size(), (100, 80));
        assert_eq!(surface.viewport(), next);
    }

    #[test]
    fn present_rasterizes_queued_geometry() {
        let vp = Viewport::new(16.0, 16.0, 1.0).unwrap();
        let mut surface = CanvasSurface::new(vp).unwrap();

        let ctx = surface.begin();
        ctx.set_paint(paint_color(Rgba8::new(255, 255, 255, 255)));
        ctx.fill_path(&circle_path(Point::new(8.0, 8.0), 6.0));
        surface.present();

        assert!(surface.pixels().iter().any(|&b| b != 0));

        // A frame with nothing queued presents as fully transparent.
        surface.begin();
        surface.present();
        assert!(surface.pixels().iter().all(|&b| b == 0));
    }
}
