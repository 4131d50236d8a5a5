use crate::foundation::error::{GlimmerError, GlimmerResult};

pub use kurbo::{Point, Vec2};

/// Logical viewport snapshot: size in CSS-equivalent pixels plus device pixel
/// ratio. Refreshed on resize; drives particle counts and backing-store
/// dimensions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Logical width in pixels.
    pub width: f64,
    /// Logical height in pixels.
    pub height: f64,
    /// Device pixel ratio, clamped to `[1, MAX_DPR]`.
    pub dpr: f64,
}

impl Viewport {
    /// Densities above this buy nothing visually and quadruple the backing store.
    pub const MAX_DPR: f64 = 2.0;

    /// Create a validated viewport. Dimensions must be finite and positive;
    /// the pixel ratio is clamped rather than rejected.
    pub fn new(width: f64, height: f64, dpr: f64) -> GlimmerResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(GlimmerError::config(format!(
                "viewport dimensions must be finite and positive: {width}x{height}"
            )));
        }
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(GlimmerError::config(format!(
                "device pixel ratio must be finite and positive: {dpr}"
            )));
        }
        Ok(Self {
            width,
            height,
            dpr: dpr.clamp(1.0, Self::MAX_DPR),
        })
    }

    /// Logical area in square pixels.
    pub fn area(self) -> f64 {
        self.width * self.height
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha channel replaced by a `[0, 1]` fraction.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}
