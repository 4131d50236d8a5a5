use crate::foundation::core::Point;
use kurbo::CubicBez;

/// Catmull-Rom-style smoothing: one cubic per step, control tangents derived
/// from the immediate neighbors. Fewer than three points yields no segments.
pub(crate) fn catmull_rom_segments(points: &[Point]) -> Vec<CubicBez> {
    if points.len() < 3 {
        return Vec::new();
    }
    let n = points.len();
    let mut out = Vec::with_capacity(n - 2);
    for i in 0..n - 2 {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];
        let c1 = Point::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
        let c2 = Point::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);
        out.push(CubicBez::new(p1, c1, c2, p2));
    }
    out
}

/// Piecewise-linear alpha ramp with stops at t = 0, 0.5 and 1, oldest end of
/// the trail to the newest.
pub(crate) fn ramp_alpha(stops: [f64; 3], t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        stops[0] + (stops[1] - stops[0]) * (t / 0.5)
    } else {
        stops[1] + (stops[2] - stops[1]) * ((t - 0.5) / 0.5)
    }
}
