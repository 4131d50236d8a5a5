use crate::foundation::core::{Point, Vec2};

/// Spring parameters for the pointer followers.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct SpringOpts {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringOpts {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 20.0,
            mass: 0.5,
        }
    }
}

/// Damped spring smoother integrated with semi-implicit Euler.
///
/// Large frame deltas are subdivided so the integration stays stable when the
/// host loop hiccups.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    opts: SpringOpts,
    pos: Point,
    vel: Vec2,
    target: Point,
}

impl Spring {
    pub fn new(opts: SpringOpts, at: Point) -> Self {
        Self {
            opts,
            pos: at,
            vel: Vec2::ZERO,
            target: at,
        }
    }

    pub fn set_target(&mut self, target: Point) {
        self.target = target;
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    /// Advance by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        let mass = self.opts.mass.max(1e-6);
        let substeps = (dt / (1.0 / 120.0)).ceil().clamp(1.0, 64.0) as usize;
        let h = dt / substeps as f64;
        for _ in 0..substeps {
            let displacement = self.target - self.pos;
            let accel =
                (displacement * self.opts.stiffness - self.vel * self.opts.damping) / mass;
            self.vel += accel * h;
            self.pos += self.vel * h;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_settles_on_its_target() {
        let mut s = Spring::new(SpringOpts::default(), Point::new(0.0, 0.0));
        s.set_target(Point::new(100.0, 50.0));
        for _ in 0..300 {
            s.step(1.0 / 60.0);
        }
        assert!((s.position() - Point::new(100.0, 50.0)).hypot() < 0.5);
    }

    #[test]
    fn spring_at_rest_stays_put() {
        let mut s = Spring::new(SpringOpts::default(), Point::new(10.0, 10.0));
        s.step(1.0 / 60.0);
        assert_eq!(s.position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn zero_or_bogus_dt_is_ignored() {
        let mut s = Spring::new(SpringOpts::default(), Point::new(0.0, 0.0));
        s.set_target(Point::new(100.0, 0.0));
        s.step(0.0);
        s.step(-1.0);
        s.step(f64::NAN);
        assert_eq!(s.position(), Point::new(0.0, 0.0));
    }

    #[test]
    fn large_steps_do_not_diverge() {
        let mut s = Spring::new(SpringOpts::default(), Point::new(0.0, 0.0));
        s.set_target(Point::new(100.0, 0.0));
        for _ in 0..20 {
            s.step(0.25);
        }
        assert!((s.position().x - 100.0).abs() < 1.0);
    }
}
