//! Ambient particle constellation: free-floating point masses on a toroidal
//! plane, rendered as discs plus a proximity graph.

use crate::foundation::core::{Point, Rgba8, Vec2, Viewport};
use crate::render::{self, CanvasSurface};
use crate::runtime::{Debounce, FrameScheduler};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Tunables for [`ParticleField`]. Fixed at construction time.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct FieldOpts {
    /// Viewport area divided by this yields the particle budget.
    pub density_divisor: f64,
    /// Hard cap on the particle count; keeps the O(n²) link pass cheap.
    pub max_particles: usize,
    /// Maximum pairwise distance at which two particles are linked.
    pub connection_distance: f64,
    /// Link alpha at distance zero; fades linearly to zero at the threshold.
    pub max_link_opacity: f64,
    /// Link stroke width in logical pixels.
    pub link_width: f64,
    /// Disc and link color.
    pub fill: Rgba8,
    /// Quiet period for coalescing resize bursts into one reseed.
    pub resize_quiet: Duration,
}

impl Default for FieldOpts {
    fn default() -> Self {
        Self {
            density_divisor: 25_000.0,
            max_particles: 50,
            connection_distance: 120.0,
            max_link_opacity: 0.25,
            link_width: 0.4,
            // hsl(220, 10%, 80%)
            fill: Rgba8::new(199, 202, 209, 255),
            resize_quiet: Duration::from_millis(200),
        }
    }
}

/// A free-floating point mass. Owned exclusively by the field; reseeded in
/// full on resize, never adjusted in place.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// Position, always inside `[0, width) × [0, height)`.
    pub pos: Point,
    /// Per-frame displacement, small magnitude.
    pub vel: Vec2,
    /// Disc radius in logical pixels.
    pub radius: f64,
}

/// Particle constellation engine. Owns its surface, scheduler, and resize
/// debounce; shares nothing with the trail engine.
pub struct ParticleField {
    opts: FieldOpts,
    scheduler: FrameScheduler,
    resize: Debounce<Viewport>,
    surface: Option<CanvasSurface>,
    particles: Vec<Particle>,
    rng: SmallRng,
}

impl ParticleField {
    /// Mount the field over a viewport. If the drawing surface cannot be
    /// built the field comes up inert instead of failing the host.
    pub fn new(viewport: Viewport, opts: FieldOpts) -> Self {
        Self::with_rng(viewport, opts, SmallRng::from_entropy())
    }

    /// Deterministically seeded variant.
    pub fn with_seed(viewport: Viewport, opts: FieldOpts, seed: u64) -> Self {
        Self::with_rng(viewport, opts, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, opts: FieldOpts, rng: SmallRng) -> Self {
        let surface = match CanvasSurface::new(viewport) {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::warn!(%err, "particle field surface unavailable, engine is inert");
                None
            }
        };
        let mut field = Self {
            opts,
            scheduler: FrameScheduler::new(),
            resize: Debounce::new(opts.resize_quiet),
            surface,
            particles: Vec::new(),
            rng,
        };
        field.reseed();
        field.scheduler.start();
        field
    }

    pub fn opts(&self) -> &FieldOpts {
        &self.opts
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.surface.as_ref()
    }

    /// True when no surface is available and the field does nothing.
    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler {
        &mut self.scheduler
    }

    /// Discard all particles and draw a fresh batch sized to the current
    /// viewport: `min(cap, floor(area / density_divisor))`, uniform positions,
    /// small symmetric velocities, uncorrelated.
    pub fn reseed(&mut self) {
        self.particles.clear();
        let Some(surface) = &self.surface else {
            return;
        };
        let vp = surface.viewport();
        let count = particle_budget(vp, &self.opts);
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles.push(Particle {
                pos: Point::new(
                    self.rng.gen_range(0.0..vp.width),
                    self.rng.gen_range(0.0..vp.height),
                ),
                vel: Vec2::new(
                    (self.rng.r#gen::<f64>() - 0.5) * 0.2,
                    (self.rng.r#gen::<f64>() - 0.5) * 0.2,
                ),
                radius: self.rng.gen_range(0.5..2.0),
            });
        }
        tracing::debug!(count, "reseeded particle field");
    }

    /// Advance every particle by its velocity, wrapping toroidally.
    pub fn step(&mut self) {
        let Some(surface) = &self.surface else {
            return;
        };
        let vp = surface.viewport();
        for p in &mut self.particles {
            p.pos.x = wrap(p.pos.x + p.vel.x, vp.width);
            p.pos.y = wrap(p.pos.y + p.vel.y, vp.height);
        }
    }

    /// Clear the surface, draw every particle as a filled disc, then link
    /// every pair closer than the connection threshold with a fading line.
    pub fn render(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let ctx = surface.begin();

        ctx.set_paint(render::paint_color(self.opts.fill));
        for p in &self.particles {
            ctx.fill_path(&render::circle_path(p.pos, p.radius));
        }

        let threshold_sq = self.opts.connection_distance * self.opts.connection_distance;
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(self.opts.link_width));
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let a = self.particles[i].pos;
                let b = self.particles[j].pos;
                let dist_sq = (a - b).hypot2();
                if dist_sq < threshold_sq {
                    let alpha = link_alpha(dist_sq, threshold_sq, self.opts.max_link_opacity);
                    ctx.set_paint(render::paint_color(self.opts.fill.with_alpha(alpha)));
                    ctx.stroke_path(&render::segment_path(a, b));
                }
            }
        }

        surface.present();
    }

    /// Record a resize. Bursts are coalesced; the reseed happens inside
    /// `on_frame` once the burst has gone quiet. Dropped while inert.
    pub fn on_resize(&mut self, viewport: Viewport, now: Duration) {
        if self.surface.is_none() {
            return;
        }
        self.resize.poke(viewport, now);
    }

    /// One step-then-render cycle, gated by the scheduler.
    pub fn on_frame(&mut self, now: Duration) {
        if let Some(vp) = self.resize.fire(now) {
            self.apply_resize(vp);
        }
        if self.scheduler.begin_frame().is_none() {
            return;
        }
        self.step();
        self.render();
    }

    /// Stop the loop and release the surface. Further events are dropped.
    pub fn dispose(&mut self) {
        self.scheduler.stop();
        self.resize.cancel();
        self.particles.clear();
        self.surface = None;
    }

    fn apply_resize(&mut self, viewport: Viewport) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        match surface.resize(viewport) {
            Ok(()) => self.reseed(),
            Err(err) => {
                tracing::warn!(%err, "particle field surface lost on resize, engine is inert");
                self.surface = None;
                self.particles.clear();
            }
        }
    }
}

/// `min(cap, floor(area / divisor))`.
pub(crate) fn particle_budget(viewport: Viewport, opts: &FieldOpts) -> usize {
    let by_area = (viewport.area() / opts.density_divisor).floor() as usize;
    by_area.min(opts.max_particles)
}

/// Toroidal wrap into `[0, max)`. Assumes per-step displacement is far
/// smaller than `max`, so one correction suffices.
fn wrap(v: f64, max: f64) -> f64 {
    if v >= max {
        v - max
    } else if v < 0.0 {
        v + max
    } else {
        v
    }
}

/// Linear fade from `max_opacity` at distance zero to 0 at the threshold.
pub(crate) fn link_alpha(dist_sq: f64, threshold_sq: f64, max_opacity: f64) -> f64 {
    (1.0 - dist_sq / threshold_sq) * max_opacity
}
