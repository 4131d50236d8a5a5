//! Pointer trail: a bounded sample buffer rendered as a smoothed, fading
//! stroke, plus two spring-smoothed followers replacing the cursor.

mod spline;
mod spring;

pub use spring::{Spring, SpringOpts};

use crate::foundation::core::{Point, Rgba8, Viewport};
use crate::render::{self, CanvasSurface};
use crate::runtime::{FrameScheduler, IntervalTimer};
use std::collections::VecDeque;
use std::time::Duration;

/// Tunables for [`CursorTrail`]. Fixed at construction time.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct TrailOpts {
    /// Maximum number of retained samples.
    pub max_len: usize,
    /// Minimum pointer travel before a new sample is recorded.
    pub min_spacing: f64,
    /// Period of the oldest-point decay, independent of pointer activity.
    pub decay_period: Duration,
    /// Stroke color; alpha comes from the ramp below.
    pub stroke: Rgba8,
    /// Trail stroke width in logical pixels.
    pub stroke_width: f64,
    /// Alpha at the oldest end, the midpoint, and the newest end.
    pub alpha_stops: [f64; 3],
    /// Radius of the filled follower dot.
    pub dot_radius: f64,
    /// Radius of the follower ring.
    pub ring_radius: f64,
    /// Ring stroke width.
    pub ring_width: f64,
    /// Ring alpha.
    pub ring_alpha: f64,
    /// Follower spring response.
    pub spring: SpringOpts,
}

impl Default for TrailOpts {
    fn default() -> Self {
        Self {
            max_len: 18,
            min_spacing: 8.0,
            decay_period: Duration::from_millis(50),
            stroke: Rgba8::new(255, 255, 255, 255),
            stroke_width: 2.0,
            alpha_stops: [0.0, 0.15, 0.4],
            dot_radius: 6.0,
            ring_radius: 16.0,
            ring_width: 1.0,
            ring_alpha: 0.4,
            spring: SpringOpts::default(),
        }
    }
}

/// Derived trail state; `Rendering` is a function of the buffer length, not a
/// separately tracked flag. Decay is a concurrent process, not a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrailPhase {
    /// Buffer empty.
    Idle,
    /// Fewer points than the spline needs.
    Sampling,
    /// Enough points to stroke the smoothed path every frame.
    Rendering,
}

/// Bounded, insertion-ordered pointer sample buffer with anti-spam spacing.
#[derive(Debug)]
pub struct TrailBuffer {
    points: VecDeque<Point>,
    max_len: usize,
    min_spacing: f64,
}

impl TrailBuffer {
    pub fn new(max_len: usize, min_spacing: f64) -> Self {
        Self {
            points: VecDeque::with_capacity(max_len + 1),
            max_len,
            min_spacing,
        }
    }

    /// Append `p` iff the pointer has traveled more than the minimum spacing
    /// from the last recorded point, evicting oldest-first past the cap.
    /// Returns whether the point was recorded.
    pub fn record(&mut self, p: Point) -> bool {
        if let Some(last) = self.points.back()
            && (p - *last).hypot() <= self.min_spacing
        {
            return false;
        }
        self.points.push_back(p);
        while self.points.len() > self.max_len {
            self.points.pop_front();
        }
        true
    }

    /// Remove the oldest point. Returns whether one was removed.
    pub fn decay(&mut self) -> bool {
        self.points.pop_front().is_some()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn phase(&self) -> TrailPhase {
        match self.points.len() {
            0 => TrailPhase::Idle,
            1..=2 => TrailPhase::Sampling,
            _ => TrailPhase::Rendering,
        }
    }
}

/// Cursor trail engine: sample buffer, decay timer, follower spring, and its
/// own surface and scheduler. Fully independent of [`crate::ParticleField`].
pub struct CursorTrail {
    opts: TrailOpts,
    scheduler: FrameScheduler,
    decay: IntervalTimer,
    surface: Option<CanvasSurface>,
    buffer: TrailBuffer,
    follower: Spring,
    last_frame_at: Option<Duration>,
    disposed: bool,
}

impl CursorTrail {
    /// Mount the trail over a viewport. Comes up inert if the surface cannot
    /// be built.
    pub fn new(viewport: Viewport, opts: TrailOpts) -> Self {
        let surface = match CanvasSurface::new(viewport) {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::warn!(%err, "cursor trail surface unavailable, engine is inert");
                None
            }
        };
        let mut scheduler = FrameScheduler::new();
        scheduler.start();
        Self {
            scheduler,
            decay: IntervalTimer::new(opts.decay_period),
            surface,
            buffer: TrailBuffer::new(opts.max_len, opts.min_spacing),
            // Followers start off-screen until the pointer first moves.
            follower: Spring::new(opts.spring, Point::new(-100.0, -100.0)),
            last_frame_at: None,
            disposed: false,
            opts,
        }
    }

    pub fn opts(&self) -> &TrailOpts {
        &self.opts
    }

    pub fn buffer(&self) -> &TrailBuffer {
        &self.buffer
    }

    pub fn phase(&self) -> TrailPhase {
        self.buffer.phase()
    }

    pub fn follower_position(&self) -> Point {
        self.follower.position()
    }

    pub fn surface(&self) -> Option<&CanvasSurface> {
        self.surface.as_ref()
    }

    pub fn is_inert(&self) -> bool {
        self.disposed || self.surface.is_none()
    }

    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler {
        &mut self.scheduler
    }

    /// Retarget the follower spring and sample the trail buffer. Dropped
    /// while unmounted or after disposal.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if self.is_inert() {
            return;
        }
        let p = Point::new(x, y);
        self.follower.set_target(p);
        self.buffer.record(p);
    }

    /// Remove the oldest sample. Normally driven by the owned interval timer
    /// from `on_frame`, so the trail shrinks to nothing once the pointer
    /// stops.
    pub fn decay_tick(&mut self) -> bool {
        self.buffer.decay()
    }

    /// Rebuild the surface for a new viewport. Trail samples survive; they
    /// are in logical coordinates. Dropped after disposal.
    pub fn on_resize(&mut self, viewport: Viewport) {
        if self.disposed {
            return;
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(err) = surface.resize(viewport) {
            tracing::warn!(%err, "cursor trail surface lost on resize, engine is inert");
            self.surface = None;
        }
    }

    /// One frame: run due decay ticks, advance the follower spring, render.
    /// Decay stays on its own wall-clock interval even while the render loop
    /// is paused; rendering is gated by the scheduler.
    pub fn on_frame(&mut self, now: Duration) {
        if self.disposed {
            return;
        }
        for _ in 0..self.decay.advance(now) {
            self.decay_tick();
        }

        let dt = self
            .last_frame_at
            .and_then(|last| now.checked_sub(last))
            .map(|d| d.as_secs_f64().min(0.1))
            .unwrap_or(0.0);
        self.last_frame_at = Some(now);

        if self.scheduler.begin_frame().is_none() {
            return;
        }
        self.follower.step(dt);
        self.render();
    }

    /// Clear the surface, stroke the smoothed trail when at least three
    /// points are buffered, and always draw the two followers.
    pub fn render(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let ctx = surface.begin();

        if self.buffer.len() >= 3 {
            let points: Vec<Point> = self.buffer.iter().copied().collect();
            let segments = spline::catmull_rom_segments(&points);
            let n = segments.len();
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(self.opts.stroke_width)
                    .with_caps(vello_cpu::kurbo::Cap::Round)
                    .with_join(vello_cpu::kurbo::Join::Round),
            );
            for (i, seg) in segments.iter().enumerate() {
                let t = (i + 1) as f64 / n as f64;
                let alpha = spline::ramp_alpha(self.opts.alpha_stops, t);
                ctx.set_paint(render::paint_color(self.opts.stroke.with_alpha(alpha)));
                ctx.stroke_path(&render::cubic_path(*seg));
            }
        }

        let at = self.follower.position();
        ctx.set_paint(render::paint_color(self.opts.stroke));
        ctx.fill_path(&render::circle_path(at, self.opts.dot_radius));

        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(self.opts.ring_width));
        ctx.set_paint(render::paint_color(
            self.opts.stroke.with_alpha(self.opts.ring_alpha),
        ));
        ctx.stroke_path(&render::circle_path(at, self.opts.ring_radius));

        surface.present();
    }

    /// Tear everything down together: stop the loop, clear the decay timer,
    /// drop the buffer and surface. Later events are dropped.
    pub fn dispose(&mut self) {
        self.scheduler.stop();
        self.decay.reset();
        self.buffer.clear();
        self.surface = None;
        self.disposed = true;
    }
}
