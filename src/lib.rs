//! Glimmer renders the two ambient animation layers of a page: a particle
//! constellation drifting on a toroidal plane and a smoothed, fading cursor
//! trail. Each engine owns its drawing surface and frame loop:
//!
//! - Build a [`Viewport`] from the host's size and device pixel ratio
//! - Mount a [`ParticleField`] and/or a [`CursorTrail`]
//! - Forward pointer/resize events and drive [`ParticleField::on_frame`] /
//!   [`CursorTrail::on_frame`] from the display loop
//! - Read pixels back via [`CanvasSurface::pixels`], or don't; the engines
//!   draw for their own surface and report nothing
//!
//! Everything is single-threaded and clock-injected, so tests step frames
//! deterministically. Failures to acquire a surface degrade to an inert
//! engine rather than an error at the host.
#![forbid(unsafe_code)]

pub mod field;
mod foundation;
pub mod render;
pub mod runtime;
pub mod trail;

pub use foundation::core::{Point, Rgba8, Vec2, Viewport};
pub use foundation::error::{GlimmerError, GlimmerResult};

pub use field::{FieldOpts, Particle, ParticleField};
pub use render::CanvasSurface;
pub use runtime::{Debounce, FrameScheduler, IntervalTimer};
pub use trail::{CursorTrail, Spring, SpringOpts, TrailBuffer, TrailOpts, TrailPhase};
