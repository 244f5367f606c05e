//! # firesketch
//!
//! A looping decorative animation: a row of particle emitters feeds
//! rising, fading, color-shifting blobs that composite additively into
//! a stylized fire.
//!
//! The crate splits into a small loop-agnostic core and a windowed
//! host:
//!
//! - [`Sketch`] drives the setup-once-then-render-every-tick cycle over
//!   any [`Canvas`], the narrow 2D drawing facade.
//! - [`Emitter`] owns its [`Particle`]s: spawn, per-tick kinematics,
//!   pruning and halo rendering.
//! - [`Random`] supplies uniform and weighted draws for spawn
//!   parameters.
//! - [`scene::fire`] wires emitters, captions and additive compositing
//!   into the fire arrangement.
//! - [`runner::run`] hosts a sketch in a winit window over a wgpu
//!   implementation of the canvas.
//!
//! ## Quick start
//!
//! ```no_run
//! use firesketch::{runner, scene};
//!
//! fn main() -> Result<(), firesketch::SketchError> {
//!     runner::run((640, 480), "Fire Effect", scene::fire)
//! }
//! ```
//!
//! The core never blocks or reads the wall clock; one tick runs to
//! completion per scheduled frame, so tests drive [`Sketch::tick`]
//! directly against a recording canvas.

pub mod canvas;
mod emitter;
pub mod error;
pub mod font;
mod gpu;
mod particle;
mod random;
pub mod runner;
pub mod scene;
mod shader;
mod sketch;
pub mod time;

pub use canvas::{BlendMode, Canvas, Color, TextAlign};
pub use emitter::Emitter;
pub use error::{GpuError, SketchError};
pub use glam::Vec2;
pub use gpu::GpuCanvas;
pub use particle::{Particle, ParticleSeed};
pub use random::Random;
pub use sketch::{clamp, Frame, Sketch, SketchConfig};

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::canvas::{BlendMode, Canvas, Color, TextAlign};
    pub use crate::emitter::Emitter;
    pub use crate::particle::{Particle, ParticleSeed};
    pub use crate::random::Random;
    pub use crate::runner;
    pub use crate::scene;
    pub use crate::sketch::{clamp, Frame, Sketch, SketchConfig};
    pub use crate::Vec2;
}
