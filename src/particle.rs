//! Particle data.

use glam::Vec2;

/// One transient visual sample owned by an emitter.
///
/// Position and velocity are relative to the owning emitter's anchor.
/// A particle whose radius or alpha drops below zero is marked dead and
/// removed on the emitter's next prune pass; it is never rendered again.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Opacity in `0..=1`, reduced by `decay` every tick.
    pub alpha: f32,
    /// Per-tick fade rate; also drives shrink (see `Emitter::advance`).
    pub decay: f32,
    pub alive: bool,
}

/// Explicit initial state handed to [`crate::Emitter::spawn`].
///
/// Spawning marks the particle alive; callers only describe where it
/// starts and how fast it fades.
#[derive(Clone, Copy, Debug)]
pub struct ParticleSeed {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alpha: f32,
    pub decay: f32,
}

impl From<ParticleSeed> for Particle {
    fn from(seed: ParticleSeed) -> Self {
        Self {
            pos: seed.pos,
            vel: seed.vel,
            radius: seed.radius,
            alpha: seed.alpha,
            decay: seed.decay,
            alive: true,
        }
    }
}
