//! Particle emitters.
//!
//! An emitter sits at an anchor position, owns the particles it has
//! spawned, advances their kinematics each tick and draws them together
//! with a soft two-layer halo at its base. Capacity policy lives in the
//! scene, not here: the emitter appends whatever it is asked to spawn.

use glam::Vec2;

use crate::canvas::{Canvas, Color};
use crate::particle::{Particle, ParticleSeed};

/// Radius shrink per unit of alpha decay. Couples the shrink rate to the
/// fade rate so a particle runs out of size and opacity together.
const SHRINK_PER_DECAY: f32 = 11.0;

/// Hue shift in degrees a particle accumulates over its full fade.
const HUE_SHIFT: f32 = 50.0;

/// A stateful particle source anchored at a moving position.
pub struct Emitter {
    /// Current anchor. `pos.y` bobs around `base_y` over time.
    pub pos: Vec2,
    /// Resting vertical position the bob oscillates around.
    pub base_y: f32,
    /// Hue in degrees all of this emitter's particles start from.
    pub base_hue: f32,
    /// Local animation counter; advanced by the scene on each spawn so
    /// emitters seeded with different offsets stay out of phase.
    pub tick: u32,
    particles: Vec<Particle>,
}

impl Emitter {
    pub fn new(x: f32, y: f32, base_hue: f32, tick: u32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            base_y: y,
            base_hue,
            tick,
            particles: Vec::new(),
        }
    }

    /// Append a live particle built from the given initial state.
    pub fn spawn(&mut self, seed: ParticleSeed) -> &Particle {
        self.particles.push(seed.into());
        &self.particles[self.particles.len() - 1]
    }

    /// Number of live particles.
    pub fn count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Integrate one tick of kinematics, then prune.
    ///
    /// Every particle moves by its velocity, fades by its decay and
    /// shrinks by `decay * 11`. Particles whose radius or alpha crossed
    /// below zero are marked dead and compacted away in the same pass,
    /// so a particle that dies on tick N is gone before tick N renders.
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.alpha -= p.decay;
            p.radius -= p.decay * SHRINK_PER_DECAY;

            if p.radius < 0.0 || p.alpha < 0.0 {
                p.alive = false;
            }
        }

        self.particles.retain(|p| p.alive);
    }

    /// Hue for a particle at the given alpha: aging particles drift up
    /// to [`HUE_SHIFT`] degrees away from the emitter's base hue.
    pub fn particle_hue(&self, alpha: f32) -> f32 {
        self.base_hue + (1.0 - alpha) * HUE_SHIFT
    }

    /// Draw the base halo, update the vertical bob, then draw every live
    /// particle relative to the anchor.
    ///
    /// The halo is two concentric circles squashed to 30% height: a wide
    /// faint wash and a narrow brighter core, both breathing with the
    /// local tick.
    pub fn render(&mut self, surface: &mut dyn Canvas) {
        let breath = (self.tick as f32 / 20.0).sin() * 5.0;

        surface.save();
        surface.translate(self.pos.x, self.base_y + 50.0);
        surface.scale(1.0, 0.3);
        surface.set_alpha(1.0);
        surface.circle(0.0, 0.0, 40.0 + breath);
        surface.set_fill(Color::hsla(self.base_hue, 1.0, 0.55, 0.15));
        surface.fill();
        surface.circle(0.0, 0.0, 10.0 + breath);
        surface.set_fill(Color::hsla(self.base_hue, 1.0, 0.75, 0.45));
        surface.fill();
        surface.restore();

        self.pos.y = self.base_y + (self.tick as f32 / 20.0).sin() * 20.0;

        for p in &self.particles {
            let color = Color::hsla(self.particle_hue(p.alpha), 1.0, 0.55, p.alpha * 0.5);
            surface.set_fill(color);
            surface.circle(p.pos.x + self.pos.x, p.pos.y + self.pos.y, p.radius);
            surface.fill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(radius: f32, alpha: f32, decay: f32) -> ParticleSeed {
        ParticleSeed {
            pos: Vec2::ZERO,
            vel: Vec2::new(0.5, -1.0),
            radius,
            alpha,
            decay,
        }
    }

    #[test]
    fn spawn_appends_one_live_particle() {
        let mut emitter = Emitter::new(100.0, 200.0, 0.0, 0);
        assert_eq!(emitter.count(), 0);

        let p = emitter.spawn(seed(12.0, 1.0, 0.02));
        assert!(p.alive);
        assert_eq!(emitter.count(), 1);
    }

    #[test]
    fn advance_integrates_velocity_and_fades() {
        let mut emitter = Emitter::new(0.0, 0.0, 0.0, 0);
        emitter.spawn(seed(12.0, 1.0, 0.02));
        emitter.advance();

        let p = &emitter.particles()[0];
        assert_eq!(p.pos, Vec2::new(0.5, -1.0));
        assert!((p.alpha - 0.98).abs() < 1e-6);
        assert!((p.radius - (12.0 - 0.02 * 11.0)).abs() < 1e-5);
    }

    #[test]
    fn advance_prunes_exactly_the_dead() {
        let mut emitter = Emitter::new(0.0, 0.0, 0.0, 0);
        // Dies this tick: radius crosses below zero.
        emitter.spawn(seed(0.1, 1.0, 0.05));
        // Dies this tick: alpha crosses below zero.
        emitter.spawn(seed(12.0, 0.01, 0.05));
        // Survives with everything still positive.
        emitter.spawn(seed(12.0, 1.0, 0.01));

        emitter.advance();

        assert_eq!(emitter.count(), 1);
        assert!((emitter.particles()[0].decay - 0.01).abs() < 1e-6);
    }

    #[test]
    fn heavy_decay_empties_the_emitter() {
        let mut emitter = Emitter::new(0.0, 0.0, 0.0, 0);
        emitter.spawn(seed(15.0, 1.0, 0.5));
        for _ in 0..10 {
            emitter.advance();
        }
        assert_eq!(emitter.count(), 0);
    }

    #[test]
    fn particle_hue_endpoints() {
        let emitter = Emitter::new(0.0, 0.0, 120.0, 0);
        assert_eq!(emitter.particle_hue(1.0), 120.0);
        assert_eq!(emitter.particle_hue(0.0), 170.0);
    }
}
