//! The "fire" scene: a row of out-of-phase emitters under additive
//! compositing.

use glam::Vec2;

use crate::canvas::{BlendMode, Color, TextAlign};
use crate::emitter::Emitter;
use crate::particle::ParticleSeed;
use crate::sketch::{Frame, Sketch, SketchConfig};

/// Soft cap on live particles per emitter; an emitter at or over the cap
/// spawns nothing this tick.
pub const EMITTER_CAP: usize = 100;

/// Horizontal emitter spacing as a fraction of the surface width. The
/// leftmost slot (x = 0) is skipped.
const EMITTER_SPACING: f32 = 0.2;

const TITLE: &str = "FIRE EFFECT";
const CREDIT: &str = "AFTER JOHN AFOLAYAN 2018";
/// 221/255 on every channel, the #ddd caption gray.
const CREDIT_GRAY: Color = Color::rgb(221.0 / 255.0, 221.0 / 255.0, 221.0 / 255.0);

pub struct FireScene {
    pub emitters: Vec<Emitter>,
}

/// Build the fire sketch at the given surface size.
pub fn fire(width: u32, height: u32) -> Sketch<FireScene> {
    Sketch::new(
        width,
        height,
        FireScene {
            emitters: Vec::new(),
        },
        SketchConfig {
            setup: Some(Box::new(setup)),
            render: Some(Box::new(render)),
        },
    )
}

/// Place a row of emitters across the width, hues spread over the full
/// wheel and baselines following a sine across the row.
fn setup(frame: &mut Frame<'_>, scene: &mut FireScene) {
    scene.emitters.clear();

    let step = frame.width * EMITTER_SPACING;
    let mut t = 0.0f32;
    let mut x = step;
    while x < frame.width {
        let y = frame.height / 2.0 + (t / 10.0).sin() * 40.0;
        let hue = (x - step) / frame.width * 360.0;
        let tick = frame.rnd.uniform_to(60.0) as u32;
        scene.emitters.push(Emitter::new(x, y, hue, tick));

        t += 10.0;
        x += step;
    }

    frame.set_background(Color::BLACK);
    *frame.tick = 0;
}

fn render(frame: &mut Frame<'_>, scene: &mut FireScene) {
    for emitter in &mut scene.emitters {
        emitter.advance();
    }

    frame.set_background(Color::BLACK);

    frame.canvas.save();
    frame.canvas.set_blend(BlendMode::Additive);
    *frame.tick += 1;

    frame.set_fill(Color::WHITE);
    frame
        .canvas
        .fill_text(TITLE, frame.width / 2.0, 30.0, 28.0, TextAlign::Center);
    frame.rect(frame.width * 0.4, 80.0, frame.width * 0.2, 1.0);
    frame.set_fill(CREDIT_GRAY);
    frame.canvas.fill_text(
        CREDIT,
        frame.width / 2.0,
        frame.height - 30.0,
        14.0,
        TextAlign::Center,
    );

    for emitter in &mut scene.emitters {
        emitter.render(frame.canvas);
    }

    for emitter in &mut scene.emitters {
        if emitter.count() >= EMITTER_CAP {
            continue;
        }

        // Spawn-position jitter is wired up but multiplied out; the
        // draws stay so enabling it is a one-character change.
        let pos = Vec2::new(
            frame.rnd.uniform(-15.0, 15.0) * 0.0,
            frame.rnd.uniform(0.0, -40.0) * 0.0,
        );
        let radius = frame.rnd.uniform(10.0, 15.0);
        let decay = frame.rnd.uniform(0.01, 0.06);
        // The (0.6, 0.12) pair is reversed on purpose; uniform
        // interpolates between them as written.
        let vx = (emitter.tick as f32 / 30.0).sin() * frame.rnd.uniform(0.6, 0.12);
        emitter.tick += 1;
        let vy = frame.rnd.uniform(-0.5, -1.5);

        emitter.spawn(ParticleSeed {
            pos,
            vel: Vec2::new(vx, vy),
            radius,
            alpha: 1.0,
            decay,
        });
    }

    frame.canvas.restore();
}
