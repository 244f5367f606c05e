//! End-to-end checks of the fire scene against a recording canvas.

use firesketch::{scene, BlendMode, Canvas, Color, TextAlign};

#[derive(Debug, Clone, PartialEq)]
enum Draw {
    Background(Color),
    Fill(Color),
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Circle { r: f32 },
    Text(String),
    Blend(BlendMode),
    Save,
    Restore,
}

/// Canvas that records draw calls instead of rasterizing them.
#[derive(Default)]
struct RecordingCanvas {
    draws: Vec<Draw>,
    path: Option<(f32, f32, f32)>,
}

impl Canvas for RecordingCanvas {
    fn set_background(&mut self, color: Color) {
        self.draws.push(Draw::Background(color));
    }

    fn set_fill(&mut self, color: Color) {
        self.draws.push(Draw::Fill(color));
    }

    fn set_alpha(&mut self, _alpha: f32) {}

    fn set_blend(&mut self, mode: BlendMode) {
        self.draws.push(Draw::Blend(mode));
    }

    fn save(&mut self) {
        self.draws.push(Draw::Save);
    }

    fn restore(&mut self) {
        self.draws.push(Draw::Restore);
    }

    fn translate(&mut self, _dx: f32, _dy: f32) {}

    fn scale(&mut self, _sx: f32, _sy: f32) {}

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.draws.push(Draw::Rect { x, y, w, h });
    }

    fn circle(&mut self, x: f32, y: f32, radius: f32) {
        self.path = Some((x, y, radius));
    }

    fn fill(&mut self) {
        if let Some((_, _, r)) = self.path.take() {
            self.draws.push(Draw::Circle { r });
        }
    }

    fn fill_text(&mut self, text: &str, _x: f32, _y: f32, _size: f32, _align: TextAlign) {
        self.draws.push(Draw::Text(text.to_owned()));
    }
}

#[test]
fn first_tick_spawns_one_particle_per_emitter() {
    let mut sketch = scene::fire(640, 480);
    let mut canvas = RecordingCanvas::default();

    sketch.tick(&mut canvas);

    let emitters = &sketch.state().emitters;
    assert_eq!(emitters.len(), 4);
    for emitter in emitters {
        assert_eq!(emitter.count(), 1, "every emitter starts below the cap");
    }

    // Setup clears to black before anything else touches the surface.
    assert_eq!(canvas.draws[0], Draw::Background(Color::BLACK));
}

#[test]
fn tick_draw_order_background_then_additive_glow() {
    let mut sketch = scene::fire(640, 480);
    let mut canvas = RecordingCanvas::default();

    sketch.tick(&mut canvas);

    let draws = &canvas.draws;

    // One background from setup, one from the render pass.
    let backgrounds: Vec<usize> = draws
        .iter()
        .enumerate()
        .filter(|(_, d)| matches!(d, Draw::Background(_)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(backgrounds.len(), 2);

    // Additive mode comes on after the render-pass background and
    // before any glow circle; the scene's final restore undoes it.
    let additive = draws
        .iter()
        .position(|d| *d == Draw::Blend(BlendMode::Additive))
        .expect("additive blend engaged");
    let first_circle = draws
        .iter()
        .position(|d| matches!(d, Draw::Circle { .. }))
        .expect("halos drawn");
    assert!(backgrounds[1] < additive);
    assert!(additive < first_circle);
    assert_eq!(draws.last(), Some(&Draw::Restore));

    // Freshly spawned particles are not visible on their spawn tick, so
    // the first tick draws exactly the two halo layers per emitter.
    let circles = draws
        .iter()
        .filter(|d| matches!(d, Draw::Circle { .. }))
        .count();
    assert_eq!(circles, 8);

    // Title and attribution captions.
    let texts = draws.iter().filter(|d| matches!(d, Draw::Text(_))).count();
    assert_eq!(texts, 2);
}

#[test]
fn particles_become_visible_one_tick_after_spawn() {
    let mut sketch = scene::fire(640, 480);
    let mut canvas = RecordingCanvas::default();
    sketch.tick(&mut canvas);

    canvas.draws.clear();
    sketch.tick(&mut canvas);

    // Tick two draws the 8 halo layers plus the 4 survivors of tick one.
    let circles = canvas
        .draws
        .iter()
        .filter(|d| matches!(d, Draw::Circle { .. }))
        .count();
    assert_eq!(circles, 12);
}

#[test]
fn emitter_population_stays_under_the_cap() {
    let mut sketch = scene::fire(640, 480);
    let mut canvas = RecordingCanvas::default();

    for _ in 0..250 {
        sketch.tick(&mut canvas);
        for emitter in &sketch.state().emitters {
            assert!(emitter.count() <= 100);
        }
        canvas.draws.clear();
    }

    // The population should have reached a live steady state by now.
    for emitter in &sketch.state().emitters {
        assert!(emitter.count() > 0);
    }
}

#[test]
fn fresh_particles_start_at_the_base_hue() {
    let mut sketch = scene::fire(640, 480);
    let mut canvas = RecordingCanvas::default();

    for tick in 1..=3usize {
        sketch.tick(&mut canvas);
        for emitter in &sketch.state().emitters {
            // Below the cap every tick grows each emitter by one, and
            // the newest particle still has full alpha, so the hue law
            // puts it exactly at the emitter's base hue.
            assert_eq!(emitter.count(), tick);
            let newest = emitter.particles().last().unwrap();
            assert_eq!(emitter.particle_hue(newest.alpha), emitter.base_hue);
        }
    }
}

#[test]
fn credit_caption_is_ddd_gray() {
    let mut sketch = scene::fire(640, 480);
    let mut canvas = RecordingCanvas::default();
    sketch.tick(&mut canvas);

    let credit = canvas
        .draws
        .iter()
        .rposition(|d| matches!(d, Draw::Text(_)))
        .expect("credit caption drawn");
    let fill = canvas.draws[..credit]
        .iter()
        .rev()
        .find_map(|d| match d {
            Draw::Fill(color) => Some(*color),
            _ => None,
        })
        .expect("fill set before the caption");

    let gray = 221.0 / 255.0;
    assert_eq!(fill, Color::rgb(gray, gray, gray));
}

#[test]
fn caption_rect_divider_position() {
    let mut sketch = scene::fire(640, 480);
    let mut canvas = RecordingCanvas::default();
    sketch.tick(&mut canvas);

    assert!(canvas.draws.contains(&Draw::Rect {
        x: 640.0 * 0.4,
        y: 80.0,
        w: 640.0 * 0.2,
        h: 1.0,
    }));
}
