//! Sketch host: owns the surface-facing state and drives the
//! setup-once-then-render-every-tick cycle.
//!
//! A sketch is built from explicit parts: fixed surface dimensions, the
//! caller's scene state `S`, and a [`SketchConfig`] naming the optional
//! `setup` and `render` callbacks. The constructed value is returned to
//! the caller and owned by whoever composes the scene; nothing is
//! stashed in a global.
//!
//! The host itself is loop-agnostic: [`Sketch::tick`] advances exactly
//! one frame against any [`Canvas`], which is what the window runner
//! calls on every redraw and what tests call directly.

use crate::canvas::{Canvas, Color};
use crate::random::Random;

/// Named callback slots for a sketch. Only `setup` and `render` exist;
/// both are optional.
pub struct SketchConfig<S> {
    /// Runs exactly once, strictly before the first `render`.
    pub setup: Option<Box<dyn FnMut(&mut Frame<'_>, &mut S)>>,
    /// Runs every tick, including the tick that ran `setup`.
    pub render: Option<Box<dyn FnMut(&mut Frame<'_>, &mut S)>>,
}

impl<S> Default for SketchConfig<S> {
    fn default() -> Self {
        Self {
            setup: None,
            render: None,
        }
    }
}

/// Per-tick view handed to the callbacks.
///
/// Wraps the core drawing primitives; scene-specific effects (transform,
/// blend mode, text) go straight through the `canvas` field.
pub struct Frame<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub rnd: &'a mut Random,
    pub width: f32,
    pub height: f32,
    /// Global tick counter; scenes increment it as they see fit.
    pub tick: &'a mut u64,
}

impl Frame<'_> {
    pub fn set_background(&mut self, color: Color) {
        self.canvas.set_background(color);
    }

    pub fn set_fill(&mut self, color: Color) {
        self.canvas.set_fill(color);
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.canvas.set_alpha(alpha);
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.canvas.rect(x, y, w, h);
    }

    pub fn circle(&mut self, x: f32, y: f32, radius: f32) {
        self.canvas.circle(x, y, radius);
    }

    pub fn fill(&mut self) {
        self.canvas.fill();
    }
}

/// Host for one animated sketch.
pub struct Sketch<S> {
    width: u32,
    height: u32,
    rnd: Random,
    tick: u64,
    setup_done: bool,
    state: S,
    config: SketchConfig<S>,
}

impl<S> Sketch<S> {
    /// Dimensions must be positive; the host never passes a degenerate
    /// surface, so this is a construction-time contract.
    pub fn new(width: u32, height: u32, state: S, config: SketchConfig<S>) -> Self {
        assert!(
            width > 0 && height > 0,
            "sketch dimensions must be positive"
        );
        Self {
            width,
            height,
            rnd: Random::new(),
            tick: 0,
            setup_done: false,
            state,
            config,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Advance one frame: run `setup` if it has not run yet, then
    /// `render`. One call per scheduled frame; a call always completes
    /// before the next begins.
    pub fn tick(&mut self, canvas: &mut dyn Canvas) {
        let Self {
            width,
            height,
            rnd,
            tick,
            setup_done,
            state,
            config,
        } = self;

        let mut frame = Frame {
            canvas,
            rnd,
            width: *width as f32,
            height: *height as f32,
            tick,
        };

        if !*setup_done {
            if let Some(setup) = config.setup.as_mut() {
                setup(&mut frame, state);
            }
            *setup_done = true;
        }

        if let Some(render) = config.render.as_mut() {
            render(&mut frame, state);
        }
    }
}

/// `x` bounded to `[min, max]`.
pub fn clamp(x: f32, min: f32, max: f32) -> f32 {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{BlendMode, TextAlign};

    struct NullCanvas;

    impl Canvas for NullCanvas {
        fn set_background(&mut self, _color: Color) {}
        fn set_fill(&mut self, _color: Color) {}
        fn set_alpha(&mut self, _alpha: f32) {}
        fn set_blend(&mut self, _mode: BlendMode) {}
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn translate(&mut self, _dx: f32, _dy: f32) {}
        fn scale(&mut self, _sx: f32, _sy: f32) {}
        fn rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {}
        fn circle(&mut self, _x: f32, _y: f32, _radius: f32) {}
        fn fill(&mut self) {}
        fn fill_text(&mut self, _t: &str, _x: f32, _y: f32, _s: f32, _a: TextAlign) {}
    }

    #[derive(Default)]
    struct Log {
        calls: Vec<&'static str>,
    }

    #[test]
    fn setup_runs_once_before_every_render() {
        let mut sketch = Sketch::new(
            64,
            48,
            Log::default(),
            SketchConfig {
                setup: Some(Box::new(|_, log: &mut Log| log.calls.push("setup"))),
                render: Some(Box::new(|_, log: &mut Log| log.calls.push("render"))),
            },
        );

        let mut canvas = NullCanvas;
        for _ in 0..3 {
            sketch.tick(&mut canvas);
        }

        assert_eq!(
            sketch.state().calls,
            vec!["setup", "render", "render", "render"]
        );
    }

    #[test]
    fn missing_callbacks_are_tolerated() {
        let mut sketch = Sketch::new(10, 10, (), SketchConfig::default());
        sketch.tick(&mut NullCanvas);
        sketch.tick(&mut NullCanvas);
    }

    #[test]
    fn frame_exposes_dimensions_and_rng() {
        let mut sketch = Sketch::new(
            640,
            480,
            Vec::new(),
            SketchConfig {
                setup: None,
                render: Some(Box::new(|frame, out: &mut Vec<f32>| {
                    out.push(frame.width);
                    out.push(frame.height);
                    out.push(frame.rnd.uniform(1.0, 2.0));
                    *frame.tick += 1;
                })),
            },
        );

        sketch.tick(&mut NullCanvas);
        assert_eq!(sketch.state()[0], 640.0);
        assert_eq!(sketch.state()[1], 480.0);
        assert!(sketch.state()[2] >= 1.0 && sketch.state()[2] < 2.0);
        assert_eq!(sketch.ticks(), 1);
    }

    #[test]
    #[should_panic(expected = "dimensions must be positive")]
    fn zero_dimensions_are_rejected() {
        let _ = Sketch::new(0, 480, (), SketchConfig::<()>::default());
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }
}
