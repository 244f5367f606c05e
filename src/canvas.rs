//! The 2D drawing surface the sketch talks to.
//!
//! Scenes never touch wgpu directly; they draw through the [`Canvas`]
//! trait, a narrow immediate-mode facade (background wash, fill color,
//! global alpha, rects, circle paths) plus the handful of one-off state
//! operations the fire scene needs: save/restore, translate/scale,
//! blend mode and caption text. Keeping the trait object-safe lets
//! tests substitute a recording surface for the GPU one.

/// Straight-alpha RGBA color, channels in `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from hue (degrees, wraps), saturation, lightness and alpha.
    ///
    /// Emitter hues run past 360 as particles age, so the hue is wrapped
    /// rather than clamped.
    pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = hue.rem_euclid(360.0);
        let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = lightness - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u32 % 6 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::rgba(r + m, g + m, b + m, alpha)
    }

    /// This color with its alpha multiplied by `factor`.
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }
}

/// How draws composite against what is already on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending.
    #[default]
    Alpha,
    /// Colors sum toward brightness; overlapping glows brighten instead
    /// of darkening. The 2D-canvas "lighter" mode.
    Additive,
}

/// Horizontal anchoring for [`Canvas::fill_text`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Immediate-mode 2D drawing surface.
///
/// Coordinates are in pixels with the origin at the top-left. `circle`
/// begins the current path and `fill` fills it with the current style;
/// `rect` and `set_background` fill immediately. The current style is
/// fill color, global alpha, blend mode and the translate/scale
/// transform; `save`/`restore` stack all of it.
pub trait Canvas {
    /// Fill the whole surface with a solid color, ignoring the current
    /// transform and alpha.
    fn set_background(&mut self, color: Color);

    fn set_fill(&mut self, color: Color);

    /// Global alpha multiplier applied on top of the fill color's alpha.
    fn set_alpha(&mut self, alpha: f32);

    fn set_blend(&mut self, mode: BlendMode);

    /// Push the current style and transform.
    fn save(&mut self);

    /// Pop back to the most recently saved style and transform.
    fn restore(&mut self);

    fn translate(&mut self, dx: f32, dy: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    /// Fill an axis-aligned rectangle with the current style.
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Begin a circular path centered at `(x, y)`.
    fn circle(&mut self, x: f32, y: f32, radius: f32);

    /// Fill the current path with the current style.
    fn fill(&mut self);

    /// Draw a line of text with its top edge at `y`. `size` is the glyph
    /// height in pixels.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, align: TextAlign);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Color, expected: (f32, f32, f32)) {
        assert!((actual.r - expected.0).abs() < 1e-3, "r: {actual:?}");
        assert!((actual.g - expected.1).abs() < 1e-3, "g: {actual:?}");
        assert!((actual.b - expected.2).abs() < 1e-3, "b: {actual:?}");
    }

    #[test]
    fn hsla_primaries() {
        assert_close(Color::hsla(0.0, 1.0, 0.5, 1.0), (1.0, 0.0, 0.0));
        assert_close(Color::hsla(120.0, 1.0, 0.5, 1.0), (0.0, 1.0, 0.0));
        assert_close(Color::hsla(240.0, 1.0, 0.5, 1.0), (0.0, 0.0, 1.0));
    }

    #[test]
    fn hsla_wraps_hue() {
        assert_eq!(
            Color::hsla(410.0, 1.0, 0.55, 0.5),
            Color::hsla(50.0, 1.0, 0.55, 0.5)
        );
    }

    #[test]
    fn hsla_zero_saturation_is_gray() {
        let gray = Color::hsla(200.0, 0.0, 0.4, 1.0);
        assert_close(gray, (0.4, 0.4, 0.4));
    }

    #[test]
    fn alpha_scaling_leaves_rgb_untouched() {
        let c = Color::rgba(0.2, 0.4, 0.6, 0.8).with_alpha_scaled(0.5);
        assert_eq!((c.r, c.g, c.b), (0.2, 0.4, 0.6));
        assert!((c.a - 0.4).abs() < 1e-6);
    }
}
