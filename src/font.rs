//! Minimal 5x7 bitmap glyphs for caption text.
//!
//! The sketch draws two static captions and nothing else, so the text
//! path is a fixed-pitch pixel font expanded into filled rects rather
//! than a glyph-rasterization dependency. Coverage is uppercase ASCII,
//! digits and the bits of punctuation the captions use; lowercase input
//! is folded to uppercase and anything unknown renders as a blank cell.

use crate::canvas::TextAlign;

/// Glyph cell height in rows. Point size maps to this many rows.
pub const ROWS: f32 = 7.0;

/// Horizontal advance in columns (5 glyph columns + 1 gap).
pub const ADVANCE: f32 = 6.0;

/// Rows of a 5-bit-wide glyph, bit 4 = leftmost column.
type Glyph = [u8; 7];

const BLANK: Glyph = [0; 7];

fn glyph(c: char) -> Glyph {
    match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        _ => BLANK,
    }
}

/// Pixel width of a laid-out line at the given point size.
pub fn measure(text: &str, size: f32) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let cell = size / ROWS;
    (text.chars().count() as f32 * ADVANCE - 1.0) * cell
}

/// Expand a line of text into filled pixel rects `(x, y, w, h)`.
///
/// `y` is the top edge of the line; `size` is the line height in pixels.
pub fn layout(text: &str, x: f32, y: f32, size: f32, align: TextAlign) -> Vec<[f32; 4]> {
    let cell = size / ROWS;
    let origin_x = match align {
        TextAlign::Left => x,
        TextAlign::Center => x - measure(text, size) / 2.0,
    };

    let mut rects = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let glyph_x = origin_x + i as f32 * ADVANCE * cell;
        for (row, bits) in glyph(c).iter().enumerate() {
            for col in 0..5 {
                if bits & (1 << (4 - col)) != 0 {
                    rects.push([
                        glyph_x + col as f32 * cell,
                        y + row as f32 * cell,
                        cell,
                        cell,
                    ]);
                }
            }
        }
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_with_size() {
        // 2 cells of 6 columns minus the trailing gap, at 1px per row.
        assert_eq!(measure("AB", 7.0), 11.0);
        assert_eq!(measure("AB", 14.0), 22.0);
        assert_eq!(measure("", 14.0), 0.0);
    }

    #[test]
    fn centered_layout_straddles_the_anchor() {
        let rects = layout("HI", 100.0, 0.0, 7.0, TextAlign::Center);
        let min_x = rects.iter().map(|r| r[0]).fold(f32::INFINITY, f32::min);
        let max_x = rects
            .iter()
            .map(|r| r[0] + r[2])
            .fold(f32::NEG_INFINITY, f32::max);
        assert!(min_x < 100.0 && max_x > 100.0);
    }

    #[test]
    fn known_glyph_pixel_count() {
        // 'I' rows: 3 + 1 + 1 + 1 + 1 + 1 + 3 set bits.
        let rects = layout("I", 0.0, 0.0, 7.0, TextAlign::Left);
        assert_eq!(rects.len(), 11);
    }

    #[test]
    fn unknown_chars_render_blank_but_advance() {
        let known = layout("AA", 0.0, 0.0, 7.0, TextAlign::Left);
        let with_gap = layout("A#A", 0.0, 0.0, 7.0, TextAlign::Left);
        // Same pixels per 'A'; the unknown cell contributes none but
        // still advances the pen.
        assert_eq!(with_gap.len(), known.len());
        let last_known = known.last().unwrap()[0];
        let last_gap = with_gap.last().unwrap()[0];
        assert!(last_gap > last_known);
    }

    #[test]
    fn lowercase_folds_to_uppercase() {
        assert_eq!(
            layout("fire", 0.0, 0.0, 14.0, TextAlign::Left),
            layout("FIRE", 0.0, 0.0, 14.0, TextAlign::Left)
        );
    }
}
