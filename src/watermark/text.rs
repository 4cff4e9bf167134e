// Glyph measurement and rasterization

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

/// Ink bounding box of a text run, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSize {
    pub w: u32,
    pub h: u32,
}

impl TextSize {
    pub const ZERO: TextSize = TextSize { w: 0, h: 0 };
}

/// Measure the ink bounding box of `text` at `px` pixels. Empty strings and
/// runs with no visible glyphs (e.g. whitespace) measure (0, 0).
pub fn measure_text(font: &Font<'_>, px: f32, text: &str) -> TextSize {
    if text.is_empty() {
        return TextSize::ZERO;
    }

    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);

    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;

    for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            min_x = min_x.min(bb.min.x);
            min_y = min_y.min(bb.min.y);
            max_x = max_x.max(bb.max.x);
            max_y = max_y.max(bb.max.y);
        }
    }

    if max_x < min_x {
        return TextSize::ZERO;
    }

    TextSize {
        w: (max_x - min_x) as u32,
        h: (max_y - min_y) as u32,
    }
}

/// Draw `text` onto `canvas` with its line box's top-left at `(x, y)`.
/// Glyph coverage blends the fill color over whatever the canvas already
/// holds, so text can sit on an already-drawn bar.
pub fn draw_text(
    canvas: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    x: u32,
    y: u32,
    color: Rgba<u8>,
    text: &str,
) {
    if text.is_empty() {
        return;
    }

    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let baseline = y as f32 + v_metrics.ascent;

    for glyph in font.layout(text, scale, point(x as f32, baseline)) {
        let bb = match glyph.pixel_bounding_box() {
            Some(bb) => bb,
            None => continue,
        };
        glyph.draw(|gx, gy, v| {
            let px_x = gx as i32 + bb.min.x;
            let px_y = gy as i32 + bb.min.y;
            if px_x < 0 || px_y < 0 {
                return;
            }
            let (px_x, px_y) = (px_x as u32, px_y as u32);
            if px_x >= canvas.width() || px_y >= canvas.height() {
                return;
            }
            if v <= 0.0 {
                return;
            }
            let v = v.min(1.0);
            let dst = canvas.get_pixel_mut(px_x, px_y);
            let inv = 1.0 - v;
            for c in 0..4 {
                dst.0[c] = (color.0[c] as f32 * v + dst.0[c] as f32 * inv) as u8;
            }
        });
    }
}
