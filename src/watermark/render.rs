// Caption rendering and compositing
//
// Draws the two-bar block onto a transparent overlay the size of the
// source, composites it over the image, and encodes the result. Opaque
// destination formats (jpg, bmp) are flattened before the write.

use image::{imageops, DynamicImage, Rgba, RgbaImage};
use std::path::Path;

use crate::constants::{
    LOCATION_BAR_COLOR, LOCATION_TEXT_COLOR, OPAQUE_EXTENSIONS, TIME_TEXT_COLOR, TITLE_BAR_COLOR,
    TITLE_TEXT_COLOR,
};
use crate::error::{PhotomarkError, Result};

use super::font::resolve_font;
use super::layout::BlockLayout;
use super::text::{draw_text, measure_text};
use super::WatermarkSpec;

/// Render the caption block onto a copy of `source`. The output always has
/// the source's pixel dimensions; the source itself is never mutated.
pub fn render(source: &DynamicImage, spec: &WatermarkSpec) -> Result<RgbaImage> {
    if spec.base_font_size == 0 {
        return Err(PhotomarkError::Render("base font size must be positive".to_string()));
    }

    let mut base = source.to_rgba8();
    let (img_w, img_h) = base.dimensions();

    let font = resolve_font(spec.font_path.as_deref());
    let time_str = spec.time_string();

    let title_size = measure_text(&font, spec.title_font_px(), &spec.title);
    let time_size = measure_text(&font, spec.base_font_px(), &time_str);
    let location_size = measure_text(&font, spec.base_font_px(), &spec.location);

    let layout = BlockLayout::compute(
        title_size,
        time_size,
        location_size,
        spec.base_font_size,
        !spec.title.is_empty(),
    );

    let (x, y) = spec.anchor.resolve(
        img_w,
        img_h,
        layout.width,
        layout.height(),
        spec.padding.0,
        spec.padding.1,
    );

    let mut overlay = RgbaImage::new(img_w, img_h);

    // Title bar with the title and timestamp lines
    fill_rect(&mut overlay, x, y, layout.width, layout.title_bar_height, Rgba(TITLE_BAR_COLOR));
    if !spec.title.is_empty() {
        draw_text(
            &mut overlay,
            &font,
            spec.title_font_px(),
            x + layout.h_pad,
            y + layout.v_pad,
            Rgba(TITLE_TEXT_COLOR),
            &spec.title,
        );
    }
    // The timestamp line is always rendered.
    draw_text(
        &mut overlay,
        &font,
        spec.base_font_px(),
        x + layout.h_pad,
        y + layout.time_line_offset_y(),
        Rgba(TIME_TEXT_COLOR),
        &time_str,
    );

    // Location bar directly below, no gap
    fill_rect(
        &mut overlay,
        x,
        y + layout.title_bar_height,
        layout.width,
        layout.location_bar_height,
        Rgba(LOCATION_BAR_COLOR),
    );
    if !spec.location.is_empty() {
        draw_text(
            &mut overlay,
            &font,
            spec.base_font_px(),
            x + layout.h_pad,
            y + layout.location_text_offset_y(),
            Rgba(LOCATION_TEXT_COLOR),
            &spec.location,
        );
    }

    imageops::overlay(&mut base, &overlay, 0, 0);
    Ok(base)
}

/// Watermark one file end to end. Every failure (load, font, render, save)
/// is caught and logged; callers get a boolean so batch loops keep going.
pub fn apply_to_file(input: &Path, output: &Path, spec: &WatermarkSpec) -> bool {
    match try_apply(input, output, spec) {
        Ok(()) => {
            log::info!(
                "Captioned {} -> {} (anchor {:?})",
                input.display(),
                output.display(),
                spec.anchor
            );
            true
        }
        Err(e) => {
            log::error!("Failed to caption {}: {}", input.display(), e);
            false
        }
    }
}

fn try_apply(input: &Path, output: &Path, spec: &WatermarkSpec) -> Result<()> {
    let source = load_image(input)?;
    let rendered = render(&source, spec)?;
    save_image(&rendered, output)
}

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path)
        .map_err(|e| PhotomarkError::ImageLoad(format!("failed to open {}: {}", path.display(), e)))
}

/// Encode to `path`, flattening the alpha channel when the extension
/// implies an opaque format.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let result = if OPAQUE_EXTENSIONS.contains(&ext.as_str()) {
        DynamicImage::ImageRgba8(img.clone()).to_rgb8().save(path)
    } else {
        img.save(path)
    };

    result.map_err(|e| PhotomarkError::Save(format!("failed to write {}: {}", path.display(), e)))
}

/// Overwrite a rectangle of pixels, clipped to the canvas. Rectangle fills
/// replace pixel values (including alpha); blending happens only at the
/// final composite.
fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    let x_end = (x.saturating_add(w)).min(canvas.width());
    let y_end = (y.saturating_add(h)).min(canvas.height());
    for yy in y..y_end {
        for xx in x..x_end {
            canvas.put_pixel(xx, yy, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watermark::Anchor;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn test_spec() -> WatermarkSpec {
        WatermarkSpec {
            title: "Site record".to_string(),
            location: "North gate".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            anchor: Anchor::BottomRight,
            padding: (30, 30),
            base_font_size: 20,
            font_path: None,
        }
    }

    fn solid_image(w: u32, h: u32, rgb: [u8; 3]) -> DynamicImage {
        let buf = RgbaImage::from_pixel(w, h, Rgba([rgb[0], rgb[1], rgb[2], 255]));
        DynamicImage::ImageRgba8(buf)
    }

    #[test]
    fn test_output_keeps_source_dimensions() {
        let source = solid_image(640, 480, [10, 10, 10]);
        let out = render(&source, &test_spec()).unwrap();
        assert_eq!(out.dimensions(), (640, 480));
    }

    #[test]
    fn test_title_bar_pixel_at_resolved_origin() {
        let source = solid_image(800, 600, [0, 0, 0]);
        let mut spec = test_spec();
        spec.anchor = Anchor::TopLeft;
        spec.padding = (0, 0);

        let out = render(&source, &spec).unwrap();
        // Block origin is (0,0); the title bar is opaque blue there.
        assert_eq!(out.get_pixel(0, 0), &Rgba([20, 120, 220, 255]));
    }

    #[test]
    fn test_location_bar_blends_half_white_over_black() {
        let source = solid_image(800, 600, [0, 0, 0]);
        let mut spec = test_spec();
        spec.anchor = Anchor::TopLeft;
        spec.padding = (0, 0);
        spec.location = String::new();

        // Recompute where the location bar starts.
        let font = resolve_font(None);
        let title_size = measure_text(&font, spec.title_font_px(), &spec.title);
        let time_size = measure_text(&font, spec.base_font_px(), &spec.time_string());
        let layout = BlockLayout::compute(
            title_size,
            time_size,
            crate::watermark::text::TextSize::ZERO,
            spec.base_font_size,
            true,
        );

        let out = render(&source, &spec).unwrap();
        let p = out.get_pixel(1, layout.title_bar_height + 1);
        // 50% white over black lands near mid-gray on every channel.
        for c in 0..3 {
            assert!(
                (115..=140).contains(&p.0[c]),
                "expected mid-gray in the location bar, got {:?}",
                p
            );
        }
    }

    #[test]
    fn test_empty_location_still_draws_bar() {
        let source = solid_image(800, 600, [0, 0, 0]);
        let mut spec = test_spec();
        spec.anchor = Anchor::BottomLeft;
        spec.padding = (0, 0);
        spec.location = String::new();

        let out = render(&source, &spec).unwrap();
        // Bottom-left corner sits inside the location bar: must not be the
        // untouched black base.
        let p = out.get_pixel(1, 599);
        assert_ne!(p, &Rgba([0, 0, 0, 255]), "location bar must be drawn even with no text");
    }

    #[test]
    fn test_zero_font_size_is_a_render_error() {
        let source = solid_image(100, 100, [0, 0, 0]);
        let mut spec = test_spec();
        spec.base_font_size = 0;
        assert!(matches!(render(&source, &spec), Err(PhotomarkError::Render(_))));
    }

    #[test]
    fn test_jpeg_output_is_flattened_opaque() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.png");
        let output = tmp.path().join("out.jpg");
        solid_image(320, 240, [200, 50, 50]).save(&input).unwrap();

        assert!(apply_to_file(&input, &output, &test_spec()));

        let written = image::open(&output).unwrap();
        assert!(
            !written.color().has_alpha(),
            "jpeg output must carry no alpha channel"
        );
    }

    #[test]
    fn test_bmp_output_is_flattened_opaque() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.png");
        let output = tmp.path().join("out.bmp");
        solid_image(320, 240, [200, 50, 50]).save(&input).unwrap();

        assert!(apply_to_file(&input, &output, &test_spec()));

        let written = image::open(&output).unwrap();
        assert!(!written.color().has_alpha(), "bmp output must carry no alpha channel");
    }

    #[test]
    fn test_png_output_keeps_alpha() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.png");
        let output = tmp.path().join("out.png");
        solid_image(320, 240, [200, 50, 50]).save(&input).unwrap();

        assert!(apply_to_file(&input, &output, &test_spec()));

        let written = image::open(&output).unwrap();
        assert!(written.color().has_alpha(), "png output keeps its alpha channel");
    }

    #[test]
    fn test_apply_to_file_reports_failure_on_corrupt_input() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("broken.png");
        let output = tmp.path().join("out.png");
        std::fs::write(&input, b"not an image at all").unwrap();

        assert!(!apply_to_file(&input, &output, &test_spec()));
        assert!(!output.exists(), "no output should appear for a failed load");
    }

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let mut canvas = RgbaImage::new(10, 10);
        // Larger than the canvas on both axes; must not panic.
        fill_rect(&mut canvas, 5, 5, 100, 100, Rgba([1, 2, 3, 255]));
        assert_eq!(canvas.get_pixel(9, 9), &Rgba([1, 2, 3, 255]));
        assert_eq!(canvas.get_pixel(4, 4), &Rgba([0, 0, 0, 0]));
    }
}
