// Caption block layout
//
// Pure arithmetic: measured text sizes in, bar geometry out. The block is
// two bars stacked with no gap -- a colored title/time bar on top of a
// semi-transparent location bar.

use crate::constants::{
    BAR_H_PADDING_RATIO, BAR_V_PADDING_RATIO, LOCATION_BAR_V_PAD_FACTOR, TITLE_BAR_EXTRA_PX,
    TITLE_BAR_V_PAD_FACTOR, TITLE_TIME_GAP_RATIO,
};

use super::text::TextSize;

/// Geometry of the caption block, computed per render call.
#[derive(Debug, Clone)]
pub struct BlockLayout {
    /// Overall block width, max of the two bar widths.
    pub width: u32,
    pub title_bar_height: u32,
    pub location_bar_height: u32,
    /// Horizontal inner padding inside both bars.
    pub h_pad: u32,
    /// Vertical end padding unit; the title bar uses 2 of these, the
    /// location bar 10.
    pub v_pad: u32,
    /// Spacing between the title and timestamp lines.
    pub title_time_gap: u32,
    title_height: u32,
    has_title: bool,
}

impl BlockLayout {
    /// Compute bar geometry from the measured ink sizes of the three text
    /// runs. `has_title` reflects the title string's emptiness (a timestamp
    /// line is always present). All ratios truncate to whole pixels.
    pub fn compute(
        title: TextSize,
        time: TextSize,
        location: TextSize,
        base_font_size: u32,
        has_title: bool,
    ) -> Self {
        let base = base_font_size as f32;
        let h_pad = (base * BAR_H_PADDING_RATIO) as u32;
        let v_pad = (base * BAR_V_PADDING_RATIO) as u32;
        let title_time_gap = (base * TITLE_TIME_GAP_RATIO) as u32;

        let gap = if has_title { title_time_gap } else { 0 };
        let title_bar_content_h = title.h + gap + time.h;
        let title_bar_height =
            TITLE_BAR_V_PAD_FACTOR * v_pad + title_bar_content_h + TITLE_BAR_EXTRA_PX;
        let title_bar_width = title.w.max(time.w) + 2 * h_pad;

        let location_bar_height = LOCATION_BAR_V_PAD_FACTOR * v_pad + location.h;
        let location_bar_width = location.w + 2 * h_pad;

        BlockLayout {
            width: title_bar_width.max(location_bar_width),
            title_bar_height,
            location_bar_height,
            h_pad,
            v_pad,
            title_time_gap,
            title_height: title.h,
            has_title,
        }
    }

    /// Total block height; the bars stack directly.
    pub fn height(&self) -> u32 {
        self.title_bar_height + self.location_bar_height
    }

    /// Y offset of the timestamp line within the title bar. Sits below the
    /// title, or at the top inner padding when the title is empty.
    pub fn time_line_offset_y(&self) -> u32 {
        if self.has_title {
            self.v_pad + self.title_height + self.title_time_gap
        } else {
            self.v_pad
        }
    }

    /// Y offset of the location text within the whole block.
    pub fn location_text_offset_y(&self) -> u32 {
        self.title_bar_height + self.v_pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sz(w: u32, h: u32) -> TextSize {
        TextSize { w, h }
    }

    #[test]
    fn test_bar_arithmetic_with_all_fields() {
        // base 40 => h_pad 24, v_pad 12, gap 6
        let layout = BlockLayout::compute(sz(300, 45), sz(260, 30), sz(200, 30), 40, true);

        assert_eq!(layout.h_pad, 24);
        assert_eq!(layout.v_pad, 12);
        assert_eq!(layout.title_time_gap, 6);

        // title bar: 2*12 + (45 + 6 + 30) + 10
        assert_eq!(layout.title_bar_height, 115);
        // location bar: 10*12 + 30
        assert_eq!(layout.location_bar_height, 150);
        // width: max(300, 260) + 48 vs 200 + 48
        assert_eq!(layout.width, 348);
        assert_eq!(layout.height(), 265);
    }

    #[test]
    fn test_empty_title_places_time_at_top_padding() {
        let layout = BlockLayout::compute(sz(0, 0), sz(260, 30), sz(200, 30), 40, false);

        // No title, no gap: content is just the time line.
        assert_eq!(layout.title_bar_height, 2 * 12 + 30 + 10);
        assert_eq!(
            layout.time_line_offset_y(),
            layout.v_pad,
            "empty title must put the timestamp at the bar's top inner padding"
        );
    }

    #[test]
    fn test_time_line_sits_below_title() {
        let layout = BlockLayout::compute(sz(300, 45), sz(260, 30), sz(200, 30), 40, true);
        assert_eq!(layout.time_line_offset_y(), 12 + 45 + 6);
    }

    #[test]
    fn test_empty_location_still_has_padded_bar() {
        let layout = BlockLayout::compute(sz(300, 45), sz(260, 30), sz(0, 0), 40, true);

        // The bar keeps its 10x vertical padding even with no text.
        assert_eq!(layout.location_bar_height, 10 * 12);
        // Width is driven entirely by the title bar.
        assert_eq!(layout.width, 348);
    }

    #[test]
    fn test_location_bar_can_widen_block() {
        let layout = BlockLayout::compute(sz(100, 45), sz(120, 30), sz(500, 30), 40, true);
        assert_eq!(layout.width, 500 + 48);
    }

    #[test]
    fn test_ratios_truncate_like_integer_casts() {
        // base 25 => h_pad 15, v_pad 7 (7.5 truncated), gap 3 (3.75 truncated)
        let layout = BlockLayout::compute(sz(10, 10), sz(10, 10), sz(10, 10), 25, true);
        assert_eq!(layout.h_pad, 15);
        assert_eq!(layout.v_pad, 7);
        assert_eq!(layout.title_time_gap, 3);
    }
}
