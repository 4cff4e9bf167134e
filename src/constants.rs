// Photomark Constants
// Layout ratios and colors reproduce the reference caption style exactly.
// Do not change without re-checking the layout tests.

// Bar and text colors (RGBA)
pub const TITLE_BAR_COLOR: [u8; 4] = [20, 120, 220, 255];
pub const TITLE_TEXT_COLOR: [u8; 4] = [255, 255, 255, 255];
pub const TIME_TEXT_COLOR: [u8; 4] = [240, 240, 240, 255];
pub const LOCATION_BAR_COLOR: [u8; 4] = [255, 255, 255, 128];
pub const LOCATION_TEXT_COLOR: [u8; 4] = [0, 0, 0, 255];

// Font scaling
pub const TITLE_FONT_SCALE: f32 = 1.4;

// Inner paddings relative to the base font size (truncated to pixels)
pub const BAR_H_PADDING_RATIO: f32 = 0.6;
pub const BAR_V_PADDING_RATIO: f32 = 0.3;
pub const TITLE_TIME_GAP_RATIO: f32 = 0.15;

// Fixed extra height on the title bar for visual balance
pub const TITLE_BAR_EXTRA_PX: u32 = 10;

// Vertical padding multipliers per bar. The location bar's 10x is
// intentional-looking but inherited; it produces the large bottom band.
pub const TITLE_BAR_V_PAD_FACTOR: u32 = 2;
pub const LOCATION_BAR_V_PAD_FACTOR: u32 = 10;

// Timestamp rendering
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Accepted input extensions (case-insensitive match)
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

// Output extensions that cannot carry an alpha channel
pub const OPAQUE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "bmp"];

// Batch time increment jitter ranges, seconds (inclusive)
pub const INCREMENT_ONE_MIN_SECS: (i64, i64) = (61, 89);
pub const INCREMENT_TWO_MIN_SECS: (i64, i64) = (117, 139);
pub const INCREMENT_FIVE_MIN_SECS: (i64, i64) = (311, 325);
pub const INCREMENT_TEN_MIN_SECS: (i64, i64) = (607, 611);
pub const INCREMENT_RANDOM_SECS: (i64, i64) = (60, 300);

// Font resolution
pub const BUNDLED_FONT_DIR: &str = "assets/fonts";
pub const BUNDLED_FONT_FILES: [&str; 2] = ["DejaVuSans.ttf", "arial.ttf"];

#[cfg(target_os = "windows")]
pub const SYSTEM_FONT_CANDIDATES: [&str; 3] = [
    "C:/Windows/Fonts/arial.ttf",
    "C:/Windows/Fonts/arialuni.ttf",
    "C:/Windows/Fonts/segoeui.ttf",
];

#[cfg(target_os = "macos")]
pub const SYSTEM_FONT_CANDIDATES: [&str; 3] = [
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Helvetica.ttf",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const SYSTEM_FONT_CANDIDATES: [&str; 3] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];
