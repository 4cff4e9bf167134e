// Watermark rendering module

pub mod anchor;
pub mod font;
pub mod layout;
pub mod render;
pub mod text;

pub use anchor::Anchor;
pub use layout::BlockLayout;
pub use render::{apply_to_file, render};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{TIMESTAMP_FORMAT, TITLE_FONT_SCALE};

/// Caption parameters for a single render call. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatermarkSpec {
    pub title: String,
    pub location: String,
    pub timestamp: NaiveDateTime,
    pub anchor: Anchor,
    /// Offset of the block from the anchored edges, (x, y) pixels.
    pub padding: (u32, u32),
    /// Size of the time and location text; the title uses 1.4x this.
    pub base_font_size: u32,
    /// Explicit font file; the resolution chain handles None or bad paths.
    pub font_path: Option<PathBuf>,
}

impl WatermarkSpec {
    pub fn title_font_px(&self) -> f32 {
        self.base_font_size as f32 * TITLE_FONT_SCALE
    }

    pub fn base_font_px(&self) -> f32 {
        self.base_font_size as f32
    }

    /// The timestamp line as rendered, `YYYY-MM-DD HH:MM:SS`.
    pub fn time_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}
