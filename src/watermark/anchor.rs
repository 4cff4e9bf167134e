// Anchor positions for the caption block

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Named reference point on the target image determining block placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::BottomRight
    }
}

impl Anchor {
    /// Parse a snake_case anchor name. Unrecognized names fall back to
    /// the default bottom-right rather than erroring.
    pub fn from_name(name: &str) -> Anchor {
        match name {
            "top_left" => Anchor::TopLeft,
            "top_center" => Anchor::TopCenter,
            "top_right" => Anchor::TopRight,
            "middle_left" => Anchor::MiddleLeft,
            "middle_center" => Anchor::MiddleCenter,
            "middle_right" => Anchor::MiddleRight,
            "bottom_left" => Anchor::BottomLeft,
            "bottom_center" => Anchor::BottomCenter,
            _ => Anchor::BottomRight,
        }
    }

    /// Resolve the top-left origin of a block of `block_w` x `block_h`
    /// pixels inside an `img_w` x `img_h` image, offset by `(pad_x, pad_y)`
    /// from the anchored edge. Both coordinates are clamped to >= 0; the
    /// far edge is never clamped, so an oversized block may overhang.
    pub fn resolve(
        &self,
        img_w: u32,
        img_h: u32,
        block_w: u32,
        block_h: u32,
        pad_x: u32,
        pad_y: u32,
    ) -> (u32, u32) {
        let (iw, ih) = (img_w as i64, img_h as i64);
        let (bw, bh) = (block_w as i64, block_h as i64);
        let (px, py) = (pad_x as i64, pad_y as i64);

        let (x, y) = match self {
            Anchor::TopLeft => (px, py),
            Anchor::TopCenter => ((iw - bw) / 2, py),
            Anchor::TopRight => (iw - bw - px, py),
            Anchor::MiddleLeft => (px, (ih - bh) / 2),
            Anchor::MiddleCenter => ((iw - bw) / 2, (ih - bh) / 2),
            Anchor::MiddleRight => (iw - bw - px, (ih - bh) / 2),
            Anchor::BottomLeft => (px, ih - bh - py),
            Anchor::BottomCenter => ((iw - bw) / 2, ih - bh - py),
            Anchor::BottomRight => (iw - bw - px, ih - bh - py),
        };

        (x.max(0) as u32, y.max(0) as u32)
    }
}
