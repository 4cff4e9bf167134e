// Photomark - Library Entry Point

pub mod batch;
pub mod constants;
pub mod error;
pub mod watermark;

pub use batch::{run_batch, BatchOptions, BatchReport, TimeIncrement};
pub use error::{PhotomarkError, Result};
pub use watermark::{apply_to_file, render, Anchor, WatermarkSpec};
