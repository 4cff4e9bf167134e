// Batch captioning pipeline
//
// Sequential, single-threaded: each image is one blocking unit of work.
// The only state carried between iterations is the running timestamp.

use chrono::{Duration, NaiveDateTime};
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::{
    IMAGE_EXTENSIONS, INCREMENT_FIVE_MIN_SECS, INCREMENT_ONE_MIN_SECS, INCREMENT_RANDOM_SECS,
    INCREMENT_TEN_MIN_SECS, INCREMENT_TWO_MIN_SECS,
};
use crate::error::{PhotomarkError, Result};
use crate::watermark::{apply_to_file, WatermarkSpec};

/// Timestamp advancement policy between consecutive batch images.
/// Every step is jittered so batches don't look machine-stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeIncrement {
    None,
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    TenMinutes,
    Random,
}

impl Default for TimeIncrement {
    fn default() -> Self {
        TimeIncrement::OneMinute
    }
}

impl TimeIncrement {
    /// Seconds to add to the running timestamp before the next image.
    /// Ranges are inclusive on both ends.
    pub fn jittered_seconds<R: Rng>(&self, rng: &mut R) -> i64 {
        let range = match self {
            TimeIncrement::None => return 0,
            TimeIncrement::OneMinute => INCREMENT_ONE_MIN_SECS,
            TimeIncrement::TwoMinutes => INCREMENT_TWO_MIN_SECS,
            TimeIncrement::FiveMinutes => INCREMENT_FIVE_MIN_SECS,
            TimeIncrement::TenMinutes => INCREMENT_TEN_MIN_SECS,
            TimeIncrement::Random => INCREMENT_RANDOM_SECS,
        };
        rng.gen_range(range.0..=range.1)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOptions {
    pub increment: TimeIncrement,
}

/// One attempted batch item, with the timestamp actually rendered.
#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub input: PathBuf,
    pub output: PathBuf,
    pub timestamp: NaiveDateTime,
    pub success: bool,
}

/// Aggregate outcome of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub processed: usize,
    pub failed: usize,
    pub items: Vec<BatchItem>,
}

/// List the images directly inside `dir` (no recursion), sorted by path
/// for deterministic batch order.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PhotomarkError::InvalidPath(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Check a file against the accepted extensions, case-insensitively.
pub fn is_image_file(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(e) => e.to_lowercase(),
        None => return false,
    };
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

/// Caption every image in `input_dir` into `output_dir`, preserving file
/// names. The first image keeps the spec's base timestamp; each later image
/// advances the running timestamp per the increment policy. A failing
/// image is logged and counted; the loop always continues.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    spec: &WatermarkSpec,
    options: &BatchOptions,
) -> Result<BatchReport> {
    let input_canon = input_dir
        .canonicalize()
        .map_err(|_| PhotomarkError::InvalidPath(format!("not a directory: {}", input_dir.display())))?;
    let output_canon = output_dir.canonicalize().unwrap_or_else(|_| output_dir.to_path_buf());
    if input_canon == output_canon {
        return Err(PhotomarkError::InvalidPath(
            "input and output folders must differ".to_string(),
        ));
    }

    std::fs::create_dir_all(output_dir)?;

    let files = discover_images(input_dir)?;
    log::info!(
        "Starting batch of {} images from {}",
        files.len(),
        input_dir.display()
    );

    let mut report = BatchReport {
        total: files.len(),
        processed: 0,
        failed: 0,
        items: Vec::with_capacity(files.len()),
    };

    let mut rng = rand::thread_rng();
    let mut current_ts = spec.timestamp;

    for (idx, input) in files.iter().enumerate() {
        if idx > 0 {
            current_ts += Duration::seconds(options.increment.jittered_seconds(&mut rng));
        }

        let file_name = match input.file_name() {
            Some(name) => name,
            None => continue,
        };
        let output = output_dir.join(file_name);

        let item_spec = WatermarkSpec {
            timestamp: current_ts,
            ..spec.clone()
        };

        let success = apply_to_file(input, &output, &item_spec);
        if success {
            report.processed += 1;
        } else {
            report.failed += 1;
        }
        report.items.push(BatchItem {
            input: input.clone(),
            output,
            timestamp: current_ts,
            success,
        });
    }

    log::info!(
        "Batch complete: {} / {} succeeded",
        report.processed,
        report.total
    );

    Ok(report)
}
