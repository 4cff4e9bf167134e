// Photomark CLI binary

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};

use photomark::batch::{run_batch, BatchOptions, TimeIncrement};
use photomark::constants::TIMESTAMP_FORMAT;
use photomark::watermark::{apply_to_file, Anchor, WatermarkSpec};

#[derive(Parser)]
#[command(name = "photomark")]
#[command(about = "Photomark - batch photo captioning with a timestamped watermark block", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Caption a single image
    Single {
        /// Source image (png, jpg, bmp)
        input: PathBuf,
        /// Destination file; extension decides the output format
        output: PathBuf,
        #[command(flatten)]
        caption: CaptionArgs,
    },

    /// Caption every image in a folder
    Batch {
        /// Folder of source images (not recursed into)
        input_dir: PathBuf,
        /// Destination folder, created if missing; must differ from input
        output_dir: PathBuf,
        #[command(flatten)]
        caption: CaptionArgs,
        /// Time increment policy applied between images
        #[arg(long, value_enum, default_value = "one-minute")]
        increment: TimeIncrement,
        /// Print the batch report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct CaptionArgs {
    /// Title text for the top bar
    #[arg(long, default_value = "")]
    title: String,

    /// Location text for the bottom bar
    #[arg(long, default_value = "")]
    location: String,

    /// Timestamp "YYYY-MM-DD HH:MM:SS"; defaults to the current time
    #[arg(long)]
    time: Option<String>,

    /// Block anchor position
    #[arg(long, value_enum, default_value = "bottom-right")]
    anchor: Anchor,

    /// Horizontal edge padding in pixels
    #[arg(long, default_value_t = 30)]
    padding_x: u32,

    /// Vertical edge padding in pixels
    #[arg(long, default_value_t = 30)]
    padding_y: u32,

    /// Base font size for the time and location text
    #[arg(long, default_value_t = 40)]
    font_size: u32,

    /// Font file; a fallback chain handles a missing or unloadable path
    #[arg(long)]
    font: Option<PathBuf>,
}

impl CaptionArgs {
    fn to_spec(&self) -> Result<WatermarkSpec> {
        let timestamp = match &self.time {
            Some(s) => NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
                .map_err(|e| anyhow::anyhow!("invalid --time '{}': {}", s, e))?,
            None => Local::now().naive_local(),
        };

        Ok(WatermarkSpec {
            title: self.title.clone(),
            location: self.location.clone(),
            timestamp,
            anchor: self.anchor,
            padding: (self.padding_x, self.padding_y),
            base_font_size: self.font_size,
            font_path: self.font.clone(),
        })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Single { input, output, caption } => cmd_single(input, output, caption),
        Commands::Batch { input_dir, output_dir, caption, increment, json } => {
            cmd_batch(input_dir, output_dir, caption, increment, json)
        }
    }
}

fn cmd_single(input: PathBuf, output: PathBuf, caption: CaptionArgs) -> Result<()> {
    let spec = caption.to_spec()?;

    if apply_to_file(&input, &output, &spec) {
        println!("Captioned image saved to {}", output.display());
        Ok(())
    } else {
        anyhow::bail!("Failed to caption {} (see log output)", input.display())
    }
}

fn cmd_batch(
    input_dir: PathBuf,
    output_dir: PathBuf,
    caption: CaptionArgs,
    increment: TimeIncrement,
    json: bool,
) -> Result<()> {
    let spec = caption.to_spec()?;
    let options = BatchOptions { increment };

    if !json {
        println!("Captioning images from {} into {}", input_dir.display(), output_dir.display());
    }

    let report = run_batch(&input_dir, &output_dir, &spec, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!("Batch complete:");
        println!("  Total images: {}", report.total);
        println!("  Processed:    {}", report.processed);
        println!("  Failed:       {}", report.failed);
    }

    if report.total > 0 && report.processed == 0 {
        anyhow::bail!("All {} images failed", report.total);
    }

    Ok(())
}
