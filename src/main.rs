use anyhow::Context;
use clap::{Parser, Subcommand};
use ndarray::Array3;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use textdect::features::samples::{SheetOptions, render_sample_sheet};
use textdect::{CorpusExtractor, DetectionConfig, Tiler, decode, learning_rate_logged};

#[derive(Parser)]
#[command(name = "textdect")]
#[command(about = "Sliding-window feature extraction and grid box decoding for text detection")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct WindowArgs {
    /// Window height in pixels
    #[arg(long, default_value_t = 28)]
    feature_height: u32,

    /// Window width in pixels
    #[arg(long, default_value_t = 28)]
    feature_width: u32,

    /// Step between window origins
    #[arg(long, default_value_t = 5)]
    stride: u32,

    /// Discard edge pixels instead of zero-padding
    #[arg(long)]
    no_padding: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Extract a feature corpus from every image in a directory
    Features {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        window: WindowArgs,

        /// Add rotated copies of each image
        #[arg(long)]
        augment: bool,

        /// Accepted file extensions
        #[arg(long = "ext", value_name = "EXT", default_values = [".jpg", ".png"])]
        extensions: Vec<String>,

        /// Write the corpus as JSON lines (one vector per line)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Save a mosaic of sample windows
        #[arg(long, value_name = "PNG")]
        sample_sheet: Option<PathBuf>,

        /// Shuffle the sample sheet with this seed
        #[arg(long)]
        shuffle_seed: Option<u64>,
    },

    /// Print the window coordinates sampled from one image
    Tile {
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Decode a grid tensor (ndarray JSON) into bounding boxes
    Decode {
        #[arg(value_name = "GRID_JSON")]
        grid_path: PathBuf,

        /// Detection configuration JSON
        #[arg(short, long, value_name = "FILE")]
        config: PathBuf,
    },

    /// Print the reference learning-rate schedule
    Schedule {
        #[arg(long, default_value_t = 30)]
        epochs: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.command {
        Command::Features {
            dir,
            window,
            augment,
            extensions,
            output,
            sample_sheet,
            shuffle_seed,
        } => {
            let tiler = Tiler::new(window.feature_height, window.feature_width);
            let extractor = CorpusExtractor::new(tiler)
                .with_stride(window.stride)
                .with_padding(!window.no_padding)
                .with_augmentation(augment)
                .with_extensions(extensions);
            let corpus = extractor.extract(&dir)?;

            println!("Feature corpus: {} x {}", corpus.len(), corpus.feature_len());

            if let Some(path) = output {
                let file = std::fs::File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                let mut writer = BufWriter::new(file);
                for vector in corpus.vectors() {
                    serde_json::to_writer(&mut writer, vector)?;
                    writeln!(writer)?;
                }
                writer.flush()?;
                println!("Wrote {}", path.display());
            }

            if let Some(path) = sample_sheet {
                let options = SheetOptions {
                    transpose: false,
                    shuffle_seed,
                };
                let sheet = render_sample_sheet(
                    &corpus,
                    window.feature_height,
                    window.feature_width,
                    options,
                )?;
                match sheet {
                    Some(sheet) => {
                        sheet
                            .save(&path)
                            .map_err(|e| anyhow::anyhow!("Failed to save sample sheet: {}", e))?;
                        println!("Saved sample sheet to {}", path.display());
                    }
                    None => println!("No samples to render"),
                }
            }
        }

        Command::Tile { image_path, window } => {
            let tiler = Tiler::new(window.feature_height, window.feature_width);
            let tiles = tiler.tile_file(&image_path, window.stride, !window.no_padding)?;

            println!("{} windows", tiles.len());
            for coord in &tiles.coordinates {
                println!("  ({}, {})", coord.y, coord.x);
            }
        }

        Command::Decode { grid_path, config } => {
            let config = DetectionConfig::from_json_file(&config)?;
            let text = std::fs::read_to_string(&grid_path)
                .with_context(|| format!("Failed to read {}", grid_path.display()))?;
            let grid: Array3<f32> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse grid tensor {}", grid_path.display()))?;

            let boxes = decode(grid.view(), &config)?;

            println!("=== Text Detection Results ===");
            println!("Total boxes: {}", boxes.len());
            for (i, bbox) in boxes.iter().enumerate() {
                let (xmin, ymin, xmax, ymax) = bbox.coordinates();
                println!("  Box {}: ({}, {}) - ({}, {})", i + 1, xmin, ymin, xmax, ymax);
            }
        }

        Command::Schedule { epochs } => {
            for epoch in 0..epochs {
                let rate = learning_rate_logged(epoch, args.verbose);
                println!("epoch {:2}: {:.6}", epoch + 1, rate);
            }
        }
    }

    Ok(())
}
