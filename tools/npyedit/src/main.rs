//! Command-line editor for 2-D `.npy` pixel grids.
//!
//! Exposes the grid transformations as explicit subcommands:
//! - `trim`: drop the last row and last column
//! - `pad`: add zero-filled border columns at both horizontal edges
//! - `encode`: export a thresholded 8-bit grayscale PNG plus a JSON
//!   metadata sidecar
//!
//! Writing back to the input path never happens silently; it requires the
//! `--in-place` flag.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pixelgrid::{encode, load_grid, save_grid, write_texture, PixelGrid};

#[derive(Parser, Debug)]
#[command(name = "npyedit")]
#[command(about = "Edit 2-D .npy pixel grids: trim, pad, encode to PNG")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remove the last row and last column
    Trim {
        /// Input .npy file
        input: PathBuf,

        /// Output .npy file (required unless --in-place)
        output: Option<PathBuf>,

        /// Overwrite the input file
        #[arg(long)]
        in_place: bool,
    },

    /// Add zero-filled border columns at both horizontal edges
    Pad {
        /// Input .npy file
        input: PathBuf,

        /// Output .npy file (required unless --in-place)
        output: Option<PathBuf>,

        /// Overwrite the input file
        #[arg(long)]
        in_place: bool,

        /// Border width in columns on each edge
        #[arg(long, default_value_t = 1)]
        border: usize,
    },

    /// Export as a thresholded 8-bit grayscale PNG plus metadata sidecar
    Encode {
        /// Input .npy file
        input: PathBuf,

        /// Output image path (default: input path with a .png extension)
        output: Option<PathBuf>,

        /// Integer upscale factor, applied by nearest-neighbor resampling
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        scale: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    match cli.command {
        Command::Trim {
            input,
            output,
            in_place,
        } => {
            let output = resolve_output(&input, output, in_place)?;
            let grid = load_source(&input)?;
            let trimmed = grid.trim();
            info!(shape = ?trimmed.shape(), "removed last row and column");
            save_grid(&output, &trimmed)?;
            info!("saved modified array to {}", output.display());
        }

        Command::Pad {
            input,
            output,
            in_place,
            border,
        } => {
            let output = resolve_output(&input, output, in_place)?;
            let grid = load_source(&input)?;
            let padded = grid.pad(border)?;
            info!(shape = ?padded.shape(), border, "added empty border columns");
            save_grid(&output, &padded)?;
            info!("saved modified array to {}", output.display());
        }

        Command::Encode {
            input,
            output,
            scale,
        } => {
            let image_path = output.unwrap_or_else(|| input.with_extension("png"));
            let grid = load_source(&input)?;
            let texture = encode(&grid, scale)?;
            let sidecar = write_texture(&image_path, &texture)?;
            info!(
                width = texture.metadata.width,
                height = texture.metadata.height,
                scale = texture.metadata.scale,
                "wrote {} and {}",
                image_path.display(),
                sidecar.display(),
            );
        }
    }

    Ok(())
}

fn load_source(input: &Path) -> Result<PixelGrid> {
    let grid =
        load_grid(input).with_context(|| format!("loading grid from {}", input.display()))?;
    info!(
        shape = ?grid.shape(),
        element_type = %grid.element_type(),
        "loaded {}",
        input.display(),
    );
    Ok(grid)
}

/// Pick the output path. Overwriting the input is opt-in via `--in-place`,
/// never a silent default.
fn resolve_output(input: &Path, output: Option<PathBuf>, in_place: bool) -> Result<PathBuf> {
    match output {
        Some(path) => Ok(path),
        None if in_place => Ok(input.to_path_buf()),
        None => bail!(
            "no output path given; pass --in-place to overwrite {}",
            input.display()
        ),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
