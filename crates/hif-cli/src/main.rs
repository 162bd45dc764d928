//! hifview - View HIF images
//!
//! Decodes a HIF file and shows it in a window sized to the image, or
//! exports it as PNG.

mod error;
mod view;

use clap::Parser;
use hif::{hif_decode, HifImage};
use log::{error, info, LevelFilter};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::error::ViewerError;
use crate::view::{run_event_loop, Frame, WindowSurface};

#[derive(Parser)]
#[command(name = "hifview")]
#[command(version)]
#[command(about = "Display a HIF image in a window", long_about = None)]
struct Cli {
    /// Input HIF file
    input: PathBuf,

    /// Write the decoded image as PNG instead of opening a window
    #[arg(short = 'o', long = "export", value_name = "PNG")]
    export: Option<PathBuf>,

    /// Log header and payload hex dumps and decoder details
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .try_init()
        .ok();
}

fn run(cli: &Cli) -> Result<(), ViewerError> {
    let image = load(&cli.input)?;

    match &cli.export {
        Some(path) => export_png(&image, path),
        None => show(&image, &cli.input),
    }
}

/// Reads and decodes the whole file.
fn load(path: &Path) -> Result<HifImage, ViewerError> {
    let data = fs::read(path).map_err(|source| ViewerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("read {} bytes from '{}'", data.len(), path.display());

    hif_decode(&data).map_err(|source| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn show(image: &HifImage, input: &Path) -> Result<(), ViewerError> {
    let title = match input.file_name() {
        Some(name) => format!("hifview: {}", name.to_string_lossy()),
        None => "hifview".to_string(),
    };
    let frame = Frame::from_image(image);
    let mut surface = WindowSurface::open(&title, frame.width, frame.height)?;
    run_event_loop(&mut surface, &frame)?;
    Ok(())
}

fn export_png(decoded: &HifImage, path: &Path) -> Result<(), ViewerError> {
    let export_err = |source: image::ImageError| ViewerError::Export {
        path: path.to_path_buf(),
        source,
    };

    let rgb = image::RgbImage::from_raw(
        decoded.width() as u32,
        decoded.height() as u32,
        decoded.pixels.clone(),
    )
    .ok_or_else(|| {
        export_err(image::ImageError::Parameter(
            image::error::ParameterError::from_kind(
                image::error::ParameterErrorKind::DimensionMismatch,
            ),
        ))
    })?;
    rgb.save_with_format(path, image::ImageFormat::Png)
        .map_err(export_err)?;

    info!(
        "exported {}x{} image to '{}'",
        decoded.width(),
        decoded.height(),
        path.display()
    );
    Ok(())
}
