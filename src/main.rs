use bmp4bit::{convert_file, ConvertConfig};
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info, level_filters::LevelFilter};

/// Converts a 24-bit BMP into a 4-bit BMP using a fixed 16 color palette.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Folder holding `input.bmp`, where `output_4bit.bmp` gets written.
  #[arg(short, long, default_value = "assets")]
  assets_dir: PathBuf,

  /// Read from this file instead of `<assets-dir>/input.bmp`.
  #[arg(short, long)]
  input: Option<PathBuf>,

  /// Write to this file instead of `<assets-dir>/output_4bit.bmp`.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Log each conversion step.
  #[arg(short, long, default_value_t = false)]
  verbose: bool,
}

fn main() -> ExitCode {
  let args = Args::parse();
  let level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
  tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

  let mut config = ConvertConfig::from_assets_dir(&args.assets_dir);
  if let Some(input) = args.input {
    config.input = input;
  }
  if let Some(output) = args.output {
    config.output = output;
  }

  match convert_file(&config) {
    Ok(report) => {
      info!(
        "Wrote {} ({}x{}, {} bytes of pixels)",
        config.output.display(),
        report.geometry.width,
        report.geometry.height,
        report.geometry.pixel_array_size
      );
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!("{}: {e}", config.input.display());
      if let Some(source) = std::error::Error::source(&e) {
        error!("caused by: {source}");
      }
      ExitCode::from(e.exit_code())
    }
  }
}
