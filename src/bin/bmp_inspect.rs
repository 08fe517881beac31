use bmp4bit::bmp::inspect_path;
use clap::Parser;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, level_filters::LevelFilter};

/// Prints the width, height, and bit depth of a BMP file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// The file to look at.
  #[arg(default_value = "assets/input.bmp")]
  path: PathBuf,

  #[arg(short, long, default_value_t = false)]
  verbose: bool,
}

fn main() -> ExitCode {
  let args = Args::parse();
  let level = if args.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
  tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

  match inspect_path(&args.path) {
    Ok(summary) => {
      println!("{summary}");
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!("{}: {e}", args.path.display());
      ExitCode::from(e.exit_code())
    }
  }
}
