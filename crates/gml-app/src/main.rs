//! `gml`: evaluate GML scene programs and render them to PPM images.

mod preprocess;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::info;

use gml_renderer::{Raytracer, TracerConfig};

#[derive(Parser)]
#[command(version, about = "Evaluate GML scene programs and render them to PPM images")]
struct Cli {
    /// Source files, evaluated in order
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Read files verbatim instead of running them through the C preprocessor
    #[arg(long)]
    no_preprocess: bool,

    /// Preprocessor invoked as `<PROGRAM> -E -x c -P <file>`
    #[arg(long, value_name = "PROGRAM", default_value = "gcc")]
    cpp: String,

    /// Offset along the surface normal for shadow and reflection rays
    #[arg(long, value_name = "F", default_value_t = TracerConfig::default().shadow_bias)]
    shadow_bias: f64,

    /// Directory that relative image names from `render` are written to
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Outer error: the file could not be read or preprocessed. Inner error:
/// the program itself failed.
fn run_file(cli: &Cli, backend: &Raytracer, path: &Path) -> Result<Result<(), gml_lang::Error>> {
    let cpp = (!cli.no_preprocess).then_some(cli.cpp.as_str());
    let source = preprocess::read_source(path, cpp)?;
    Ok(gml_lang::compile(&source).and_then(|program| program.evaluate_with(backend).map(drop)))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = TracerConfig { shadow_bias: cli.shadow_bias, ..TracerConfig::default() };
    let mut backend = Raytracer::new(config);
    if let Some(dir) = &cli.output_dir {
        backend = backend.with_output_dir(dir);
    }

    let mut failed = 0usize;
    for path in &cli.files {
        match run_file(&cli, &backend, path) {
            Ok(Ok(())) => info!("{}: ok", path.display()),
            Ok(Err(e)) => {
                failed += 1;
                eprintln!("{}: {}: {e}", path.display(), e.class());
            }
            Err(e) => {
                failed += 1;
                eprintln!("{}: error: {e:#}", path.display());
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        info!("{failed} of {} files failed", cli.files.len());
        ExitCode::FAILURE
    }
}
