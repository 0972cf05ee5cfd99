// Entry point: parses the CLI, wires up logging, runs the pipeline.
use clap::{CommandFactory, Parser};

use bbob_postproc::app;
use bbob_postproc::cli::Args;

fn main() {
    let args = Args::parse();

    // No folders is not an error: show the documentation and leave without
    // touching the filesystem.
    if args.folders.is_empty() {
        let _ = Args::command().print_long_help();
        return;
    }

    init_tracing(args.verbose);

    if let Err(err) = app::run(&args) {
        eprintln!("post-processing failed: {err}");
        eprintln!("for help use -h or --help");
        std::process::exit(1);
    }
}

/// Warnings are suppressed unless verbose mode is on; `RUST_LOG` overrides
/// either default.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "error" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
