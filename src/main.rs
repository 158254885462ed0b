/*!
 * Command-line interface for catsel
 */

use std::io::{self, BufWriter};
use std::sync::Arc;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use catsel::config::{Args, Config};
use catsel::export::ExportGenerator;
use catsel::{Session, Shell, SystemClipboard, SystemLauncher};

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut io::stdout());
        return Ok(());
    }

    // Create configuration
    let config = Config::from_args(args);

    // Logs go to stderr so they never mix with the view
    let log_level = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    // Validate configuration
    config.validate()?;

    let progress = if config.show_progress {
        let progress = ProgressBar::new(0);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}")
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        progress.set_style(style);
        progress
    } else {
        ProgressBar::hidden()
    };

    let exporter = ExportGenerator::new(Arc::new(progress))
        .with_output_dir(config.output_dir.clone())
        .with_max_file_size(config.max_file_size);
    let session = Session::new(&config)?.with_exporter(exporter);
    debug!(root = %session.navigation().root().display(), "session started");

    let mut shell = Shell::new(session, SystemClipboard, SystemLauncher);
    let stdin = io::stdin();
    let mut stdout = BufWriter::new(io::stdout());
    shell.run(stdin.lock(), &mut stdout)
}
