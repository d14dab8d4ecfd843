//! pdfwatch - Watch a directory for PDF files and merge them.

use std::process;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;

use pdfwatch::app::App;
use pdfwatch::cli::Cli;
use pdfwatch::config::Config;
use pdfwatch::error::PdfWatchError;
use pdfwatch::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        let code = err
            .downcast_ref::<PdfWatchError>()
            .map_or(1, PdfWatchError::exit_code);
        process::exit(code);
    }
}

/// Main application logic.
fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::try_from(&cli)?;
    pdfwatch::logging::init(config.verbose);

    let formatter = OutputFormatter::from_config(&config);
    if !formatter.is_quiet() {
        formatter.section(&format!("{} v{}", pdfwatch::NAME, pdfwatch::VERSION));
        formatter.info("Type 'help' for a list of commands.");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let result = runtime.block_on(async {
        let mut app = App::new(&config)?;
        if let Some(directory) = config.watch_dir.clone() {
            app.watch(directory).await?;
        }
        app.run(BufReader::new(tokio::io::stdin())).await
    });

    // A pending stdin read must not hold up the exit.
    runtime.shutdown_background();
    result?;
    Ok(())
}
