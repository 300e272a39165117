//! logscan binary entrypoint.

use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use logscan::{CountMode, EngineConfig, LogEngine};
use logscan_cli::cli::{Cli, Commands};
use logscan_cli::commands::{ArchiveCommand, ScanCommand, SearchCommand, UploadCommand};
use logscan_cli::output::OutputFormat;
use logscan_cli::CliError;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<EngineConfig, CliError> {
    let config = match cli.config {
        Some(ref path) => {
            debug!(path = %path.display(), "loading config");
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let engine = LogEngine::new(load_config(&cli)?)?;
    let config = engine.config();
    debug!(
        log_extension = %config.log_extension,
        batch_size = config.batch_size,
        max_concurrency = config.max_concurrency,
        upload_timeout_secs = config.upload.timeout_secs,
        "engine ready"
    );
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();
    let started = Instant::now();

    match cli.command {
        Commands::Search(ref args) => {
            SearchCommand::new(&engine).directory(&mut stdout, &format, args).await?;
        }
        Commands::Unique(ref args) => {
            ScanCommand::new(&engine)
                .counts(&mut stdout, &format, args, CountMode::Unique)
                .await?;
        }
        Commands::Duplicates(ref args) => {
            ScanCommand::new(&engine)
                .counts(&mut stdout, &format, args, CountMode::Duplicate)
                .await?;
        }
        Commands::Stats(ref args) => {
            ScanCommand::new(&engine).stats(&mut stdout, &format, args).await?;
        }
        Commands::BySize(ref args) => {
            SearchCommand::new(&engine).by_size(&mut stdout, &format, args).await?;
        }
        Commands::ByDate(ref args) => {
            SearchCommand::new(&engine).by_date(&mut stdout, &format, args).await?;
        }
        Commands::Count(ref args) => {
            SearchCommand::new(&engine).count(&mut stdout, &format, args).await?;
        }
        Commands::Delete(ref args) => {
            ArchiveCommand::new(&engine).delete(&mut stdout, &format, args).await?;
        }
        Commands::Archive(ref args) => {
            ArchiveCommand::new(&engine).archive(&mut stdout, &format, args).await?;
        }
        Commands::DeleteArchives(ref args) => {
            ArchiveCommand::new(&engine)
                .delete_archives(&mut stdout, &format, args)
                .await?;
        }
        Commands::Upload(ref args) => {
            UploadCommand::new(&engine).execute(&mut stdout, &format, args).await?;
        }
    }

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(command = cli.command.name(), elapsed_ms, "command finished");
    Ok(())
}
