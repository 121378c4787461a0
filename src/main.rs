use anyhow::Result;
use clap::Parser;
use resume_tailor::app_log;
use resume_tailor::cli::{handle_command, Cli};
use resume_tailor::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    // Initialize logging first
    init_tracing(&config.log_file)?;

    app_log!(info, "Starting resume-tailor {}", env!("CARGO_PKG_VERSION"));
    app_log!(info, "Log file: {}", config.log_file.display());

    handle_command(cli.command, config).await
}
