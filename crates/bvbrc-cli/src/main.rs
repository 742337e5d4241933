//! bvbrc CLI - Main entry point

use bvbrc_cli::commands;
use bvbrc_cli::{Cli, CliContext, Commands, ConfigCommand};
use bvbrc_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use clap::Parser;
use std::process;
use tracing::debug;

#[tokio::main]
async fn main() {
    // Pick up BVBRC_* variables from a local .env before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    if cli.command.is_none() {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    }

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("bvbrc-cli")
        .build();

    // BVBRC_LOG_* variables take precedence over the flags
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging; keep the guard so file output flushes
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli).await {
        // Printed once below; the log line only shows up at debug level
        debug!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn execute_command(cli: &Cli) -> bvbrc_cli::Result<()> {
    let Some(ref command) = cli.command else {
        return Ok(());
    };
    let ctx = CliContext::from_cli(cli);

    match command {
        Commands::Resources { fields } => commands::resources::run(*fields).await,

        Commands::Get {
            resource,
            id,
            select,
            output,
        } => commands::get::run(&ctx, resource, id, select, output).await,

        Commands::Query(args) => commands::query::run(&ctx, args).await,

        Commands::Search {
            resource,
            keyword,
            select,
            limit,
            output,
        } => commands::search::run(&ctx, resource, keyword, select, *limit, output).await,

        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show(&ctx).await,
            ConfigCommand::Get { key } => commands::config::get(&ctx, key).await,
            ConfigCommand::Set { key, value } => commands::config::set(&ctx, key, value).await,
            ConfigCommand::Unset { key } => commands::config::unset(&ctx, key).await,
        },
    }
}
