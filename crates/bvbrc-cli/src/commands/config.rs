//! `bvbrc config` command implementation
//!
//! Reads and edits the JSON config file the client loads at startup.

use crate::config::{self, CliContext, CONFIG_KEYS};
use crate::error::Result;
use colored::Colorize;
use tracing::info;

/// Print one value from the config file.
pub async fn get(ctx: &CliContext, key: &str) -> Result<()> {
    let file = ctx.load_file()?;
    match config::file_value(&file, key)? {
        Some(value) => println!("{}", value),
        None => println!("{}", "(not set)".dimmed()),
    }
    Ok(())
}

/// Store a value in the config file, creating it when missing.
pub async fn set(ctx: &CliContext, key: &str, value: &str) -> Result<()> {
    let mut file = ctx.load_file()?;
    config::set_file_value(&mut file, key, Some(value.trim().to_string()))?;
    ctx.save_file(&file)?;

    info!(key, path = %ctx.config_path().display(), "Config value stored");
    println!(
        "{} {} saved to {}",
        "✓".green(),
        key.cyan(),
        ctx.config_path().display()
    );
    Ok(())
}

pub async fn unset(ctx: &CliContext, key: &str) -> Result<()> {
    let mut file = ctx.load_file()?;
    config::set_file_value(&mut file, key, None)?;
    ctx.save_file(&file)?;
    println!("{} {} removed", "✓".green(), key.cyan());
    Ok(())
}

/// Show the effective settings after file, environment and flags.
///
/// When they do not resolve (e.g. a malformed `base_url` in the file), the
/// raw file values are shown next to the error instead of failing.
pub async fn show(ctx: &CliContext) -> Result<()> {
    println!("{}", "BV-BRC CLI Configuration:".cyan().bold());
    println!();
    println!("{:<12} {}", "config:", ctx.config_path().display());

    match ctx.resolve() {
        Ok(resolved) => {
            let token = resolved
                .auth_token()
                .map(config::mask_token)
                .unwrap_or_else(|| "(anonymous)".to_string());
            println!("{:<12} {}", "base_url:", resolved.base_url());
            println!("{:<12} {}", "auth_token:", token);
        },
        Err(err) => {
            let file = ctx.load_file()?;
            let unset = || "(not set)".to_string();
            println!(
                "{:<12} {}",
                "base_url:",
                file.base_url.clone().unwrap_or_else(unset)
            );
            println!(
                "{:<12} {}",
                "auth_token:",
                file.auth_token.as_deref().map(config::mask_token).unwrap_or_else(unset)
            );
            eprintln!("{} {}", "warning:".yellow().bold(), err);
        },
    }
    println!();
    println!("{} {}", "Default base_url:".dimmed(), config::default_base_url());
    println!("{} {}", "Keys:".dimmed(), CONFIG_KEYS.join(", "));
    println!("{}", "Environment Variables:".cyan());
    println!("  BVBRC_API_URL     - Data API base URL");
    println!("  BVBRC_AUTH_TOKEN  - Authentication token");

    Ok(())
}
