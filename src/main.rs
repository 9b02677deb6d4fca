mod cli;
mod commands;
mod config;
mod error;
mod i18n;
mod scrape;
mod template;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use i18n::Locale;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let locale = config
        .locale
        .as_deref()
        .map(Locale::from_code)
        .unwrap_or_else(Locale::detect);

    match cli.command {
        Commands::Fetch { url, json } => {
            commands::fetch::run(&url, json, locale, cli.quiet)?;
        }
        Commands::Create {
            url,
            dest,
            filename_template,
            template,
            no_download_image,
        } => {
            commands::create::run(
                &url,
                &config,
                dest.as_ref(),
                filename_template.as_deref(),
                template.as_ref(),
                no_download_image,
                locale,
                cli.quiet,
            )?;
        }
        Commands::Fields => {
            commands::fields::run()?;
        }
        Commands::Init { force } => {
            commands::init::run(force)?;
        }
    }

    Ok(())
}
