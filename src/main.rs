//! likes-downloader - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use likes_downloader::{
    cli::Args,
    config::{validate_config, Config},
    download::{download_liked_feed, download_single_post, DownloadExecutor},
    error::{exit_codes, Error, Result},
    feed::FeedClient,
    fs::organize_media,
    output::{print_banner, print_error, print_run_stats},
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_)
                | Error::BlacklistMalformed { .. } => {
                    ExitCode::from(exit_codes::CONFIG_ERROR as u8)
                }
                Error::Feed(_) | Error::PostNotFound(_) | Error::Http(_) => {
                    ExitCode::from(exit_codes::FEED_ERROR as u8)
                }
                Error::Download(_) => ExitCode::from(exit_codes::DOWNLOAD_ERROR as u8),
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load and validate configuration
    let config = Config::load(&args.config)?;
    validate_config(&config)?;

    // Initialize collaborators
    let feed = FeedClient::new(&config.feed.base_url, &config.feed.token)?;
    let executor = DownloadExecutor::from_config(&config, args.force)?;

    // Download a single post, or the whole liked feed
    let stats = if let Some(post_id) = &args.post {
        download_single_post(&feed, &executor, post_id).await?
    } else {
        download_liked_feed(&feed, &config, &executor, !args.disable_blacklist).await?
    };

    print_run_stats(&stats);

    // Move media to subdirectories if requested
    if args.organize {
        organize_media(
            &config.files.download_directory,
            config.organize.create_dir_after_files,
        )?;
    }

    Ok(())
}
