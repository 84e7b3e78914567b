mod cli;
mod config;
mod terminal;
mod views;

use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use client_core::{AdminClient, AdminContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{cli::Cli, config::load_settings, terminal::TerminalToast};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings.with_overrides(cli.api_base.as_deref(), cli.yes),
        Err(err) => {
            eprintln!("error: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.log_level);

    let api = match AdminClient::new(&settings.api_base) {
        Ok(api) => api,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let ctx = AdminContext::new(api);
    ctx.notifier.set_sink(Arc::new(TerminalToast::stderr()));
    info!(api_base = %settings.api_base, "admin client ready");

    match views::run(&ctx, cli.command, settings.assume_yes).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ctx.notifier.error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
