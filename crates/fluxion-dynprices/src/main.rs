// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! dynprices - command-line host for the dynamic grid prices flows

mod cli;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OptionsArgs, SetupArgs};
use config::AppConfig;
use fluxion_config_flow::consts::{DOMAIN, ERROR_BASE, PLATFORMS};
use fluxion_config_flow::{EntryStore, FlowManager, FlowOutcome, FlowRegistry, integration};
use serde_json::{Map, Value};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logging comes up before the config is read; the configured level is
    // applied afterwards unless RUST_LOG is set.
    let builder = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_filter_reloading();
    let filter_handle = builder.reload_handle();
    tracing::subscriber::set_global_default(builder.finish())
        .context("Failed to set default tracing subscriber")?;

    let config = AppConfig::load(cli.config.as_deref())?;
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_none() {
        filter_handle
            .reload(EnvFilter::new(&config.logging.level))
            .context("Failed to apply configured log level")?;
    }

    // Flows run one at a time: a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run(cli.command, &config))
}

async fn run(command: Commands, config: &AppConfig) -> Result<ExitCode> {
    let mut registry = FlowRegistry::new();
    integration::register_live(
        &mut registry,
        &config.feeds.entsoe_url,
        &config.feeds.ecopower_url,
    )?;
    debug!("Registered flows: {:?}", registry.domains());

    let store = EntryStore::open(&config.storage.path).with_context(|| {
        format!(
            "Failed to open entry store {}",
            config.storage.path.display()
        )
    })?;
    let mut manager = FlowManager::new(registry, store);

    match command {
        Commands::Setup(args) => setup(&mut manager, &args).await,
        Commands::Options(args) => options(&mut manager, &args).await,
        Commands::List => {
            output::print_entries(manager.store().entries());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn setup(manager: &mut FlowManager, args: &SetupArgs) -> Result<ExitCode> {
    let FlowOutcome::Pending { flow_id, result } = manager.start_setup(DOMAIN).await? else {
        anyhow::bail!("setup flow finished without asking for input");
    };

    if args.form {
        output::print_form(&result)?;
        manager.abort(&flow_id)?;
        return Ok(ExitCode::SUCCESS);
    }

    let draft = args.to_draft();
    info!("Validating settings for '{}'", draft.name);

    match manager
        .configure(&flow_id, serde_json::to_value(&draft)?)
        .await?
    {
        FlowOutcome::EntryCreated(entry) => {
            output::print_created(&entry);
            Ok(ExitCode::SUCCESS)
        }
        FlowOutcome::Pending { result, .. } => {
            let reason = result
                .errors()
                .and_then(|errors| errors.get(ERROR_BASE))
                .map_or("unknown", String::as_str);
            error!("❌ Setup failed: {reason}");
            output::print_form(&result)?;
            eprintln!(
                "Setup failed ({reason}): no token given, or a token could not fetch prices"
            );
            Ok(ExitCode::FAILURE)
        }
        FlowOutcome::OptionsUpdated(_) => {
            anyhow::bail!("setup flow returned an options update")
        }
    }
}

async fn options(manager: &mut FlowManager, args: &OptionsArgs) -> Result<ExitCode> {
    for (platform, _) in &args.toggles {
        if !PLATFORMS.contains(&platform.as_str()) {
            anyhow::bail!(
                "unknown platform '{platform}', expected one of: {}",
                PLATFORMS.join(", ")
            );
        }
    }

    let FlowOutcome::Pending { flow_id, result } = manager.start_options(&args.entry).await?
    else {
        anyhow::bail!("options flow finished without asking for input");
    };

    if args.toggles.is_empty() {
        output::print_form(&result)?;
        manager.abort(&flow_id)?;
        return Ok(ExitCode::SUCCESS);
    }

    let toggles: Map<String, Value> = args
        .toggles
        .iter()
        .map(|(platform, enabled)| (platform.clone(), Value::Bool(*enabled)))
        .collect();

    match manager.configure(&flow_id, Value::Object(toggles)).await? {
        FlowOutcome::OptionsUpdated(entry) => {
            output::print_options(&entry);
            Ok(ExitCode::SUCCESS)
        }
        FlowOutcome::Pending { .. } | FlowOutcome::EntryCreated(_) => {
            anyhow::bail!("options flow did not finish")
        }
    }
}
