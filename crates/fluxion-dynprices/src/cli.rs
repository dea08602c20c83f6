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

use clap::{Args, Parser, Subcommand};
use fluxion_config_flow::DraftSettings;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "dynprices",
    version,
    about = "Set up dynamic grid price entries",
    long_about = "Create and configure dynamic grid price entries.\n\
    \nA setup only succeeds when every supplied API token can fetch today's prices.\n\
    \nExamples:\n  \
    dynprices setup --entsoe-token <TOKEN>            # ENTSO-E only\n  \
    dynprices setup --ecopower-token <TOKEN>          # Ecopower only\n  \
    dynprices options --entry <ID> --set sensor=false # Disable a platform\n  \
    dynprices list"
)]
pub struct Cli {
    /// TOML config file (defaults to ./dynprices.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate tokens and create a new entry
    Setup(SetupArgs),

    /// Show or change which platforms an entry exposes
    Options(OptionsArgs),

    /// List stored entries
    List,
}

#[derive(Debug, Default, Args)]
pub struct SetupArgs {
    /// Display name of the entry
    #[arg(long)]
    pub name: Option<String>,

    /// ENTSO-E transparency platform security token
    #[arg(long)]
    pub entsoe_token: Option<String>,

    /// ENTSO-E bidding zone (EIC code)
    #[arg(long)]
    pub entsoe_area: Option<String>,

    #[arg(long)]
    pub factor_a: Option<f64>,

    #[arg(long)]
    pub factor_b: Option<f64>,

    #[arg(long)]
    pub factor_c: Option<f64>,

    #[arg(long)]
    pub factor_d: Option<f64>,

    /// Ecopower API token
    #[arg(long)]
    pub ecopower_token: Option<String>,

    /// Print the setup form with its defaults instead of submitting
    #[arg(long, default_value_t = false)]
    pub form: bool,
}

impl SetupArgs {
    /// Form defaults overridden by whatever was passed on the command line
    pub fn to_draft(&self) -> DraftSettings {
        let defaults = DraftSettings::default();
        DraftSettings {
            name: self.name.clone().unwrap_or(defaults.name),
            entsoe_token: self.entsoe_token.clone().unwrap_or(defaults.entsoe_token),
            entsoe_area: self.entsoe_area.clone().unwrap_or(defaults.entsoe_area),
            factor_a: self.factor_a.unwrap_or(defaults.factor_a),
            factor_b: self.factor_b.unwrap_or(defaults.factor_b),
            factor_c: self.factor_c.unwrap_or(defaults.factor_c),
            factor_d: self.factor_d.unwrap_or(defaults.factor_d),
            ecopwr_token: self.ecopower_token.clone().unwrap_or(defaults.ecopwr_token),
        }
    }
}

#[derive(Debug, Args)]
pub struct OptionsArgs {
    /// Entry id as shown by `dynprices list`
    #[arg(long)]
    pub entry: String,

    /// Platform toggle, e.g. `sensor=false`. Repeatable. Without any, the form is printed.
    #[arg(long = "set", value_parser = parse_toggle)]
    pub toggles: Vec<(String, bool)>,
}

fn parse_toggle(raw: &str) -> Result<(String, bool), String> {
    let (platform, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <platform>=<true|false>, got '{raw}'"))?;
    let platform = platform.trim();
    if platform.is_empty() {
        return Err(format!("missing platform name in '{raw}'"));
    }
    let enabled = value
        .trim()
        .parse::<bool>()
        .map_err(|_| format!("expected true or false for '{platform}', got '{value}'"))?;
    Ok((platform.to_owned(), enabled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_setup_args_override_defaults() {
        let cli = Cli::try_parse_from([
            "dynprices",
            "setup",
            "--name",
            "Home",
            "--entsoe-token",
            "abc",
            "--factor-b",
            "150",
        ])
        .unwrap();

        let Commands::Setup(args) = cli.command else {
            panic!("expected setup");
        };
        let draft = args.to_draft();
        assert_eq!(draft.name, "Home");
        assert_eq!(draft.entsoe_token, "abc");
        assert!((draft.factor_b - 150.0).abs() < f64::EPSILON);
        assert_eq!(draft.entsoe_area, DraftSettings::default().entsoe_area);
        assert!(draft.ecopwr_token.is_empty());
    }

    #[test]
    fn test_options_toggles() {
        let cli = Cli::try_parse_from([
            "dynprices",
            "--config",
            "custom.toml",
            "options",
            "--entry",
            "abc123",
            "--set",
            "sensor=false",
            "--set",
            "binary_sensor = true",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        let Commands::Options(args) = cli.command else {
            panic!("expected options");
        };
        assert_eq!(args.entry, "abc123");
        assert_eq!(
            args.toggles,
            vec![
                ("sensor".to_owned(), false),
                ("binary_sensor".to_owned(), true)
            ]
        );
    }

    #[test]
    fn test_parse_toggle_errors() {
        assert!(parse_toggle("sensor").is_err());
        assert!(parse_toggle("=true").is_err());
        assert!(parse_toggle("sensor=maybe").is_err());
    }
}
