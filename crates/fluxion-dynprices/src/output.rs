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

//! Terminal output. Tokens never leave this module unmasked.

use anyhow::Result;
use fluxion_config_flow::consts::{CONF_ECOPWR_TOKEN, CONF_ENTSOE_TOKEN};
use fluxion_config_flow::{ConfigEntry, StepResult, mask_token};
use serde_json::Value;
use std::fmt::Write as _;

const TOKEN_FIELDS: &[&str] = &[CONF_ENTSOE_TOKEN, CONF_ECOPWR_TOKEN];

/// Print a step result as JSON with token defaults masked
pub fn print_form(result: &StepResult) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&masked_form(result))?);
    Ok(())
}

fn masked_form(result: &StepResult) -> StepResult {
    let mut shown = result.clone();
    if let StepResult::ShowForm { schema, .. } = &mut shown {
        for field in &mut schema.fields {
            if !TOKEN_FIELDS.contains(&field.key.as_str()) {
                continue;
            }
            let masked = field
                .default
                .as_str()
                .filter(|token| !token.is_empty())
                .map(mask_token);
            if let Some(masked) = masked {
                field.default = Value::String(masked);
            }
        }
    }
    shown
}

pub fn print_created(entry: &ConfigEntry) {
    println!("✅ Created entry {} ('{}')", entry.entry_id, entry.title);
}

pub fn print_options(entry: &ConfigEntry) {
    println!("✅ Updated options of '{}'", entry.title);
    print!("{}", format_options(entry));
}

pub fn print_entries(entries: &[ConfigEntry]) {
    if entries.is_empty() {
        println!("No entries configured. Run `dynprices setup` to create one.");
        return;
    }
    for entry in entries {
        print!("{}", format_entry(entry));
    }
}

fn format_entry(entry: &ConfigEntry) -> String {
    let data = &entry.data;
    let mut out = String::new();

    let _ = writeln!(out, "{} [{}]", entry.title, entry.entry_id);
    let _ = writeln!(
        out,
        "  domain: {} (v{}), created {}",
        entry.domain,
        entry.version,
        entry.created_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(
        out,
        "  entsoe: token={} area={}",
        display_token(&data.entsoe_token),
        data.entsoe_area
    );
    let _ = writeln!(
        out,
        "  factors: a={} b={} c={} d={}",
        data.factor_a, data.factor_b, data.factor_c, data.factor_d
    );
    let _ = writeln!(out, "  ecopower: token={}", display_token(&data.ecopwr_token));
    out.push_str(&format_options(entry));
    out
}

fn format_options(entry: &ConfigEntry) -> String {
    if entry.options.is_empty() {
        return "  options: defaults (all platforms enabled)\n".to_owned();
    }
    let flags: Vec<String> = entry
        .options
        .iter()
        .map(|(platform, enabled)| format!("{platform}={enabled}"))
        .collect();
    format!("  options: {}\n", flags.join(" "))
}

fn display_token(token: &str) -> String {
    if token.is_empty() {
        "<none>".to_owned()
    } else {
        mask_token(token)
    }
}
