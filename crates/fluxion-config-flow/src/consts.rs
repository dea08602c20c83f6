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

/// Domain the flows are registered under
pub const DOMAIN: &str = "dynprices";

/// Default display name for a new entry
pub const NAME: &str = "DynGridPrices";

/// Flow schema version stored on every entry
pub const FLOW_VERSION: u32 = 1;

pub const CONF_NAME: &str = "name";
pub const CONF_ENTSOE_TOKEN: &str = "entsoe_token";
pub const CONF_ENTSOE_AREA: &str = "entsoe_area";
pub const CONF_ENTSOE_FACTOR_A: &str = "entsoe_factor_a";
pub const CONF_ENTSOE_FACTOR_B: &str = "entsoe_factor_b";
pub const CONF_ENTSOE_FACTOR_C: &str = "entsoe_factor_c";
pub const CONF_ENTSOE_FACTOR_D: &str = "entsoe_factor_d";
pub const CONF_ECOPWR_TOKEN: &str = "ecopwr_token";

/// Belgium bidding zone
pub const DEFAULT_ENTSOE_AREA: &str = "10YBE----------2";
/// Scale to kWh, VAT included
pub const DEFAULT_FACTOR_A: f64 = 0.001 * 1.06;
/// Per MWh
pub const DEFAULT_FACTOR_B: f64 = 142.0;
/// Scale to kWh
pub const DEFAULT_FACTOR_C: f64 = 0.001;
/// Per MWh
pub const DEFAULT_FACTOR_D: f64 = 2.3;

/// Sub-platforms an entry can expose. Order here is not the display order.
pub const PLATFORMS: &[&str] = &["sensor", "binary_sensor"];

pub const STEP_USER: &str = "user";
pub const STEP_INIT: &str = "init";

/// Form error slot not tied to a single field
pub const ERROR_BASE: &str = "base";
/// The only user-facing error: no token, or a token that failed its check
pub const ERROR_AUTH: &str = "auth";
