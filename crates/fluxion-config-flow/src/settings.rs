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

use crate::consts::{
    CONF_ENTSOE_AREA, CONF_ENTSOE_FACTOR_A, CONF_ENTSOE_FACTOR_B, CONF_ENTSOE_FACTOR_C,
    CONF_ENTSOE_FACTOR_D, CONF_NAME, DEFAULT_ENTSOE_AREA, DEFAULT_FACTOR_A, DEFAULT_FACTOR_B,
    DEFAULT_FACTOR_C, DEFAULT_FACTOR_D, NAME,
};
use crate::errors::{FlowError, Result};
use fluxion_price_feeds::{EcopowerCredentials, EntsoeCredentials};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection settings collected by the setup flow.
///
/// Serialized keys are the form field keys, so a submitted form and a stored
/// entry share one representation.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSettings {
    /// Display name, becomes the entry title
    pub name: String,

    /// ENTSO-E security token; empty when the feed is not used
    #[serde(default)]
    pub entsoe_token: String,

    /// ENTSO-E bidding zone (EIC code)
    pub entsoe_area: String,

    #[serde(rename = "entsoe_factor_a")]
    pub factor_a: f64,

    #[serde(rename = "entsoe_factor_b")]
    pub factor_b: f64,

    #[serde(rename = "entsoe_factor_c")]
    pub factor_c: f64,

    #[serde(rename = "entsoe_factor_d")]
    pub factor_d: f64,

    /// Ecopower API token; empty when the feed is not used
    #[serde(default)]
    pub ecopwr_token: String,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            name: NAME.to_owned(),
            entsoe_token: String::new(),
            entsoe_area: DEFAULT_ENTSOE_AREA.to_owned(),
            factor_a: DEFAULT_FACTOR_A,
            factor_b: DEFAULT_FACTOR_B,
            factor_c: DEFAULT_FACTOR_C,
            factor_d: DEFAULT_FACTOR_D,
            ecopwr_token: String::new(),
        }
    }
}

impl fmt::Debug for DraftSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftSettings")
            .field("name", &self.name)
            .field("entsoe_token", &mask_token(&self.entsoe_token))
            .field("entsoe_area", &self.entsoe_area)
            .field("factor_a", &self.factor_a)
            .field("factor_b", &self.factor_b)
            .field("factor_c", &self.factor_c)
            .field("factor_d", &self.factor_d)
            .field("ecopwr_token", &mask_token(&self.ecopwr_token))
            .finish()
    }
}

impl DraftSettings {
    pub fn has_entsoe(&self) -> bool {
        !self.entsoe_token.is_empty()
    }

    pub fn has_ecopower(&self) -> bool {
        !self.ecopwr_token.is_empty()
    }

    /// At least one feed configured
    pub fn has_any_token(&self) -> bool {
        self.has_entsoe() || self.has_ecopower()
    }

    pub fn entsoe_credentials(&self) -> Option<EntsoeCredentials> {
        self.has_entsoe().then(|| EntsoeCredentials {
            token: self.entsoe_token.clone(),
            area: self.entsoe_area.clone(),
        })
    }

    pub fn ecopower_credentials(&self) -> Option<EcopowerCredentials> {
        self.has_ecopower().then(|| EcopowerCredentials {
            token: self.ecopwr_token.clone(),
        })
    }

    pub fn factors(&self) -> [(&'static str, f64); 4] {
        [
            (CONF_ENTSOE_FACTOR_A, self.factor_a),
            (CONF_ENTSOE_FACTOR_B, self.factor_b),
            (CONF_ENTSOE_FACTOR_C, self.factor_c),
            (CONF_ENTSOE_FACTOR_D, self.factor_d),
        ]
    }

    /// Field-level checks the form schema enforces before any step runs:
    /// required strings present, factors finite and strictly positive.
    pub fn check_fields(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FlowError::InvalidField {
                field: CONF_NAME.to_owned(),
                reason: "required".to_owned(),
            });
        }

        if self.entsoe_area.trim().is_empty() {
            return Err(FlowError::InvalidField {
                field: CONF_ENTSOE_AREA.to_owned(),
                reason: "required".to_owned(),
            });
        }

        for (field, value) in self.factors() {
            if !value.is_finite() || value <= 0.0 {
                return Err(FlowError::InvalidField {
                    field: field.to_owned(),
                    reason: format!("expected a positive number, got {value}"),
                });
            }
        }

        Ok(())
    }

    /// Parse a submitted form
    pub fn from_input(input: serde_json::Value) -> Result<Self> {
        let draft: Self = serde_json::from_value(input)
            .map_err(|e| FlowError::InvalidInput(e.to_string()))?;
        draft.check_fields()?;
        Ok(draft)
    }
}

/// Keep the first and last two characters of a token for display
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    match chars.len() {
        0 => String::new(),
        1..=6 => "*".repeat(chars.len()),
        n => {
            let head: String = chars[..2].iter().collect();
            let tail: String = chars[n - 2..].iter().collect();
            format!("{head}{}{tail}", "*".repeat(n - 4))
        }
    }
}
