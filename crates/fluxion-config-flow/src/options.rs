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

use crate::errors::{FlowError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-platform enable flags stored on a config entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, bool>);

impl OptionSet {
    /// Platforms missing from the set are treated as enabled
    pub fn is_enabled(&self, platform: &str) -> bool {
        self.0.get(platform).copied().unwrap_or(true)
    }

    pub fn get(&self, platform: &str) -> Option<bool> {
        self.0.get(platform).copied()
    }

    /// Fill in any of `platforms` that has no flag yet
    #[must_use]
    pub fn with_defaults<S: AsRef<str>>(mut self, platforms: &[S]) -> Self {
        for platform in platforms {
            self.0.entry(platform.as_ref().to_owned()).or_insert(true);
        }
        self
    }

    /// Submitted keys overwrite, everything else is kept
    pub fn merge(&mut self, toggles: impl IntoIterator<Item = (String, bool)>) {
        self.0.extend(toggles);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a submitted options form: an object of booleans
    pub fn toggles_from_input(input: serde_json::Value) -> Result<BTreeMap<String, bool>> {
        serde_json::from_value(input).map_err(|e| FlowError::InvalidInput(e.to_string()))
    }
}

impl FromIterator<(String, bool)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
