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

use crate::options::OptionSet;
use crate::settings::DraftSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A validated, persisted configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: String,
    pub domain: String,
    /// Flow version that created the entry
    pub version: u32,
    pub title: String,
    pub data: DraftSettings,
    /// Empty until the options flow runs for the first time
    #[serde(default)]
    pub options: OptionSet,
    pub created_at: DateTime<Utc>,
}

impl ConfigEntry {
    pub fn new(
        domain: impl Into<String>,
        version: u32,
        title: impl Into<String>,
        data: DraftSettings,
    ) -> Self {
        Self {
            entry_id: Uuid::new_v4().simple().to_string(),
            domain: domain.into(),
            version,
            title: title.into(),
            data,
            options: OptionSet::default(),
            created_at: Utc::now(),
        }
    }
}
