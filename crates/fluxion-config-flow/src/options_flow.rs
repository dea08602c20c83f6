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

//! Options flow: toggle which sub-platforms an entry exposes

use crate::consts::{PLATFORMS, STEP_INIT, STEP_USER};
use crate::entry::ConfigEntry;
use crate::errors::{FlowError, Result};
use crate::form::{FieldKind, FormSchema, StepResult};
use crate::options::OptionSet;
use crate::registry::OptionsFlowHandler;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone)]
pub struct OptionsFlow {
    title: String,
    platforms: Vec<String>,
    options: OptionSet,
}

impl OptionsFlow {
    pub fn new(entry: &ConfigEntry) -> Self {
        Self::with_platforms(entry, PLATFORMS)
    }

    pub fn with_platforms<S: AsRef<str>>(entry: &ConfigEntry, platforms: &[S]) -> Self {
        let platforms: Vec<String> = platforms.iter().map(|p| p.as_ref().to_owned()).collect();
        Self {
            title: entry.data.name.clone(),
            options: entry.options.clone().with_defaults(&platforms),
            platforms,
        }
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    /// There is no menu: go straight to the user step
    pub fn init(&mut self) -> StepResult {
        self.show_form()
    }

    /// Merge the submitted toggles and emit the full option set.
    /// Only known platforms may be toggled.
    pub fn submit(&mut self, toggles: Option<BTreeMap<String, bool>>) -> Result<StepResult> {
        let Some(toggles) = toggles else {
            return Ok(self.show_form());
        };

        if let Some(unknown) = toggles.keys().find(|k| !self.platforms.contains(k)) {
            return Err(FlowError::InvalidField {
                field: unknown.clone(),
                reason: format!(
                    "unknown platform, expected one of: {}",
                    self.platforms.join(", ")
                ),
            });
        }

        self.options.merge(toggles);
        info!("Updated options for '{}': {:?}", self.title, self.options);

        Ok(StepResult::CreateEntry {
            title: self.title.clone(),
            data: serde_json::to_value(&self.options)?,
        })
    }

    fn show_form(&self) -> StepResult {
        StepResult::ShowForm {
            step_id: STEP_USER.to_owned(),
            schema: options_schema(&self.platforms, &self.options),
            errors: BTreeMap::new(),
        }
    }
}

impl OptionsFlowHandler for OptionsFlow {
    fn handle_step(&mut self, step_id: &str, input: Option<Value>) -> Result<StepResult> {
        match step_id {
            STEP_INIT => Ok(self.init()),
            STEP_USER => {
                let toggles = input.map(OptionSet::toggles_from_input).transpose()?;
                self.submit(toggles)
            }
            other => Err(FlowError::UnknownStep(other.to_owned())),
        }
    }
}

/// One boolean per platform, sorted by name
pub fn options_schema<S: AsRef<str>>(platforms: &[S], options: &OptionSet) -> FormSchema {
    let mut names: Vec<&str> = platforms.iter().map(|p| p.as_ref()).collect();
    names.sort_unstable();
    names.dedup();

    names.into_iter().fold(FormSchema::new(), |schema, name| {
        schema.required(name, FieldKind::Boolean, options.is_enabled(name))
    })
}
