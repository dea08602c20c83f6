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

//! Setup flow: collect connection settings, check the tokens, create the entry.
//!
//! States: `Collecting` -> `Validating` -> `Collecting` (form with `auth` error)
//! or `Completed`. Feeds are checked one after the other, ENTSO-E first, each
//! with a single request and no retry.

use crate::consts::{
    CONF_ECOPWR_TOKEN, CONF_ENTSOE_AREA, CONF_ENTSOE_FACTOR_A, CONF_ENTSOE_FACTOR_B,
    CONF_ENTSOE_FACTOR_C, CONF_ENTSOE_FACTOR_D, CONF_ENTSOE_TOKEN, CONF_NAME, ERROR_AUTH,
    ERROR_BASE, STEP_USER,
};
use crate::errors::{FlowError, Result};
use crate::form::{FieldKind, FormSchema, StepResult};
use crate::registry::ConfigFlowHandler;
use crate::settings::DraftSettings;
use async_trait::async_trait;
use fluxion_price_feeds::{
    EcopowerCredentials, EntsoeCredentials, FeedResult, PriceSample, SampleFetcher,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupState {
    Collecting,
    Validating,
    Completed,
}

/// Result of checking one feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedCheck {
    /// No token supplied for this feed
    Skipped,
    Passed,
    Failed(String),
}

impl FeedCheck {
    fn from_fetch(feed: &str, outcome: FeedResult<PriceSample>) -> Self {
        match outcome {
            Ok(sample) => {
                debug!("{feed} credentials ok ({} price points)", sample.len());
                Self::Passed
            }
            Err(e) if e.is_auth_rejection() => {
                error!("{feed} rejected the credentials: {e}");
                Self::Failed(e.to_string())
            }
            Err(e) => {
                error!("{feed} sample could not be fetched: {e}");
                Self::Failed(e.to_string())
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Per-feed outcome of the last validation pass.
///
/// The user only ever sees the single `auth` marker; this is for logs and
/// for hosts that want more detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub entsoe: FeedCheck,
    pub ecopower: FeedCheck,
}

impl ValidationReport {
    /// Every supplied token passed and at least one was supplied
    pub fn is_valid(&self) -> bool {
        let any_supplied = self.entsoe != FeedCheck::Skipped || self.ecopower != FeedCheck::Skipped;
        any_supplied && !self.entsoe.is_failed() && !self.ecopower.is_failed()
    }
}

pub struct SetupFlow {
    entsoe: Arc<dyn SampleFetcher<EntsoeCredentials>>,
    ecopower: Arc<dyn SampleFetcher<EcopowerCredentials>>,
    state: SetupState,
    errors: BTreeMap<String, String>,
    last_report: Option<ValidationReport>,
}

impl fmt::Debug for SetupFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupFlow")
            .field("entsoe", &self.entsoe.name())
            .field("ecopower", &self.ecopower.name())
            .field("state", &self.state)
            .field("errors", &self.errors)
            .field("last_report", &self.last_report)
            .finish()
    }
}

impl SetupFlow {
    pub fn new(
        entsoe: Arc<dyn SampleFetcher<EntsoeCredentials>>,
        ecopower: Arc<dyn SampleFetcher<EcopowerCredentials>>,
    ) -> Self {
        Self {
            entsoe,
            ecopower,
            state: SetupState::Collecting,
            errors: BTreeMap::new(),
            last_report: None,
        }
    }

    pub fn state(&self) -> SetupState {
        self.state
    }

    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.last_report.as_ref()
    }

    /// First render: the form pre-filled with defaults
    pub fn start(&mut self) -> StepResult {
        self.errors.clear();
        self.show_form(&DraftSettings::default())
    }

    /// Handle a submission. `None` behaves like [`SetupFlow::start`].
    pub async fn submit(&mut self, input: Option<DraftSettings>) -> Result<StepResult> {
        if self.state == SetupState::Completed {
            return Err(FlowError::FlowCompleted);
        }

        let Some(draft) = input else {
            return Ok(self.start());
        };
        draft.check_fields()?;

        self.errors.clear();
        self.state = SetupState::Validating;
        let report = self.validate(&draft).await;
        let valid = report.is_valid();
        self.last_report = Some(report);

        if valid {
            self.state = SetupState::Completed;
            info!("✅ Created configuration '{}'", draft.name);
            return Ok(StepResult::CreateEntry {
                title: draft.name.clone(),
                data: serde_json::to_value(&draft)?,
            });
        }

        self.state = SetupState::Collecting;
        self.errors.insert(ERROR_BASE.to_owned(), ERROR_AUTH.to_owned());
        error!("cannot authenticate - did you provide at least one API token?");
        Ok(self.show_form(&draft))
    }

    async fn validate(&self, draft: &DraftSettings) -> ValidationReport {
        let entsoe = match draft.entsoe_credentials() {
            Some(credentials) => FeedCheck::from_fetch(
                self.entsoe.name(),
                self.entsoe.fetch_sample(&credentials).await,
            ),
            None => FeedCheck::Skipped,
        };

        let ecopower = match draft.ecopower_credentials() {
            Some(credentials) => FeedCheck::from_fetch(
                self.ecopower.name(),
                self.ecopower.fetch_sample(&credentials).await,
            ),
            None => FeedCheck::Skipped,
        };

        ValidationReport { entsoe, ecopower }
    }

    fn show_form(&self, draft: &DraftSettings) -> StepResult {
        StepResult::ShowForm {
            step_id: STEP_USER.to_owned(),
            schema: setup_schema(draft),
            errors: self.errors.clone(),
        }
    }
}

#[async_trait]
impl ConfigFlowHandler for SetupFlow {
    async fn handle_step(&mut self, step_id: &str, input: Option<Value>) -> Result<StepResult> {
        if step_id != STEP_USER {
            return Err(FlowError::UnknownStep(step_id.to_owned()));
        }
        let draft = input.map(DraftSettings::from_input).transpose()?;
        self.submit(draft).await
    }
}

/// Setup form, pre-filled with `draft`
pub fn setup_schema(draft: &DraftSettings) -> FormSchema {
    FormSchema::new()
        .required(CONF_NAME, FieldKind::String, draft.name.as_str())
        .optional(CONF_ENTSOE_TOKEN, FieldKind::String, draft.entsoe_token.as_str())
        .required(CONF_ENTSOE_AREA, FieldKind::String, draft.entsoe_area.as_str())
        .required(CONF_ENTSOE_FACTOR_A, FieldKind::PositiveFloat, draft.factor_a)
        .required(CONF_ENTSOE_FACTOR_B, FieldKind::PositiveFloat, draft.factor_b)
        .required(CONF_ENTSOE_FACTOR_C, FieldKind::PositiveFloat, draft.factor_c)
        .required(CONF_ENTSOE_FACTOR_D, FieldKind::PositiveFloat, draft.factor_d)
        .optional(CONF_ECOPWR_TOKEN, FieldKind::String, draft.ecopwr_token.as_str())
}
