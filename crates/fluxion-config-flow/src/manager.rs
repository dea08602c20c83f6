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

//! Host-side driver for setup and options flows.
//!
//! The manager owns the registry and the entry store, keeps in-progress flows
//! by id, and turns a finished flow into a stored entry (setup) or an options
//! update (options).

use crate::consts::{STEP_INIT, STEP_USER};
use crate::entry::ConfigEntry;
use crate::errors::{FlowError, Result};
use crate::form::StepResult;
use crate::options::OptionSet;
use crate::registry::{ConfigFlowHandler, FlowRegistry, OptionsFlowHandler};
use crate::settings::DraftSettings;
use crate::store::EntryStore;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug)]
enum ActiveFlow {
    Setup {
        domain: String,
        step_id: String,
        handler: Box<dyn ConfigFlowHandler>,
    },
    Options {
        entry_id: String,
        step_id: String,
        handler: Box<dyn OptionsFlowHandler>,
    },
}

impl ActiveFlow {
    fn set_step(&mut self, next: String) {
        match self {
            Self::Setup { step_id, .. } | Self::Options { step_id, .. } => *step_id = next,
        }
    }
}

/// What a flow step produced, from the host's point of view
#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    /// The flow wants more input
    Pending { flow_id: String, result: StepResult },
    EntryCreated(ConfigEntry),
    OptionsUpdated(ConfigEntry),
}

impl FlowOutcome {
    pub fn flow_id(&self) -> Option<&str> {
        match self {
            Self::Pending { flow_id, .. } => Some(flow_id),
            Self::EntryCreated(_) | Self::OptionsUpdated(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct FlowManager {
    registry: FlowRegistry,
    store: EntryStore,
    flows: HashMap<String, ActiveFlow>,
}

impl FlowManager {
    pub fn new(registry: FlowRegistry, store: EntryStore) -> Self {
        Self {
            registry,
            store,
            flows: HashMap::new(),
        }
    }

    pub fn registry(&self) -> &FlowRegistry {
        &self.registry
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Number of flows waiting for input
    pub fn in_progress(&self) -> usize {
        self.flows.len()
    }

    /// Start a setup flow for `domain` and render its first step
    pub async fn start_setup(&mut self, domain: &str) -> Result<FlowOutcome> {
        let handler = self.registry.get(domain)?.create_setup_flow();
        let flow_id = new_flow_id();
        debug!("Starting setup flow {flow_id} for '{domain}'");

        let flow = ActiveFlow::Setup {
            domain: domain.to_owned(),
            step_id: STEP_USER.to_owned(),
            handler,
        };
        self.advance(flow_id, flow, None).await
    }

    /// Start an options flow for a stored entry
    pub async fn start_options(&mut self, entry_id: &str) -> Result<FlowOutcome> {
        let entry = self
            .store
            .get(entry_id)
            .ok_or_else(|| FlowError::UnknownEntry(entry_id.to_owned()))?;
        let handler = self
            .registry
            .get(&entry.domain)?
            .create_options_flow(entry)?;
        let flow_id = new_flow_id();
        debug!("Starting options flow {flow_id} for entry {entry_id}");

        let flow = ActiveFlow::Options {
            entry_id: entry_id.to_owned(),
            step_id: STEP_INIT.to_owned(),
            handler,
        };
        self.advance(flow_id, flow, None).await
    }

    /// Submit user input to the current step of a flow
    pub async fn configure(&mut self, flow_id: &str, input: Value) -> Result<FlowOutcome> {
        let flow = self
            .flows
            .remove(flow_id)
            .ok_or_else(|| FlowError::UnknownFlow(flow_id.to_owned()))?;
        self.advance(flow_id.to_owned(), flow, Some(input)).await
    }

    /// Drop an in-progress flow without creating anything
    pub fn abort(&mut self, flow_id: &str) -> Result<()> {
        if self.flows.remove(flow_id).is_none() {
            return Err(FlowError::UnknownFlow(flow_id.to_owned()));
        }
        debug!("Aborted flow {flow_id}");
        Ok(())
    }

    async fn advance(
        &mut self,
        flow_id: String,
        mut flow: ActiveFlow,
        input: Option<Value>,
    ) -> Result<FlowOutcome> {
        let step = match &mut flow {
            ActiveFlow::Setup {
                step_id, handler, ..
            } => handler.handle_step(step_id, input).await,
            ActiveFlow::Options {
                step_id, handler, ..
            } => handler.handle_step(step_id, input),
        };

        let result = match step {
            Ok(result) => result,
            Err(e) => {
                // Keep the flow so the user can correct the input
                warn!("Flow {flow_id} step failed: {e}");
                self.flows.insert(flow_id, flow);
                return Err(e);
            }
        };

        let (title, data) = match result {
            StepResult::ShowForm {
                step_id,
                schema,
                errors,
            } => {
                flow.set_step(step_id.clone());
                self.flows.insert(flow_id.clone(), flow);
                let result = StepResult::ShowForm {
                    step_id,
                    schema,
                    errors,
                };
                return Ok(FlowOutcome::Pending { flow_id, result });
            }
            StepResult::CreateEntry { title, data } => (title, data),
        };

        match flow {
            ActiveFlow::Setup { domain, .. } => {
                let version = self.registry.get(&domain)?.version;
                let settings: DraftSettings = serde_json::from_value(data)?;
                let entry = ConfigEntry::new(domain, version, title, settings);
                let stored = self.store.insert(entry)?.clone();
                info!("✅ Setup flow {flow_id} created entry {}", stored.entry_id);
                Ok(FlowOutcome::EntryCreated(stored))
            }
            ActiveFlow::Options { entry_id, .. } => {
                let options: OptionSet = serde_json::from_value(data)?;
                let updated = self.store.update_options(&entry_id, options)?.clone();
                info!("✅ Options flow {flow_id} updated entry {entry_id}");
                Ok(FlowOutcome::OptionsUpdated(updated))
            }
        }
    }
}

fn new_flow_id() -> String {
    Uuid::new_v4().simple().to_string()
}
