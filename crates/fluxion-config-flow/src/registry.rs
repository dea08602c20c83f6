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

//! Explicit flow registration.
//!
//! Integrations register their flows once during start-up by handing the
//! registry a [`FlowRegistration`]. Nothing registers itself implicitly.

use crate::entry::ConfigEntry;
use crate::errors::{FlowError, Result};
use crate::form::StepResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A setup flow instance driven by the host
#[async_trait]
pub trait ConfigFlowHandler: Send + fmt::Debug {
    /// Run `step_id`. `None` input means the step is shown for the first time.
    async fn handle_step(&mut self, step_id: &str, input: Option<Value>) -> Result<StepResult>;
}

/// An options flow instance driven by the host
pub trait OptionsFlowHandler: Send + fmt::Debug {
    fn handle_step(&mut self, step_id: &str, input: Option<Value>) -> Result<StepResult>;
}

pub type SetupFactory = Arc<dyn Fn() -> Box<dyn ConfigFlowHandler> + Send + Sync>;
pub type OptionsFactory = Arc<dyn Fn(&ConfigEntry) -> Box<dyn OptionsFlowHandler> + Send + Sync>;

/// How the integration talks to its data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionClass {
    CloudPoll,
    CloudPush,
    LocalPoll,
    LocalPush,
}

/// Capabilities an integration hands to the registry
#[derive(Clone)]
pub struct FlowRegistration {
    pub domain: String,
    pub version: u32,
    pub connection_class: ConnectionClass,
    setup: SetupFactory,
    options: Option<OptionsFactory>,
}

impl fmt::Debug for FlowRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowRegistration")
            .field("domain", &self.domain)
            .field("version", &self.version)
            .field("connection_class", &self.connection_class)
            .field("supports_options", &self.options.is_some())
            .finish_non_exhaustive()
    }
}

impl FlowRegistration {
    pub fn new<F>(
        domain: impl Into<String>,
        version: u32,
        connection_class: ConnectionClass,
        setup: F,
    ) -> Self
    where
        F: Fn() -> Box<dyn ConfigFlowHandler> + Send + Sync + 'static,
    {
        Self {
            domain: domain.into(),
            version,
            connection_class,
            setup: Arc::new(setup),
            options: None,
        }
    }

    #[must_use]
    pub fn with_options<F>(mut self, options: F) -> Self
    where
        F: Fn(&ConfigEntry) -> Box<dyn OptionsFlowHandler> + Send + Sync + 'static,
    {
        self.options = Some(Arc::new(options));
        self
    }

    pub fn supports_options(&self) -> bool {
        self.options.is_some()
    }

    pub fn create_setup_flow(&self) -> Box<dyn ConfigFlowHandler> {
        (self.setup)()
    }

    pub fn create_options_flow(&self, entry: &ConfigEntry) -> Result<Box<dyn OptionsFlowHandler>> {
        let factory = self
            .options
            .as_ref()
            .ok_or_else(|| FlowError::OptionsNotSupported(self.domain.clone()))?;
        Ok(factory(entry))
    }
}

#[derive(Debug, Default)]
pub struct FlowRegistry {
    flows: HashMap<String, FlowRegistration>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, registration: FlowRegistration) -> Result<()> {
        if self.flows.contains_key(&registration.domain) {
            return Err(FlowError::DuplicateDomain(registration.domain));
        }
        debug!(
            "Registered flow for '{}' (v{}, {:?})",
            registration.domain, registration.version, registration.connection_class
        );
        self.flows.insert(registration.domain.clone(), registration);
        Ok(())
    }

    pub fn get(&self, domain: &str) -> Result<&FlowRegistration> {
        self.flows
            .get(domain)
            .ok_or_else(|| FlowError::UnknownDomain(domain.to_owned()))
    }

    /// Registered domains, sorted
    pub fn domains(&self) -> Vec<&str> {
        let mut domains: Vec<&str> = self.flows.keys().map(String::as_str).collect();
        domains.sort_unstable();
        domains
    }
}
