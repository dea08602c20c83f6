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

//! Setup and options flows for the dynamic grid prices integration.
//!
//! [`SetupFlow`] collects connection settings and only creates an entry once
//! at least one price feed accepted its token. [`OptionsFlow`] toggles the
//! platforms of an existing entry. Hosts drive both through [`FlowManager`]
//! after calling [`integration::register`].

pub mod consts;
pub mod entry;
pub mod errors;
pub mod form;
pub mod integration;
pub mod manager;
pub mod options;
pub mod options_flow;
pub mod registry;
pub mod settings;
pub mod setup_flow;
pub mod store;

pub use entry::ConfigEntry;
pub use errors::{FlowError, Result};
pub use form::{FieldKind, FormField, FormSchema, StepResult};
pub use manager::{FlowManager, FlowOutcome};
pub use options::OptionSet;
pub use options_flow::{OptionsFlow, options_schema};
pub use registry::{
    ConfigFlowHandler, ConnectionClass, FlowRegistration, FlowRegistry, OptionsFlowHandler,
};
pub use settings::{DraftSettings, mask_token};
pub use setup_flow::{FeedCheck, SetupFlow, SetupState, ValidationReport, setup_schema};
pub use store::EntryStore;
