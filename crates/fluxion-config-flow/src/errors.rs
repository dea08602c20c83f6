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

//! Error types for flow handling.
//!
//! Credential failures are never errors here: they come back as a form with
//! the `auth` marker. These variants cover host-side misuse and storage.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("no flow registered for domain '{0}'")]
    UnknownDomain(String),

    #[error("a flow is already registered for domain '{0}'")]
    DuplicateDomain(String),

    #[error("domain '{0}' does not support options")]
    OptionsNotSupported(String),

    #[error("unknown flow id: {0}")]
    UnknownFlow(String),

    #[error("unknown config entry: {0}")]
    UnknownEntry(String),

    #[error("unknown step '{0}'")]
    UnknownStep(String),

    #[error("invalid user input: {0}")]
    InvalidInput(String),

    #[error("invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("flow has already completed")]
    FlowCompleted,

    #[error("entry store error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("entry store serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowError>;
