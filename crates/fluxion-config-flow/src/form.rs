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

//! Form descriptors and step results handed back to the host.
//!
//! The host renders these; nothing here knows how.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    PositiveFloat,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub key: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Pre-filled value shown to the user
    pub default: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormSchema {
    pub fields: Vec<FormField>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(self, key: &str, kind: FieldKind, default: impl Into<Value>) -> Self {
        self.push(key, kind, true, default.into())
    }

    #[must_use]
    pub fn optional(self, key: &str, kind: FieldKind, default: impl Into<Value>) -> Self {
        self.push(key, kind, false, default.into())
    }

    fn push(mut self, key: &str, kind: FieldKind, required: bool, default: Value) -> Self {
        self.fields.push(FormField {
            key: key.to_owned(),
            kind,
            required,
            default,
        });
        self
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.key.as_str()).collect()
    }
}

/// Outcome of running one flow step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StepResult {
    /// Ask the user for (more) input
    ShowForm {
        step_id: String,
        schema: FormSchema,
        errors: BTreeMap<String, String>,
    },
    /// Flow finished; the host persists `data` under `title`
    CreateEntry { title: String, data: Value },
}

impl StepResult {
    pub fn is_form(&self) -> bool {
        matches!(self, Self::ShowForm { .. })
    }

    pub fn errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Self::ShowForm { errors, .. } => Some(errors),
            Self::CreateEntry { .. } => None,
        }
    }

    pub fn schema(&self) -> Option<&FormSchema> {
        match self {
            Self::ShowForm { schema, .. } => Some(schema),
            Self::CreateEntry { .. } => None,
        }
    }
}
