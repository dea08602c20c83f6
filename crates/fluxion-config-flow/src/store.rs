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

//! JSON-backed storage for config entries

use crate::entry::ConfigEntry;
use crate::errors::{FlowError, Result};
use crate::options::OptionSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const STORE_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    #[serde(default)]
    entries: Vec<ConfigEntry>,
}

#[derive(Debug, Default)]
pub struct EntryStore {
    /// `None` keeps everything in memory
    path: Option<PathBuf>,
    entries: Vec<ConfigEntry>,
}

impl EntryStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: StoreFile = serde_json::from_str(&content)?;
            debug!(
                "Loaded {} config entries from {}",
                file.entries.len(),
                path.display()
            );
            file.entries
        } else {
            debug!("No entry store at {}, starting empty", path.display());
            Vec::new()
        };

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn entries(&self) -> &[ConfigEntry] {
        &self.entries
    }

    pub fn get(&self, entry_id: &str) -> Option<&ConfigEntry> {
        self.entries.iter().find(|e| e.entry_id == entry_id)
    }

    pub fn entries_for_domain<'a>(
        &'a self,
        domain: &'a str,
    ) -> impl Iterator<Item = &'a ConfigEntry> + 'a {
        self.entries.iter().filter(move |e| e.domain == domain)
    }

    /// Add an entry. Nothing changes in memory unless the write succeeds.
    pub fn insert(&mut self, entry: ConfigEntry) -> Result<&ConfigEntry> {
        let mut entries = self.entries.clone();
        entries.push(entry);
        self.write(&entries)?;

        self.entries = entries;
        let index = self.entries.len() - 1;
        let stored = &self.entries[index];
        info!("Stored config entry '{}' ({})", stored.title, stored.entry_id);
        Ok(stored)
    }

    /// Replace the options of an entry, all-or-nothing like [`EntryStore::insert`]
    pub fn update_options(&mut self, entry_id: &str, options: OptionSet) -> Result<&ConfigEntry> {
        let index = self
            .entries
            .iter()
            .position(|e| e.entry_id == entry_id)
            .ok_or_else(|| FlowError::UnknownEntry(entry_id.to_owned()))?;

        let mut entries = self.entries.clone();
        entries[index].options = options;
        self.write(&entries)?;

        self.entries = entries;
        info!("Updated options of config entry {entry_id}");
        Ok(&self.entries[index])
    }

    fn write(&self, entries: &[ConfigEntry]) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = StoreFile {
            version: STORE_VERSION,
            entries: entries.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        // Atomic write
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, path)?;

        Ok(())
    }
}
