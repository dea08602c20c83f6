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

mod common;

use common::{CallLog, RecordingFetcher, new_log};
use fluxion_config_flow::consts::{DOMAIN, ERROR_AUTH, ERROR_BASE, FLOW_VERSION};
use fluxion_config_flow::{
    ConfigEntry, DraftSettings, EntryStore, FlowError, FlowManager, FlowOutcome, FlowRegistry,
    OptionSet, integration,
};
use serde_json::{Value, json};
use std::path::Path;

fn manager(store_path: &Path, accept: bool, log: &CallLog) -> FlowManager {
    let mut registry = FlowRegistry::new();
    integration::register(
        &mut registry,
        RecordingFetcher::new("entsoe", accept, log),
        RecordingFetcher::new("ecopower", accept, log),
    )
    .unwrap();
    FlowManager::new(registry, EntryStore::open(store_path).unwrap())
}

fn settings_input(entsoe_token: &str) -> Value {
    serde_json::to_value(DraftSettings {
        name: "Home".to_owned(),
        entsoe_token: entsoe_token.to_owned(),
        ..DraftSettings::default()
    })
    .unwrap()
}

async fn create_entry(manager: &mut FlowManager) -> ConfigEntry {
    let started = manager.start_setup(DOMAIN).await.unwrap();
    let flow_id = started.flow_id().unwrap().to_owned();

    match manager
        .configure(&flow_id, settings_input("token"))
        .await
        .unwrap()
    {
        FlowOutcome::EntryCreated(entry) => entry,
        other => panic!("expected an entry, got {other:?}"),
    }
}

#[tokio::test]
async fn test_setup_persists_entry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.json");
    let log = new_log();
    let mut manager = manager(&path, true, &log);

    let entry = create_entry(&mut manager).await;

    assert_eq!(entry.domain, DOMAIN);
    assert_eq!(entry.version, FLOW_VERSION);
    assert_eq!(entry.title, "Home");
    assert_eq!(entry.data.entsoe_token, "token");
    assert!(entry.options.is_empty());

    let reopened = EntryStore::open(&path).unwrap();
    let stored = reopened.get(&entry.entry_id).unwrap();
    assert_eq!(stored.title, entry.title);
    assert_eq!(stored.data.entsoe_area, entry.data.entsoe_area);
    assert_eq!(stored.created_at, entry.created_at);
}

#[tokio::test]
async fn test_failed_validation_persists_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.json");
    let log = new_log();
    let mut manager = manager(&path, false, &log);

    let started = manager.start_setup(DOMAIN).await.unwrap();
    let flow_id = started.flow_id().unwrap().to_owned();
    let outcome = manager
        .configure(&flow_id, settings_input("bad"))
        .await
        .unwrap();

    let FlowOutcome::Pending { result, .. } = outcome else {
        panic!("expected the form again");
    };
    assert_eq!(
        result.errors().unwrap().get(ERROR_BASE).map(String::as_str),
        Some(ERROR_AUTH)
    );
    assert!(manager.store().entries().is_empty());
    assert!(!path.exists());
    assert_eq!(manager.in_progress(), 1);
}

#[tokio::test]
async fn test_options_merge_preserves_unspecified_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.json");
    let log = new_log();
    let mut manager = manager(&path, true, &log);
    let entry = create_entry(&mut manager).await;

    // First run fills in the defaults
    let started = manager.start_options(&entry.entry_id).await.unwrap();
    let flow_id = started.flow_id().unwrap().to_owned();
    manager
        .configure(&flow_id, json!({"sensor": true, "binary_sensor": true}))
        .await
        .unwrap();

    let started = manager.start_options(&entry.entry_id).await.unwrap();
    let flow_id = started.flow_id().unwrap().to_owned();
    let outcome = manager
        .configure(&flow_id, json!({"sensor": false}))
        .await
        .unwrap();

    let FlowOutcome::OptionsUpdated(updated) = outcome else {
        panic!("expected an options update");
    };
    let expected: OptionSet = [
        ("sensor".to_owned(), false),
        ("binary_sensor".to_owned(), true),
    ]
    .into_iter()
    .collect();
    assert_eq!(updated.options, expected);

    let reopened = EntryStore::open(&path).unwrap();
    assert_eq!(reopened.get(&entry.entry_id).unwrap().options, expected);
}

#[tokio::test]
async fn test_options_form_is_sorted_and_reflects_stored_flags() {
    let dir = tempfile::tempdir().unwrap();
    let log = new_log();
    let mut manager = manager(&dir.path().join("entries.json"), true, &log);
    let entry = create_entry(&mut manager).await;

    let started = manager.start_options(&entry.entry_id).await.unwrap();
    let flow_id = started.flow_id().unwrap().to_owned();
    manager
        .configure(&flow_id, json!({"binary_sensor": false}))
        .await
        .unwrap();

    let FlowOutcome::Pending { result, .. } = manager.start_options(&entry.entry_id).await.unwrap()
    else {
        panic!("expected the options form");
    };
    let schema = result.schema().unwrap();

    assert_eq!(schema.keys(), vec!["binary_sensor", "sensor"]);
    assert_eq!(schema.field("binary_sensor").unwrap().default, json!(false));
    assert_eq!(schema.field("sensor").unwrap().default, json!(true));
}

#[tokio::test]
async fn test_options_reject_unknown_platform() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.json");
    let log = new_log();
    let mut manager = manager(&path, true, &log);
    let entry = create_entry(&mut manager).await;

    let started = manager.start_options(&entry.entry_id).await.unwrap();
    let flow_id = started.flow_id().unwrap().to_owned();
    let err = manager
        .configure(&flow_id, json!({"sensor": false, "foo": true}))
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::InvalidField { ref field, .. } if field == "foo"));
    assert!(manager.store().get(&entry.entry_id).unwrap().options.is_empty());
    // The flow stays open for a corrected submission
    assert!(matches!(
        manager
            .configure(&flow_id, json!({"sensor": false}))
            .await
            .unwrap(),
        FlowOutcome::OptionsUpdated(_)
    ));
}

#[tokio::test]
async fn test_failed_write_creates_no_entry() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let log = new_log();
    let mut manager = manager(&blocker.join("entries.json"), true, &log);

    let started = manager.start_setup(DOMAIN).await.unwrap();
    let flow_id = started.flow_id().unwrap().to_owned();
    let err = manager
        .configure(&flow_id, settings_input("token"))
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::Storage(_)));
    assert!(manager.store().entries().is_empty());
}
