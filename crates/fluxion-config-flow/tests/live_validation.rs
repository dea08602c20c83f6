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

//! Setup flow against mocked feed APIs

use fluxion_config_flow::consts::{DOMAIN, ERROR_AUTH, ERROR_BASE};
use fluxion_config_flow::{
    DraftSettings, EntryStore, FeedCheck, FlowManager, FlowOutcome, FlowRegistry, SetupFlow,
    integration,
};
use fluxion_price_feeds::{EcopowerProbe, EntsoeProbe};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::sync::Arc;

const PUBLICATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Publication_MarketDocument xmlns="urn:iec62325.351:tc57wg16:451-3:publicationdocument:7:3">
    <TimeSeries>
        <Period>
            <timeInterval>
                <start>2025-10-01T22:00Z</start>
                <end>2025-10-02T22:00Z</end>
            </timeInterval>
            <resolution>PT60M</resolution>
            <Point>
                <position>1</position>
                <price.amount>87.12</price.amount>
            </Point>
        </Period>
    </TimeSeries>
</Publication_MarketDocument>"#;

fn manager(server: &ServerGuard) -> FlowManager {
    let mut registry = FlowRegistry::new();
    integration::register_live(
        &mut registry,
        &format!("{}/api", server.url()),
        &server.url(),
    )
    .unwrap();
    FlowManager::new(registry, EntryStore::in_memory())
}

async fn submit(
    manager: &mut FlowManager,
    entsoe_token: &str,
    ecopwr_token: &str,
) -> FlowOutcome {
    let started = manager.start_setup(DOMAIN).await.unwrap();
    let flow_id = started.flow_id().unwrap().to_owned();
    let input = serde_json::to_value(DraftSettings {
        entsoe_token: entsoe_token.to_owned(),
        ecopwr_token: ecopwr_token.to_owned(),
        ..DraftSettings::default()
    })
    .unwrap();
    manager.configure(&flow_id, input).await.unwrap()
}

#[tokio::test]
async fn test_entsoe_token_accepted() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("securityToken".into(), "good".into()),
            Matcher::UrlEncoded("in_Domain".into(), "10YBE----------2".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(PUBLICATION)
        .expect(1)
        .create_async()
        .await;

    let mut manager = manager(&server);
    let outcome = submit(&mut manager, "good", "").await;

    assert!(matches!(outcome, FlowOutcome::EntryCreated(_)));
    assert_eq!(manager.store().entries().len(), 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ecopower_rejection_is_auth_error() {
    let mut server = Server::new_async().await;
    let entsoe = server
        .mock("GET", "/api")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(PUBLICATION)
        .expect(1)
        .create_async()
        .await;
    let ecopower = server
        .mock("GET", "/prices")
        .match_header("authorization", "Bearer wrong")
        .match_query(Matcher::Any)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let mut manager = manager(&server);
    let outcome = submit(&mut manager, "good", "wrong").await;

    let FlowOutcome::Pending { result, .. } = outcome else {
        panic!("expected the form again");
    };
    assert_eq!(
        result.errors().unwrap().get(ERROR_BASE).map(String::as_str),
        Some(ERROR_AUTH)
    );
    assert!(manager.store().entries().is_empty());
    entsoe.assert_async().await;
    ecopower.assert_async().await;
}

#[tokio::test]
async fn test_malformed_ecopower_response_is_auth_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/prices")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"unexpected": true}).to_string())
        .create_async()
        .await;

    let mut manager = manager(&server);
    let outcome = submit(&mut manager, "", "eco").await;

    assert!(matches!(outcome, FlowOutcome::Pending { .. }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_feed_is_auth_error() {
    let mut registry = FlowRegistry::new();
    integration::register_live(&mut registry, "http://127.0.0.1:9/api", "http://127.0.0.1:9")
        .unwrap();
    let mut manager = FlowManager::new(registry, EntryStore::in_memory());

    let outcome = submit(&mut manager, "token", "").await;

    assert!(matches!(outcome, FlowOutcome::Pending { .. }));
}

#[tokio::test]
async fn test_failure_report_keeps_token_out() {
    let mut flow = SetupFlow::new(
        Arc::new(EntsoeProbe::new("http://127.0.0.1:1/api")),
        Arc::new(EcopowerProbe::new("http://127.0.0.1:1")),
    );
    let draft = DraftSettings {
        entsoe_token: "SECRETTOKEN123".to_owned(),
        ..DraftSettings::default()
    };

    let result = flow.submit(Some(draft)).await.unwrap();
    assert!(result.is_form());

    let FeedCheck::Failed(reason) = &flow.last_report().unwrap().entsoe else {
        panic!("expected the ENTSO-E check to fail");
    };
    assert!(!reason.contains("SECRETTOKEN123"), "token leaked: {reason}");
}
