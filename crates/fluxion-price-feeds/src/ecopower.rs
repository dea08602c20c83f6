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

//! Ecopower dynamic tariff client

use crate::errors::{FeedError, FeedResult};
use crate::types::{FeedSource, PricePoint, PriceSample};
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, error, info};

pub const DEFAULT_ECOPOWER_URL: &str = "https://api.ecopower.be/v1";

#[derive(Debug, Deserialize)]
struct EcopowerPriceResponse {
    #[serde(default)]
    prices: Vec<EcopowerPrice>,
}

#[derive(Debug, Deserialize)]
struct EcopowerPrice {
    start: DateTime<Utc>,
    price: f64,
}

/// Ecopower REST API client
#[derive(Clone)]
pub struct EcopowerApiClient {
    base_url: String,
    token: String,
    client: Client,
}

impl fmt::Debug for EcopowerApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcopowerApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl EcopowerApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> FeedResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| FeedError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            client,
        })
    }

    /// Fetch the tariff published for the current UTC day
    pub async fn get_data(&self) -> FeedResult<PriceSample> {
        self.get_prices(Utc::now().date_naive()).await
    }

    /// Fetch the tariff for a given delivery day
    pub async fn get_prices(&self, day: NaiveDate) -> FeedResult<PriceSample> {
        let url = format!("{}/prices", self.base_url.trim_end_matches('/'));
        let date = day.format("%Y-%m-%d").to_string();
        debug!("🔍 [ECOPOWER] Requesting prices for {}", date);
        debug!("   URL: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("date", date.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                let parsed: EcopowerPriceResponse = serde_json::from_str(&body)?;
                let sample = into_sample(parsed)?;
                info!("✅ [ECOPOWER] Received {} price points for {}", sample.len(), date);
                Ok(sample)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("❌ [ECOPOWER] API token rejected");
                Err(FeedError::AuthenticationFailed)
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                error!("❌ [ECOPOWER] Status {}: {}", status, error_text);
                Err(FeedError::ApiError {
                    status: status.as_u16(),
                    message: error_text,
                })
            }
        }
    }
}

fn into_sample(response: EcopowerPriceResponse) -> FeedResult<PriceSample> {
    if response.prices.is_empty() {
        return Err(FeedError::InvalidResponse(
            "Ecopower returned no prices".to_owned(),
        ));
    }

    let mut prices = response.prices;
    prices.sort_by_key(|p| p.start);

    let points = prices
        .into_iter()
        .zip(1u32..)
        .map(|(p, position)| PricePoint {
            start: Some(p.start),
            position,
            price: p.price,
        })
        .collect();

    Ok(PriceSample {
        source: FeedSource::Ecopower,
        points,
    })
}
