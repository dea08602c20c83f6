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

//! Credential probes: fetch one sample from a feed to prove a token works.

use crate::ecopower::{DEFAULT_ECOPOWER_URL, EcopowerApiClient};
use crate::entsoe::{DEFAULT_ENTSOE_URL, EntsoeApiClient};
use crate::errors::FeedResult;
use crate::types::PriceSample;
use async_trait::async_trait;
use std::fmt;

/// Credentials for the ENTSO-E transparency platform
#[derive(Clone, PartialEq, Eq)]
pub struct EntsoeCredentials {
    pub token: String,
    /// EIC bidding zone code, e.g. `10YBE----------2`
    pub area: String,
}

impl fmt::Debug for EntsoeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntsoeCredentials")
            .field("token", &"***")
            .field("area", &self.area)
            .finish()
    }
}

/// Credentials for the Ecopower API
#[derive(Clone, PartialEq, Eq)]
pub struct EcopowerCredentials {
    pub token: String,
}

impl fmt::Debug for EcopowerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcopowerCredentials")
            .field("token", &"***")
            .finish()
    }
}

/// Capability to fetch and parse one sample of price data with the given
/// credentials. Success means the credentials are usable.
#[async_trait]
pub trait SampleFetcher<C: Sync>: Send + Sync {
    async fn fetch_sample(&self, credentials: &C) -> FeedResult<PriceSample>;

    /// Feed name for logging
    fn name(&self) -> &str;
}

/// Live ENTSO-E probe.
///
/// Every call builds a fresh client, so nothing is pooled between checks.
#[derive(Debug, Clone)]
pub struct EntsoeProbe {
    base_url: String,
}

impl EntsoeProbe {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for EntsoeProbe {
    fn default() -> Self {
        Self::new(DEFAULT_ENTSOE_URL)
    }
}

#[async_trait]
impl SampleFetcher<EntsoeCredentials> for EntsoeProbe {
    async fn fetch_sample(&self, credentials: &EntsoeCredentials) -> FeedResult<PriceSample> {
        let client = EntsoeApiClient::new(
            self.base_url.as_str(),
            credentials.token.as_str(),
            credentials.area.as_str(),
        )?;
        client.get_data().await
    }

    fn name(&self) -> &str {
        "entsoe"
    }
}

/// Live Ecopower probe, one client per call
#[derive(Debug, Clone)]
pub struct EcopowerProbe {
    base_url: String,
}

impl EcopowerProbe {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for EcopowerProbe {
    fn default() -> Self {
        Self::new(DEFAULT_ECOPOWER_URL)
    }
}

#[async_trait]
impl SampleFetcher<EcopowerCredentials> for EcopowerProbe {
    async fn fetch_sample(&self, credentials: &EcopowerCredentials) -> FeedResult<PriceSample> {
        let client = EcopowerApiClient::new(self.base_url.as_str(), credentials.token.as_str())?;
        client.get_data().await
    }

    fn name(&self) -> &str {
        "ecopower"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FeedError;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[test]
    fn test_credentials_debug_masks_token() {
        let creds = EntsoeCredentials {
            token: "abc-123".to_owned(),
            area: "10YBE----------2".to_owned(),
        };
        assert!(!format!("{creds:?}").contains("abc-123"));

        let creds = EcopowerCredentials {
            token: "xyz".to_owned(),
        };
        assert!(!format!("{creds:?}").contains("xyz"));
    }

    #[tokio::test]
    async fn test_each_probe_call_issues_its_own_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/prices")
            .match_header("authorization", "Bearer eco")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({"prices": [{"start": "2025-10-02T00:00:00Z", "price": 1.0}]}).to_string(),
            )
            .expect(2)
            .create_async()
            .await;

        let probe = EcopowerProbe::new(server.url());
        let creds = EcopowerCredentials {
            token: "eco".to_owned(),
        };
        assert!(probe.fetch_sample(&creds).await.is_ok());
        assert!(probe.fetch_sample(&creds).await.is_ok());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_entsoe_probe_reports_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api")
            .match_query(Matcher::Any)
            .with_status(401)
            .create_async()
            .await;

        let probe = EntsoeProbe::new(format!("{}/api", server.url()));
        let creds = EntsoeCredentials {
            token: "bad".to_owned(),
            area: "10YBE----------2".to_owned(),
        };
        let result = probe.fetch_sample(&creds).await;

        assert!(matches!(result, Err(FeedError::AuthenticationFailed)));
        assert_eq!(probe.name(), "entsoe");
        mock.assert_async().await;
    }
}
