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

//! In-memory fetchers that record every call

use async_trait::async_trait;
use fluxion_price_feeds::{
    EcopowerCredentials, EntsoeCredentials, FeedError, FeedResult, FeedSource, PricePoint,
    PriceSample, SampleFetcher,
};
use parking_lot::Mutex;
use std::sync::Arc;

pub type CallLog = Arc<Mutex<Vec<String>>>;

#[derive(Debug)]
pub struct RecordingFetcher {
    name: &'static str,
    accept: bool,
    log: CallLog,
}

impl RecordingFetcher {
    pub fn new(name: &'static str, accept: bool, log: &CallLog) -> Arc<Self> {
        Arc::new(Self {
            name,
            accept,
            log: Arc::clone(log),
        })
    }

    fn outcome(&self, source: FeedSource, token: &str) -> FeedResult<PriceSample> {
        self.log.lock().push(format!("{}:{token}", self.name));
        if self.accept {
            Ok(PriceSample {
                source,
                points: vec![PricePoint {
                    start: None,
                    position: 1,
                    price: 42.0,
                }],
            })
        } else {
            Err(FeedError::AuthenticationFailed)
        }
    }
}

#[async_trait]
impl SampleFetcher<EntsoeCredentials> for RecordingFetcher {
    async fn fetch_sample(&self, credentials: &EntsoeCredentials) -> FeedResult<PriceSample> {
        self.outcome(FeedSource::Entsoe, &credentials.token)
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[async_trait]
impl SampleFetcher<EcopowerCredentials> for RecordingFetcher {
    async fn fetch_sample(&self, credentials: &EcopowerCredentials) -> FeedResult<PriceSample> {
        self.outcome(FeedSource::Ecopower, &credentials.token)
    }

    fn name(&self) -> &str {
        self.name
    }
}

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}
