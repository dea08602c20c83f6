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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which upstream provider a sample came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    Entsoe,
    Ecopower,
}

impl FeedSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Entsoe => "ENTSO-E",
            Self::Ecopower => "Ecopower",
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One raw price point as published by the feed (EUR/MWh)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Start of the interval, when the feed reports one
    pub start: Option<DateTime<Utc>>,
    /// 1-based position inside the published period
    pub position: u32,
    pub price: f64,
}

/// Parsed result of a single sample fetch.
///
/// Only used as proof that the credentials work; the consumer price formula
/// is applied elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub source: FeedSource,
    pub points: Vec<PricePoint>,
}

impl PriceSample {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
