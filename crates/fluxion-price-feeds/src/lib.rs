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

//! Day-ahead price feed clients.
//!
//! The setup flow only needs one thing from these feeds: "can I fetch and
//! parse a sample with these credentials". [`SampleFetcher`] is that capability;
//! [`EntsoeProbe`] and [`EcopowerProbe`] are the live implementations.

pub mod ecopower;
pub mod entsoe;
pub mod errors;
pub mod probe;
pub mod types;

pub use ecopower::{DEFAULT_ECOPOWER_URL, EcopowerApiClient};
pub use entsoe::{DEFAULT_ENTSOE_URL, EntsoeApiClient};
pub use errors::{FeedError, FeedResult};
pub use probe::{EcopowerCredentials, EcopowerProbe, EntsoeCredentials, EntsoeProbe, SampleFetcher};
pub use types::{FeedSource, PricePoint, PriceSample};
