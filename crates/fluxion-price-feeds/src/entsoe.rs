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

//! ENTSO-E Transparency Platform client (day-ahead prices, document type A44)

use crate::errors::{FeedError, FeedResult};
use crate::types::{FeedSource, PricePoint, PriceSample};
use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::{Client, StatusCode};
use std::fmt;
use tracing::{debug, error, info};

pub const DEFAULT_ENTSOE_URL: &str = "https://web-api.tp.entsoe.eu/api";

/// Day-ahead prices document type
const DOCUMENT_TYPE: &str = "A44";

const PUBLICATION_ROOT: &str = "Publication_MarketDocument";
const ACKNOWLEDGEMENT_ROOT: &str = "Acknowledgement_MarketDocument";

/// ENTSO-E REST API client
#[derive(Clone)]
pub struct EntsoeApiClient {
    base_url: String,
    token: String,
    area: String,
    client: Client,
}

impl fmt::Debug for EntsoeApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntsoeApiClient")
            .field("base_url", &self.base_url)
            .field("area", &self.area)
            .finish_non_exhaustive()
    }
}

impl EntsoeApiClient {
    /// Create a client bound to one security token and bidding zone.
    ///
    /// The underlying HTTP client keeps the transport's default timeout.
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        area: impl Into<String>,
    ) -> FeedResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| FeedError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            area: area.into(),
            client,
        })
    }

    /// Fetch day-ahead prices for the current UTC day
    pub async fn get_data(&self) -> FeedResult<PriceSample> {
        let start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        self.get_day_ahead(start, start + Duration::days(1)).await
    }

    /// Fetch day-ahead prices for an explicit window
    pub async fn get_day_ahead(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> FeedResult<PriceSample> {
        let period_start = format_period(start);
        let period_end = format_period(end);
        debug!(
            "🔍 [ENTSO-E] Requesting day-ahead prices for {} ({} - {})",
            self.area, period_start, period_end
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("securityToken", self.token.as_str()),
                ("documentType", DOCUMENT_TYPE),
                ("in_Domain", self.area.as_str()),
                ("out_Domain", self.area.as_str()),
                ("periodStart", period_start.as_str()),
                ("periodEnd", period_end.as_str()),
            ])
            .send()
            .await
            .map_err(redact_url)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!("❌ [ENTSO-E] Security token rejected ({status})");
            return Err(FeedError::AuthenticationFailed);
        }

        let body = response.text().await.map_err(redact_url)?;
        if !status.is_success() {
            // Bad requests come back as an acknowledgement document with a reason
            return match parse_market_document(&body) {
                Err(rejected @ FeedError::Rejected(_)) => {
                    error!("❌ [ENTSO-E] {rejected}");
                    Err(rejected)
                }
                _ => {
                    error!("❌ [ENTSO-E] Status {}: {}", status, body);
                    Err(FeedError::ApiError {
                        status: status.as_u16(),
                        message: body,
                    })
                }
            };
        }

        let sample = parse_market_document(&body)?;
        info!(
            "✅ [ENTSO-E] Received {} price points for {}",
            sample.len(),
            self.area
        );
        Ok(sample)
    }
}

/// The request URL carries the security token, keep it out of error text
fn redact_url(e: reqwest::Error) -> FeedError {
    FeedError::HttpError(e.without_url())
}

fn format_period(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d%H%M").to_string()
}

fn xml_error(e: impl fmt::Display) -> FeedError {
    FeedError::InvalidResponse(format!("Malformed XML: {e}"))
}

fn path_ends_with(path: &[String], suffix: &[&str]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(have, want)| have == want)
}

/// "PT15M" / "PT60M" -> minutes
fn parse_resolution(value: &str) -> Option<i64> {
    value
        .strip_prefix("PT")
        .and_then(|rest| rest.strip_suffix('M'))
        .and_then(|minutes| minutes.parse().ok())
        .filter(|minutes| *minutes > 0)
}

fn parse_interval_start(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|dt| dt.and_utc())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

/// Start of the 1-based `position` within a period
fn point_start(begin: DateTime<Utc>, minutes: i64, position: u32) -> FeedResult<DateTime<Utc>> {
    minutes
        .checked_mul(i64::from(position.saturating_sub(1)))
        .and_then(Duration::try_minutes)
        .and_then(|offset| begin.checked_add_signed(offset))
        .ok_or_else(|| {
            FeedError::InvalidResponse(format!(
                "Point {position} is out of range for a {minutes} minute resolution"
            ))
        })
}

/// Parse a market document returned by the transparency platform.
///
/// An acknowledgement document is turned into [`FeedError::Rejected`] carrying
/// the reason text. A publication document without any price point is
/// considered invalid.
pub fn parse_market_document(xml: &str) -> FeedResult<PriceSample> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut root: Option<String> = None;
    let mut path: Vec<String> = Vec::new();
    let mut points = Vec::new();
    let mut reasons: Vec<String> = Vec::new();

    let mut period_start: Option<DateTime<Utc>> = None;
    let mut resolution_minutes: Option<i64> = None;
    let mut position: Option<u32> = None;
    let mut price: Option<f64> = None;

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if root.is_none() {
                    root = Some(name.clone());
                }
                match name.as_str() {
                    "Period" => {
                        period_start = None;
                        resolution_minutes = None;
                    }
                    "Point" => {
                        position = None;
                        price = None;
                    }
                    _ => {}
                }
                path.push(name);
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"Point"
                    && let (Some(pos), Some(amount)) = (position.take(), price.take())
                {
                    let start = match (period_start, resolution_minutes) {
                        (Some(begin), Some(minutes)) => {
                            Some(point_start(begin, minutes, pos)?)
                        }
                        _ => None,
                    };
                    points.push(PricePoint {
                        start,
                        position: pos,
                        price: amount,
                    });
                }
                path.pop();
            }
            Event::Text(t) => {
                let text = t.unescape().map_err(xml_error)?;
                let text = text.trim();
                if path_ends_with(&path, &["Point", "position"]) {
                    let pos = text.parse::<u32>().map_err(|_| {
                        FeedError::InvalidResponse(format!("Invalid point position '{text}'"))
                    })?;
                    if pos == 0 {
                        return Err(FeedError::InvalidResponse(
                            "Point positions are 1-based".to_owned(),
                        ));
                    }
                    position = Some(pos);
                } else if path_ends_with(&path, &["Point", "price.amount"]) {
                    price = Some(text.parse::<f64>().map_err(|_| {
                        FeedError::InvalidResponse(format!("Invalid price amount '{text}'"))
                    })?);
                } else if path_ends_with(&path, &["Period", "timeInterval", "start"]) {
                    period_start = parse_interval_start(text);
                } else if path_ends_with(&path, &["Period", "resolution"]) {
                    resolution_minutes = parse_resolution(text);
                } else if path_ends_with(&path, &["Reason", "text"]) {
                    reasons.push(text.to_owned());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match root.as_deref() {
        Some(PUBLICATION_ROOT) => {}
        Some(ACKNOWLEDGEMENT_ROOT) => {
            let reason = if reasons.is_empty() {
                "no reason given".to_owned()
            } else {
                reasons.join("; ")
            };
            return Err(FeedError::Rejected(reason));
        }
        Some(other) => {
            return Err(FeedError::InvalidResponse(format!(
                "Unexpected document type: {other}"
            )));
        }
        None => return Err(FeedError::InvalidResponse("Empty document".to_owned())),
    }

    if points.is_empty() {
        return Err(FeedError::InvalidResponse(
            "Market document contains no price points".to_owned(),
        ));
    }

    Ok(PriceSample {
        source: FeedSource::Entsoe,
        points,
    })
}
