use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::FallbackRates;
use crate::errors::{MortgageError, Result};
use crate::types::RatePreset;

/// FRED series for the 30-year fixed average
pub const MORTGAGE_30_SERIES: &str = "MORTGAGE30US";
/// FRED series for the 15-year fixed average
pub const MORTGAGE_15_SERIES: &str = "MORTGAGE15US";

/// a published annual rate in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedRate {
    pub rate_percent: Decimal,
    /// observation date, none for fallback values
    pub as_of: Option<NaiveDate>,
}

impl QuotedRate {
    pub fn published(rate_percent: Decimal, as_of: NaiveDate) -> Self {
        Self {
            rate_percent,
            as_of: Some(as_of),
        }
    }

    pub fn fallback(rate_percent: Decimal) -> Self {
        Self {
            rate_percent,
            as_of: None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.as_of.is_none()
    }
}

/// source of the latest observation for a rate series
pub trait RateFeed {
    fn latest(&self, series_id: &str) -> Result<QuotedRate>;
}

/// in-memory feed
#[derive(Debug, Clone, Default)]
pub struct StaticRateFeed {
    rates: HashMap<String, QuotedRate>,
}

impl StaticRateFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, series_id: &str, rate: QuotedRate) -> Self {
        self.rates.insert(series_id.to_string(), rate);
        self
    }
}

impl RateFeed for StaticRateFeed {
    fn latest(&self, series_id: &str) -> Result<QuotedRate> {
        self.rates
            .get(series_id)
            .copied()
            .ok_or_else(|| MortgageError::RateFeed {
                series_id: series_id.to_string(),
                message: "series not available".to_string(),
            })
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

/// feed over FRED `series/observations` payloads, newest observation first
#[derive(Debug, Clone, Default)]
pub struct FredObservations {
    payloads: HashMap<String, String>,
}

impl FredObservations {
    pub fn new() -> Self {
        Self::default()
    }

    /// register the raw json body returned for a series
    pub fn with_payload(mut self, series_id: &str, json: impl Into<String>) -> Self {
        self.payloads.insert(series_id.to_string(), json.into());
        self
    }

    /// parse the newest observation out of a payload
    pub fn parse_latest(series_id: &str, json: &str) -> Result<QuotedRate> {
        let feed_error = |message: String| MortgageError::RateFeed {
            series_id: series_id.to_string(),
            message,
        };

        let response: ObservationsResponse =
            serde_json::from_str(json).map_err(|e| feed_error(e.to_string()))?;

        let obs = response
            .observations
            .first()
            .ok_or_else(|| feed_error("no observations".to_string()))?;

        // FRED reports missing values as "."
        let rate_percent = Decimal::from_str(obs.value.trim())
            .map_err(|_| feed_error(format!("unusable value {:?}", obs.value)))?;

        let as_of = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|_| feed_error(format!("unusable date {:?}", obs.date)))?;

        Ok(QuotedRate::published(rate_percent, as_of))
    }
}

impl RateFeed for FredObservations {
    fn latest(&self, series_id: &str) -> Result<QuotedRate> {
        let json = self.payloads.get(series_id).ok_or_else(|| MortgageError::RateFeed {
            series_id: series_id.to_string(),
            message: "no payload".to_string(),
        })?;
        Self::parse_latest(series_id, json)
    }
}

/// current 30-year and 15-year fixed rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRates {
    pub thirty_year: QuotedRate,
    pub fifteen_year: QuotedRate,
}

impl MarketRates {
    /// fallback values only
    pub fn fallback(fallbacks: &FallbackRates) -> Self {
        Self {
            thirty_year: QuotedRate::fallback(fallbacks.thirty_year_percent),
            fifteen_year: QuotedRate::fallback(fallbacks.fifteen_year_percent),
        }
    }

    /// query the feed for both series, substituting fallbacks on any failure
    pub fn fetch(feed: &dyn RateFeed, fallbacks: &FallbackRates) -> Self {
        Self {
            thirty_year: latest_or(feed, MORTGAGE_30_SERIES, fallbacks.thirty_year_percent),
            fifteen_year: latest_or(feed, MORTGAGE_15_SERIES, fallbacks.fifteen_year_percent),
        }
    }

    /// annual rate percent for a preset; custom starts from the 30-year rate
    pub fn rate_for(&self, preset: RatePreset) -> Decimal {
        match preset {
            RatePreset::ThirtyYearFixed | RatePreset::Custom => self.thirty_year.rate_percent,
            RatePreset::FifteenYearFixed => self.fifteen_year.rate_percent,
        }
    }

    /// option label, e.g. "30-year fixed (6.96%)"
    pub fn label(&self, preset: RatePreset) -> String {
        match preset {
            RatePreset::Custom => preset.name().to_string(),
            _ => format!("{} ({:.2}%)", preset.name(), self.rate_for(preset)),
        }
    }
}

fn latest_or(feed: &dyn RateFeed, series_id: &str, fallback_percent: Decimal) -> QuotedRate {
    match feed.latest(series_id) {
        Ok(rate) => {
            debug!(series_id, rate = %rate.rate_percent, "fetched published rate");
            rate
        }
        Err(e) => {
            warn!(series_id, error = %e, fallback = %fallback_percent, "using fallback rate");
            QuotedRate::fallback(fallback_percent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PAYLOAD_30: &str = r#"{
        "realtime_start": "2024-07-01",
        "count": 2800,
        "observations": [
            {"realtime_start": "2024-07-01", "realtime_end": "2024-07-01", "date": "2024-06-27", "value": "6.86"},
            {"realtime_start": "2024-07-01", "realtime_end": "2024-07-01", "date": "2024-06-20", "value": "6.87"}
        ]
    }"#;

    #[test]
    fn test_parse_latest_observation() {
        let rate = FredObservations::parse_latest(MORTGAGE_30_SERIES, PAYLOAD_30).unwrap();
        assert_eq!(rate.rate_percent, dec!(6.86));
        assert_eq!(rate.as_of, NaiveDate::from_ymd_opt(2024, 6, 27));
        assert!(!rate.is_fallback());
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let json = r#"{"observations": [{"date": "2024-06-27", "value": "."}]}"#;
        let err = FredObservations::parse_latest(MORTGAGE_15_SERIES, json).unwrap_err();
        assert!(matches!(err, MortgageError::RateFeed { .. }));
    }

    #[test]
    fn test_empty_and_malformed_payloads() {
        let empty = r#"{"observations": []}"#;
        assert!(FredObservations::parse_latest(MORTGAGE_30_SERIES, empty).is_err());
        assert!(FredObservations::parse_latest(MORTGAGE_30_SERIES, "<html>").is_err());
        // error responses carry no observations key
        let api_error = r#"{"error_code": 400, "error_message": "Bad Request. The value for variable api_key is not registered."}"#;
        assert!(FredObservations::parse_latest(MORTGAGE_30_SERIES, api_error).is_err());
    }

    #[test]
    fn test_fetch_mixes_published_and_fallback() {
        let feed = FredObservations::new().with_payload(MORTGAGE_30_SERIES, PAYLOAD_30);
        let rates = MarketRates::fetch(&feed, &FallbackRates::default());

        assert_eq!(rates.thirty_year.rate_percent, dec!(6.86));
        assert!(!rates.thirty_year.is_fallback());
        assert_eq!(rates.fifteen_year, QuotedRate::fallback(dec!(6.28)));
    }

    #[test]
    fn test_fetch_from_static_feed() {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 27).unwrap();
        let feed = StaticRateFeed::new()
            .with_rate(MORTGAGE_30_SERIES, QuotedRate::published(dec!(6.86), as_of))
            .with_rate(MORTGAGE_15_SERIES, QuotedRate::published(dec!(6.16), as_of));
        let rates = MarketRates::fetch(&feed, &FallbackRates::default());

        assert_eq!(rates.rate_for(RatePreset::FifteenYearFixed), dec!(6.16));
        assert_eq!(rates.rate_for(RatePreset::Custom), dec!(6.86));
    }

    #[test]
    fn test_labels() {
        let rates = MarketRates::fallback(&FallbackRates::default());
        assert_eq!(rates.label(RatePreset::ThirtyYearFixed), "30-year fixed (6.96%)");
        assert_eq!(rates.label(RatePreset::FifteenYearFixed), "15-year fixed (6.28%)");
        assert_eq!(rates.label(RatePreset::Custom), "Custom");

        let whole = MarketRates {
            thirty_year: QuotedRate::fallback(dec!(7)),
            fifteen_year: QuotedRate::fallback(dec!(6.5)),
        };
        assert_eq!(whole.label(RatePreset::ThirtyYearFixed), "30-year fixed (7.00%)");
        assert_eq!(whole.label(RatePreset::FifteenYearFixed), "15-year fixed (6.50%)");
    }
}
