use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};

/// months in a year; payments are monthly
pub const PERIODS_PER_YEAR: u32 = 12;

/// engine input for a fixed-rate amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    /// annual rate in percent (6.5 means 6.5%)
    pub annual_rate_percent: Decimal,
    pub term_years: u32,
}

impl LoanInput {
    pub fn new(principal: Money, annual_rate_percent: Decimal, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// check the engine preconditions
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(MortgageError::invalid_input(
                "principal",
                format!("must be positive, got {}", self.principal),
            ));
        }

        if self.annual_rate_percent < Decimal::ZERO {
            return Err(MortgageError::invalid_input(
                "annual_rate_percent",
                format!("must not be negative, got {}", self.annual_rate_percent),
            ));
        }

        if self.term_years == 0 {
            return Err(MortgageError::invalid_input(
                "term_years",
                "must be at least one year",
            ));
        }

        if self.term_years.checked_mul(PERIODS_PER_YEAR).is_none() {
            return Err(MortgageError::invalid_input(
                "term_years",
                format!("{} years overflows the period count", self.term_years),
            ));
        }

        Ok(())
    }

    pub fn annual_rate(&self) -> Rate {
        Rate::from_percent(self.annual_rate_percent)
    }

    /// periodic (monthly) rate as a fraction
    pub fn periodic_rate(&self) -> Rate {
        self.annual_rate().monthly_rate()
    }

    pub fn num_periods(&self) -> u32 {
        self.term_years.saturating_mul(PERIODS_PER_YEAR)
    }
}

/// published rate choices offered alongside a custom rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatePreset {
    /// 30-year fixed average
    ThirtyYearFixed,
    /// 15-year fixed average
    FifteenYearFixed,
    /// user-entered rate
    Custom,
}

impl RatePreset {
    pub const ALL: [RatePreset; 3] = [
        RatePreset::ThirtyYearFixed,
        RatePreset::FifteenYearFixed,
        RatePreset::Custom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RatePreset::ThirtyYearFixed => "30-year fixed",
            RatePreset::FifteenYearFixed => "15-year fixed",
            RatePreset::Custom => "Custom",
        }
    }
}
