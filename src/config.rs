use std::fmt::Display;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{MortgageError, Result};
use crate::payments::BALANCE_EPSILON;

/// calculator configuration: accepted input ranges, defaults and fallback rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub home_price: Bounds<Money>,
    pub down_payment_percent: Bounds<Decimal>,
    pub rate_percent: Bounds<Decimal>,
    pub term_years: Bounds<u32>,
    pub fallback_rates: FallbackRates,
    /// balances within this distance of zero are treated as paid off
    pub balance_epsilon: Decimal,
}

/// inclusive range with a default value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
    pub default: T,
}

impl<T: PartialOrd + Display + Copy> Bounds<T> {
    pub fn new(min: T, max: T, default: T) -> Self {
        Self { min, max, default }
    }

    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// reject values outside the range, naming the field
    pub fn check(&self, field: &'static str, value: T) -> Result<T> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(MortgageError::invalid_input(
                field,
                format!("must be between {} and {}, got {}", self.min, self.max, value),
            ))
        }
    }
}

/// rates used when no published quote is available
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallbackRates {
    pub thirty_year_percent: Decimal,
    pub fifteen_year_percent: Decimal,
}

impl Default for FallbackRates {
    fn default() -> Self {
        Self {
            thirty_year_percent: dec!(6.96),
            fifteen_year_percent: dec!(6.28),
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            home_price: Bounds::new(
                Money::from_major(10_000),
                Money::from_major(10_000_000),
                Money::from_major(400_000),
            ),
            down_payment_percent: Bounds::new(dec!(0), dec!(100), dec!(20)),
            rate_percent: Bounds::new(dec!(0.1), dec!(20), dec!(6.96)),
            term_years: Bounds::new(1, 30, 30),
            fallback_rates: FallbackRates::default(),
            balance_epsilon: BALANCE_EPSILON,
        }
    }
}

impl CalculatorConfig {
    /// load from json, missing sections take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// ranges limited only by what the engine itself accepts
    pub fn unrestricted() -> Self {
        Self {
            home_price: Bounds::new(
                Money::CENT,
                Money::from_major(1_000_000_000_000),
                Money::from_major(400_000),
            ),
            down_payment_percent: Bounds::new(dec!(0), dec!(100), dec!(0)),
            rate_percent: Bounds::new(dec!(0), dec!(100), dec!(6.96)),
            term_years: Bounds::new(1, 100, 30),
            fallback_rates: FallbackRates::default(),
            balance_epsilon: BALANCE_EPSILON,
        }
    }

    /// every range must be ordered and hold its own default
    pub fn validate(&self) -> Result<()> {
        check_bounds("home_price", &self.home_price)?;
        check_bounds("down_payment_percent", &self.down_payment_percent)?;
        check_bounds("rate_percent", &self.rate_percent)?;
        check_bounds("term_years", &self.term_years)?;

        if self.down_payment_percent.min < Decimal::ZERO || self.down_payment_percent.max > dec!(100) {
            return Err(MortgageError::invalid_input(
                "down_payment_percent",
                "range must lie within 0 and 100",
            ));
        }

        if self.rate_percent.min < Decimal::ZERO {
            return Err(MortgageError::invalid_input("rate_percent", "range must not be negative"));
        }

        if self.term_years.min == 0 {
            return Err(MortgageError::invalid_input("term_years", "range must start at one year"));
        }

        if self.balance_epsilon < Decimal::ZERO {
            return Err(MortgageError::invalid_input("balance_epsilon", "must not be negative"));
        }

        Ok(())
    }
}

fn check_bounds<T: PartialOrd + Display + Copy>(field: &'static str, bounds: &Bounds<T>) -> Result<()> {
    if bounds.min > bounds.max {
        return Err(MortgageError::invalid_input(
            field,
            format!("minimum {} exceeds maximum {}", bounds.min, bounds.max),
        ));
    }
    bounds.check(field, bounds.default).map(|_| ())
}
