use chrono::{DateTime, Months, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CalculatorConfig;
use crate::decimal::Money;
use crate::errors::{MortgageError, Result};
use crate::payments::{AmortizationCalculator, AmortizationSchedule};
use crate::rates::MarketRates;
use crate::types::{LoanInput, RatePreset};

/// parse a whole-unit amount typed by a user, e.g. "400,000" or "$1,250,000"
pub fn parse_amount(input: &str) -> Result<Money> {
    let trimmed = input.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let digits: String = unsigned.chars().filter(|c| *c != ',').collect();

    digits
        .trim()
        .parse::<i64>()
        .map(Money::from_major)
        .map_err(|_| MortgageError::InvalidAmount {
            input: input.to_string(),
        })
}

/// home price and down payment, from which the loan amount follows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomePurchase {
    pub home_price: Money,
    pub down_payment_percent: Decimal,
}

impl HomePurchase {
    pub fn new(home_price: Money, down_payment_percent: Decimal) -> Self {
        Self {
            home_price,
            down_payment_percent,
        }
    }

    /// down payment in whole currency units
    pub fn down_payment_amount(&self) -> Money {
        self.home_price.percentage(self.down_payment_percent).trunc()
    }

    /// financed amount in whole currency units
    pub fn loan_amount(&self) -> Money {
        let financed_percent = Decimal::ONE_HUNDRED - self.down_payment_percent;
        self.home_price.percentage(financed_percent).trunc()
    }

    pub fn validate(&self, config: &CalculatorConfig) -> Result<()> {
        config.home_price.check("home_price", self.home_price)?;
        config
            .down_payment_percent
            .check("down_payment_percent", self.down_payment_percent)?;
        Ok(())
    }
}

/// a validated request ready for the amortization engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageQuote {
    pub purchase: Option<HomePurchase>,
    pub input: LoanInput,
    pub rate_preset: RatePreset,
    pub quoted_at: DateTime<Utc>,
    pub balance_epsilon: Decimal,
}

impl MortgageQuote {
    /// run the engine; the first payment falls one month after the quote
    pub fn schedule(&self) -> Result<AmortizationSchedule> {
        let calculator = AmortizationCalculator::new(self.balance_epsilon);
        let schedule = AmortizationSchedule::generate_with(&self.input, &calculator)?;
        match self.quoted_at.date_naive().checked_add_months(Months::new(1)) {
            Some(first) => Ok(schedule.with_first_payment_date(first)),
            None => Ok(schedule),
        }
    }
}

/// builder for mortgage quotes
#[derive(Debug, Clone, Default)]
pub struct MortgageBuilder {
    home_price: Option<Money>,
    down_payment_percent: Option<Decimal>,
    loan_amount: Option<Money>,
    rate_percent: Option<Decimal>,
    rate_preset: Option<RatePreset>,
    term_years: Option<u32>,
    config: Option<CalculatorConfig>,
}

impl MortgageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn home_price(mut self, price: Money) -> Self {
        self.home_price = Some(price);
        self
    }

    pub fn down_payment_percent(mut self, percent: Decimal) -> Self {
        self.down_payment_percent = Some(percent);
        self
    }

    /// finance an amount directly instead of deriving it from a purchase
    pub fn loan_amount(mut self, amount: Money) -> Self {
        self.loan_amount = Some(amount);
        self
    }

    /// explicit annual rate in percent, marks the quote as custom
    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.rate_percent = Some(percent);
        self.rate_preset = Some(RatePreset::Custom);
        self
    }

    /// take the rate from a published preset
    pub fn rate_preset(mut self, preset: RatePreset, rates: &MarketRates) -> Self {
        self.rate_percent = Some(rates.rate_for(preset));
        self.rate_preset = Some(preset);
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn config(mut self, config: CalculatorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// build against the system clock
    pub fn build(self) -> Result<MortgageQuote> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_with_time(&time)
    }

    /// build with explicit time provider
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<MortgageQuote> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let term_years = config
            .term_years
            .check("term_years", self.term_years.unwrap_or(config.term_years.default))?;

        let rate_percent = config.rate_percent.check(
            "annual_rate_percent",
            self.rate_percent.unwrap_or(config.rate_percent.default),
        )?;

        let (purchase, principal) = match self.loan_amount {
            Some(amount) => {
                if self.home_price.is_some() || self.down_payment_percent.is_some() {
                    return Err(MortgageError::invalid_input(
                        "loan_amount",
                        "give either a loan amount or a home price with down payment, not both",
                    ));
                }
                (None, amount)
            }
            None => {
                let purchase = HomePurchase::new(
                    self.home_price.unwrap_or(config.home_price.default),
                    self.down_payment_percent
                        .unwrap_or(config.down_payment_percent.default),
                );
                purchase.validate(&config)?;
                (Some(purchase), purchase.loan_amount())
            }
        };

        let input = LoanInput::new(principal, rate_percent, term_years);
        input.validate()?;

        debug!(
            principal = %principal,
            rate_percent = %rate_percent,
            term_years,
            "built mortgage quote"
        );

        Ok(MortgageQuote {
            purchase,
            input,
            rate_preset: self.rate_preset.unwrap_or(RatePreset::ThirtyYearFixed),
            quoted_at: time_provider.now(),
            balance_epsilon: config.balance_epsilon,
        })
    }
}
