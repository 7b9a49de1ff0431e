//! serialization support for schedules

use chrono::NaiveDate;
use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::payments::{AmortizationSchedule, ChartSeries, PaymentRecord, ScheduleSummary};
use crate::types::LoanInput;

/// serializable view of a computed schedule
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleView {
    pub input: LoanInput,
    pub summary: ScheduleSummary,
    pub first_payment_date: Option<NaiveDate>,
    pub payments: Vec<PaymentRecord>,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &AmortizationSchedule) -> Self {
        ScheduleView {
            input: schedule.input,
            summary: ScheduleSummary::from_schedule(schedule),
            first_payment_date: schedule.first_payment_date,
            payments: schedule.payments.clone(),
        }
    }
}

/// serializable chart payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ChartView {
    pub title: String,
    pub series: ChartSeries,
}

/// one display row with currency-formatted amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub period: u32,
    pub date: Option<NaiveDate>,
    pub payment: String,
    pub principal: String,
    pub interest: String,
    pub balance: String,
    pub cumulative_payment: String,
}

impl AmortizationSchedule {
    /// get json representation of the schedule
    pub fn to_json_pretty(&self) -> String {
        let view = ScheduleView::from_schedule(self);
        serde_json::to_string_pretty(&view).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    /// short alias for json output
    pub fn json(&self) -> String {
        self.to_json_pretty()
    }

    /// compact json, propagating serializer errors
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&ScheduleView::from_schedule(self))?)
    }

    /// chart payload as json
    pub fn chart_json(&self) -> Result<String> {
        let view = ChartView {
            title: "Principal & Interest Payments and Cumulative Payments Over Time".to_string(),
            series: ChartSeries::from_schedule(self),
        };
        Ok(serde_json::to_string(&view)?)
    }

    /// display rows for every payment
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.payments
            .iter()
            .map(|p| TableRow {
                period: p.period_index,
                date: self.payment_date(p.period_index),
                payment: format_usd(p.payment),
                principal: format_usd(p.principal_portion),
                interest: format_usd(p.interest_portion),
                balance: format_usd(p.remaining_balance),
                cumulative_payment: format_usd(p.cumulative_payment),
            })
            .collect()
    }
}

/// format as dollars and cents with thousands separators, e.g. "$1,199.10"
pub fn format_usd(amount: Money) -> String {
    let rounded = amount
        .as_decimal()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{}", if negative { "-" } else { "" }, grouped, cents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn schedule() -> AmortizationSchedule {
        let input = LoanInput::new(Money::from_major(200_000), dec!(6), 30);
        AmortizationSchedule::generate(&input).unwrap()
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(Money::from_str_exact("1199.1010503").unwrap()), "$1,199.10");
        assert_eq!(format_usd(Money::from_major(1_000_000)), "$1,000,000.00");
        assert_eq!(format_usd(Money::from_major(100)), "$100.00");
        assert_eq!(format_usd(Money::ZERO), "$0.00");
        assert_eq!(format_usd(Money::from_str_exact("0.005").unwrap()), "$0.01");
        assert_eq!(format_usd(Money::from_str_exact("-1234.5").unwrap()), "-$1,234.50");
        assert_eq!(format_usd(Money::from_str_exact("-0.001").unwrap()), "$0.00");
    }

    #[test]
    fn test_json_view() {
        let json = schedule().json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["num_payments"], 360);
        assert_eq!(value["payments"].as_array().unwrap().len(), 360);
        assert_eq!(value["payments"][0]["period_index"], 1);
        assert!(value["first_payment_date"].is_null());
    }

    #[test]
    fn test_view_round_trip_keeps_records() {
        let schedule = schedule();
        let view: ScheduleView = serde_json::from_str(&schedule.to_json().unwrap()).unwrap();
        assert_eq!(view.payments, schedule.payments);
        assert_eq!(view.input, schedule.input);
    }

    #[test]
    fn test_chart_json() {
        let json = schedule().chart_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["series"]["periods"].as_array().unwrap().len(), 360);
    }

    #[test]
    fn test_table_rows() {
        let schedule = schedule().with_first_payment_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let rows = schedule.table_rows();

        assert_eq!(rows.len(), 360);
        assert_eq!(rows[0].payment, "$1,199.10");
        assert_eq!(rows[0].interest, "$1,000.00");
        assert_eq!(rows[0].principal, "$199.10");
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(rows[359].balance, "$0.00");
    }
}
