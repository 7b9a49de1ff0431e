use serde::{Deserialize, Serialize};

use crate::decimal::Money;

use super::amortization::AmortizationSchedule;

/// headline figures for a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub num_payments: u32,
}

impl ScheduleSummary {
    pub fn from_schedule(schedule: &AmortizationSchedule) -> Self {
        Self {
            monthly_payment: schedule
                .payments
                .first()
                .map(|p| p.payment)
                .unwrap_or(schedule.scheduled_payment),
            total_payment: schedule.total_payment,
            total_interest: schedule.total_interest,
            total_principal: schedule.total_principal(),
            num_payments: schedule.num_payments(),
        }
    }

    /// interest paid per unit of principal borrowed
    pub fn interest_to_principal_ratio(&self) -> Option<rust_decimal::Decimal> {
        if self.total_principal.is_zero() {
            return None;
        }
        Some(self.total_interest.as_decimal() / self.total_principal.as_decimal())
    }
}

/// per-period series for plotting, all vectors indexed alike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub periods: Vec<u32>,
    pub principal: Vec<Money>,
    pub interest: Vec<Money>,
    pub cumulative_payment: Vec<Money>,
    pub cumulative_principal: Vec<Money>,
    pub cumulative_interest: Vec<Money>,
    /// reference line at the amount borrowed
    pub loan_amount: Money,
}

impl ChartSeries {
    pub fn from_schedule(schedule: &AmortizationSchedule) -> Self {
        let len = schedule.payments.len();
        let mut series = Self {
            periods: Vec::with_capacity(len),
            principal: Vec::with_capacity(len),
            interest: Vec::with_capacity(len),
            cumulative_payment: Vec::with_capacity(len),
            cumulative_principal: Vec::with_capacity(len),
            cumulative_interest: Vec::with_capacity(len),
            loan_amount: schedule.input.principal,
        };

        for record in &schedule.payments {
            series.periods.push(record.period_index);
            series.principal.push(record.principal_portion);
            series.interest.push(record.interest_portion);
            series.cumulative_payment.push(record.cumulative_payment);
            series.cumulative_principal.push(record.cumulative_principal);
            series.cumulative_interest.push(record.cumulative_interest);
        }

        series
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// first period in which cumulative principal overtakes cumulative interest
    pub fn crossover_period(&self) -> Option<u32> {
        self.periods
            .iter()
            .zip(self.cumulative_principal.iter().zip(&self.cumulative_interest))
            .find(|(_, (principal, interest))| principal > interest)
            .map(|(period, _)| *period)
    }
}
