use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{MortgageError, Result};
use crate::types::LoanInput;

/// balances closer to zero than this are treated as paid off
pub const BALANCE_EPSILON: Decimal = dec!(0.000001);

/// one monthly payment in an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub period_index: u32,
    pub payment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
    pub cumulative_payment: Money,
    pub cumulative_principal: Money,
    pub cumulative_interest: Money,
}

/// compute the monthly schedule for a fixed-rate loan
///
/// Returns exactly `term_years * 12` records. The final record absorbs any
/// rounding residual so the remaining balance ends at zero.
pub fn compute_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    term_years: u32,
) -> Result<Vec<PaymentRecord>> {
    AmortizationCalculator::default()
        .calculate_schedule(&LoanInput::new(principal, annual_rate_percent, term_years))
}

/// amortization schedule with totals
#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    pub input: LoanInput,
    pub scheduled_payment: Money,
    pub payments: Vec<PaymentRecord>,
    pub total_interest: Money,
    pub total_payment: Money,
    pub first_payment_date: Option<NaiveDate>,
}

impl AmortizationSchedule {
    /// generate payment schedule
    pub fn generate(input: &LoanInput) -> Result<Self> {
        Self::generate_with(input, &AmortizationCalculator::default())
    }

    /// generate payment schedule with a specific calculator
    pub fn generate_with(input: &LoanInput, calculator: &AmortizationCalculator) -> Result<Self> {
        let payments = calculator.calculate_schedule(input)?;
        let scheduled_payment =
            calculate_payment_amount(input.principal, input.annual_rate(), input.num_periods())?;

        let total_interest = payments.iter().map(|p| p.interest_portion).sum();
        let total_payment = payments.iter().map(|p| p.payment).sum();

        Ok(Self {
            input: *input,
            scheduled_payment,
            payments,
            total_interest,
            total_payment,
            first_payment_date: None,
        })
    }

    /// stamp the date of the first payment; later payments fall on the same day of following months
    pub fn with_first_payment_date(mut self, date: NaiveDate) -> Self {
        self.first_payment_date = Some(date);
        self
    }

    /// get payment for specific period
    pub fn get_payment(&self, period_index: u32) -> Option<&PaymentRecord> {
        let idx = period_index.checked_sub(1)?;
        self.payments.get(idx as usize)
    }

    /// get remaining balance after payment, principal before the first
    pub fn balance_after_payment(&self, period_index: u32) -> Money {
        self.get_payment(period_index)
            .map(|p| p.remaining_balance)
            .unwrap_or(self.input.principal)
    }

    /// calendar date of a payment, if a first payment date was set
    pub fn payment_date(&self, period_index: u32) -> Option<NaiveDate> {
        let first = self.first_payment_date?;
        if period_index == 0 || period_index as usize > self.payments.len() {
            return None;
        }
        first.checked_add_months(Months::new(period_index - 1))
    }

    pub fn num_payments(&self) -> u32 {
        u32::try_from(self.payments.len()).unwrap_or(u32::MAX)
    }

    pub fn total_principal(&self) -> Money {
        self.payments.iter().map(|p| p.principal_portion).sum()
    }
}

/// fixed-payment amortization calculator
#[derive(Debug, Clone, Copy)]
pub struct AmortizationCalculator {
    balance_epsilon: Decimal,
}

impl Default for AmortizationCalculator {
    fn default() -> Self {
        Self {
            balance_epsilon: BALANCE_EPSILON,
        }
    }
}

impl AmortizationCalculator {
    /// calculator that treats balances within `balance_epsilon` of zero as paid off
    pub fn new(balance_epsilon: Decimal) -> Self {
        Self {
            balance_epsilon: balance_epsilon.abs(),
        }
    }

    /// calculate full amortization schedule
    pub fn calculate_schedule(&self, input: &LoanInput) -> Result<Vec<PaymentRecord>> {
        input.validate()?;

        let num_periods = input.num_periods();
        let periodic_rate = input.periodic_rate().as_decimal();
        let payment = calculate_payment_amount(input.principal, input.annual_rate(), num_periods)?;

        let mut payments = Vec::with_capacity(num_periods as usize);
        let mut balance = input.principal;
        let mut cumulative_payment = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;
        let mut cumulative_interest = Money::ZERO;

        for period_index in 1..=num_periods {
            let interest_portion = balance * periodic_rate;

            let mut principal_portion = if period_index == num_periods {
                balance
            } else {
                (payment - interest_portion).min(balance)
            };

            let mut remaining_balance = balance - principal_portion;
            if remaining_balance.approx_eq(Money::ZERO, self.balance_epsilon)
                || remaining_balance.is_negative()
            {
                principal_portion += remaining_balance;
                remaining_balance = Money::ZERO;
            }

            // the payment that retires the loan covers exactly what is owed
            let payment_amount = if remaining_balance.is_zero() {
                interest_portion + principal_portion
            } else {
                payment
            };

            cumulative_payment += payment_amount;
            cumulative_principal += principal_portion;
            cumulative_interest += interest_portion;

            payments.push(PaymentRecord {
                period_index,
                payment: payment_amount,
                interest_portion,
                principal_portion,
                remaining_balance,
                cumulative_payment,
                cumulative_principal,
                cumulative_interest,
            });

            balance = remaining_balance;
        }

        debug!(
            principal = %input.principal,
            annual_rate_percent = %input.annual_rate_percent,
            periods = num_periods,
            payment = %payment,
            total_interest = %cumulative_interest,
            "computed amortization schedule"
        );

        Ok(payments)
    }
}

/// calculate the fixed periodic payment
///
/// Uses the annuity formula `P * r / (1 - (1 + r)^-n)` with `r` the monthly
/// rate, or `P / n` when the rate is zero. The discount factor `(1 + r)^-n`
/// shrinks toward zero for long terms and high rates instead of overflowing.
pub fn calculate_payment_amount(principal: Money, annual_rate: Rate, periods: u32) -> Result<Money> {
    if periods == 0 {
        return Err(MortgageError::invalid_input("term_years", "must be at least one year"));
    }

    let monthly_rate = annual_rate.monthly_rate();
    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let r = monthly_rate.as_decimal();
    if r.is_sign_negative() {
        return Err(MortgageError::invalid_input("annual_rate_percent", "must not be negative"));
    }

    let denominator = Decimal::ONE - discount_factor(r, periods);
    if denominator.is_zero() {
        return Err(MortgageError::invalid_input(
            "annual_rate_percent",
            format!("{} is too small to amortize over {} periods", annual_rate, periods),
        ));
    }

    principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_div(denominator))
        .map(Money::from_decimal)
        .ok_or_else(|| {
            MortgageError::invalid_input(
                "principal",
                format!("{} at {} overflows the payment calculation", principal, annual_rate),
            )
        })
}

/// (1 + r)^-n for r > 0
fn discount_factor(r: Decimal, n: u32) -> Decimal {
    let v = Decimal::ONE / (Decimal::ONE + r);
    let mut factor = Decimal::ONE;
    for _ in 0..n {
        factor *= v;
        // underflowed past 28 places, stays zero
        if factor.is_zero() {
            break;
        }
    }
    factor
}
