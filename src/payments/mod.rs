pub mod amortization;
pub mod summary;

pub use amortization::{
    calculate_payment_amount, compute_schedule, AmortizationCalculator, AmortizationSchedule,
    PaymentRecord, BALANCE_EPSILON,
};
pub use summary::{ChartSeries, ScheduleSummary};
