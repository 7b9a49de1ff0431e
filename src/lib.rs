pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod purchase;
pub mod rates;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::{Bounds, CalculatorConfig, FallbackRates};
pub use decimal::{Money, Rate};
pub use errors::{MortgageError, Result};
pub use payments::{
    calculate_payment_amount, compute_schedule, AmortizationCalculator, AmortizationSchedule,
    ChartSeries, PaymentRecord, ScheduleSummary,
};
pub use purchase::{parse_amount, HomePurchase, MortgageBuilder, MortgageQuote};
pub use rates::{FredObservations, MarketRates, QuotedRate, RateFeed, StaticRateFeed};
pub use serialization::{format_usd, ScheduleView, TableRow};
pub use types::{LoanInput, RatePreset};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
