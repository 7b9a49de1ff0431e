/// market rates - rate presets from a FRED observations payload with fallbacks
use mortgage_calc_rs::rates::{MORTGAGE_15_SERIES, MORTGAGE_30_SERIES};
use mortgage_calc_rs::{
    format_usd, CalculatorConfig, FredObservations, MarketRates, MortgageBuilder, RatePreset,
    ScheduleSummary,
};
use tracing_subscriber::EnvFilter;

const SAMPLE_30: &str = r#"{"observations": [{"date": "2024-06-27", "value": "6.86"}]}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("mortgage_calc_rs=debug"))
        .init();

    println!("=== market rates ===\n");

    let config = CalculatorConfig::default();

    // only the 30-year payload is available; the 15-year rate falls back
    let feed = FredObservations::new()
        .with_payload(MORTGAGE_30_SERIES, SAMPLE_30)
        .with_payload(MORTGAGE_15_SERIES, r#"{"observations": [{"date": "2024-06-27", "value": "."}]}"#);
    let rates = MarketRates::fetch(&feed, &config.fallback_rates);

    for preset in RatePreset::ALL {
        println!("{}", rates.label(preset));
    }
    println!();

    for (preset, term) in [(RatePreset::ThirtyYearFixed, 30), (RatePreset::FifteenYearFixed, 15)] {
        let quote = MortgageBuilder::new()
            .config(config.clone())
            .rate_preset(preset, &rates)
            .term_years(term)
            .build()?;
        let summary = ScheduleSummary::from_schedule(&quote.schedule()?);

        println!("{}: {} / month, {} interest over {} payments",
            preset.name(),
            format_usd(summary.monthly_payment),
            format_usd(summary.total_interest),
            summary.num_payments);
    }

    Ok(())
}
