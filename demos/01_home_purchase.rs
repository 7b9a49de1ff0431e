/// home purchase - derive the loan from price and down payment, then print the schedule
use mortgage_calc_rs::{
    format_usd, parse_amount, ChartSeries, MortgageBuilder, ScheduleSummary, TimeSource,
    SafeTimeProvider,
};
use mortgage_calc_rs::chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== home purchase ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()
    ));

    // amounts typed by a user may carry thousands separators
    let quote = MortgageBuilder::new()
        .home_price(parse_amount("450,000")?)
        .down_payment_percent(dec!(20))
        .rate_percent(dec!(6.75))
        .term_years(30)
        .build_with_time(&time)?;

    if let Some(purchase) = &quote.purchase {
        println!("home price:       {}", format_usd(purchase.home_price));
        println!("down payment:     {}", format_usd(purchase.down_payment_amount()));
        println!("loan amount:      {}", format_usd(purchase.loan_amount()));
    }

    let schedule = quote.schedule()?;
    let summary = ScheduleSummary::from_schedule(&schedule);

    println!("monthly payment:  {}", format_usd(summary.monthly_payment));
    println!("total payment:    {}", format_usd(summary.total_payment));
    println!("total interest:   {}", format_usd(summary.total_interest));

    let chart = ChartSeries::from_schedule(&schedule);
    match chart.crossover_period() {
        Some(period) => println!("principal overtakes interest in payment {}", period),
        None => println!("interest paid exceeds the loan amount"),
    }

    println!("\n{:>6} {:>12} {:>14} {:>14} {:>14} {:>16}",
        "#", "date", "payment", "principal", "interest", "balance");
    for row in schedule.table_rows().iter().take(12) {
        let date = row.date.map(|d| d.to_string()).unwrap_or_default();
        println!("{:>6} {:>12} {:>14} {:>14} {:>14} {:>16}",
            row.period, date, row.payment, row.principal, row.interest, row.balance);
    }

    Ok(())
}
