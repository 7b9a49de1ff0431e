/// quick start - minimal example to get started
use mortgage_calc_rs::{compute_schedule, format_usd, Decimal, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $200,000 at 6% over 30 years
    let payments = compute_schedule(Money::from_major(200_000), Decimal::from(6), 30)?;

    let first = &payments[0];
    println!("monthly payment: {}", format_usd(first.payment));
    println!("first month interest: {}", format_usd(first.interest_portion));
    println!("payments: {}", payments.len());

    Ok(())
}
