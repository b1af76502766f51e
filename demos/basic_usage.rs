// ============================================================================
// Basic Usage Example
// ============================================================================

use bigdecimal::BigDecimal;
use ratecalc::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    println!("=== Rate Calculator Example ===\n");

    // Monthly rates on the fixed-precision backend: 9 decimal places,
    // convergence proven for annual rates in (-0.5, 0.5].
    let monthly = Calculator::new(CalculatorConfig::new(
        12,
        9,
        Decimal::new(5, 1),
        fixed::new_from_int,
    ))
    .expect("monthly calculator");

    println!(
        "Monthly calculator ready ({} cached taylor terms)\n",
        monthly.terms_cache_len()
    );

    println!("Annual rate -> equivalent monthly rate:");
    for percent in [1i64, 2, 5, 10, 12] {
        let annual = Decimal::new(percent, 2);
        let rate = monthly.compute_rate(annual).expect("in-range rate");
        println!("  {:>3}% -> {}", percent, rate);
    }

    // Daily rates over 252 trading days on the arbitrary-precision backend,
    // 30 decimal places.
    let daily = Calculator::new(CalculatorConfig::new(
        252,
        30,
        BigDecimal::from_str("0.9").expect("radius"),
        arbitrary::new_from_int,
    ))
    .expect("daily calculator");

    println!(
        "\nDaily calculator ready ({} cached taylor terms)",
        daily.terms_cache_len()
    );

    let annual = BigDecimal::from_str("0.1").expect("rate");
    let rate = daily.compute_rate(annual).expect("in-range rate");
    println!("  10% annual over 252 trading days -> {}", rate);

    // Rates outside the proven interval are rejected, not extrapolated.
    println!("\n=== Out-of-range rate ===");
    match daily.compute_rate(BigDecimal::from_str("1.5").expect("rate")) {
        Ok(_) => unreachable!("1.5 lies outside the convergence interval"),
        Err(err) => println!("  rejected: {}", err),
    }
}
