// ============================================================================
// Basic Usage Example
// ============================================================================

use chrono::TimeDelta;
use precise_decimal::prelude::*;

fn main() -> Result<(), NumericError> {
    println!("=== Precise Decimal Example ===\n");

    // Exact arithmetic on prices
    let price: BigDecimal = "49.95".parse()?;
    let quantity = BigDecimal::from(3);
    let discount: BigDecimal = "0.15".parse()?;

    let gross = price.multiply(&quantity)?;
    let net = gross.subtract(&gross.multiply(&discount)?)?;
    println!("Gross:    {}", gross);
    println!("Net:      {}", net);
    println!("Rounded:  {}", net.set_scale(2, RoundingMode::HalfEven)?);

    // Every rounding mode on the same value
    println!("\n=== Rounding -2.5 to an integer ===");
    let value: BigDecimal = "-2.5".parse()?;
    for mode in RoundingMode::ALL {
        match value.set_scale(0, mode) {
            Ok(rounded) => println!("  {:<12} {}", mode.as_str(), rounded),
            Err(err) => println!("  {:<12} error: {}", mode.as_str(), err),
        }
    }

    // Division under a MathContext
    println!("\n=== Division ===");
    let one = BigDecimal::one();
    let seven = BigDecimal::from(7);
    for mc in [MathContext::DECIMAL32, MathContext::DECIMAL64, MathContext::DECIMAL128] {
        println!("  1/7 @ {:<28} {}", mc.to_string(), one.divide_with_context(&seven, mc)?);
    }
    match one.divide(&seven) {
        Ok(q) => println!("  exact: {}", q),
        Err(err) => println!("  exact: {}", err),
    }

    let (q, r) = "10.5".parse::<BigDecimal>()?.divide_and_remainder(&BigDecimal::from(4))?;
    println!("  10.5 divmod 4 = ({}, {})", q, r);

    // Large integers and the multiplication tiers
    println!("\n=== Big Integers ===");
    let factorial = (1..=100).try_fold(BigInteger::one(), |acc, n| acc.multiply(&BigInteger::from(n)))?;
    println!("  100! has {} bits", factorial.bit_length());
    println!("  100! = {}", factorial);

    let square = factorial.pow(8)?;
    let tier = MultiplyTier::for_square(square.magnitude().len());
    println!(
        "  (100!)^8 has {} words; squaring it uses {}",
        square.magnitude().len(),
        tier.strategy().name()
    );

    // String forms
    println!("\n=== Formatting ===");
    let tiny: BigDecimal = "-0.000000123456".parse()?;
    println!("  scientific:  {}", tiny);
    println!("  engineering: {}", tiny.to_engineering_string());
    println!("  plain:       {}", tiny.to_plain_string());

    // Duration scaling
    println!("\n=== Durations ===");
    let interval = TimeDelta::milliseconds(1500);
    println!("  {} s / 7 = {:?}", interval.to_decimal_seconds(), interval.divided_by(7)?);
    println!("  {} s * 1.1 = {:?}", interval.to_decimal_seconds(), interval.scaled_by(&"1.1".parse::<BigDecimal>()?)?);

    Ok(())
}
