// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with trace logging:
//     cargo run --example basic_usage --features logging

use scaled_decimal::prelude::*;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Scaled Decimal Example ===\n");

    // Parsing keeps the written scale
    let price: ScaledDecimal = "19.990".parse()?;
    println!("Parsed price: {} (scale {})", price, price.scale());

    // Exact arithmetic: add aligns, mul sums scales
    let qty = ScaledDecimal::from_i64(3);
    let subtotal = price.checked_mul(qty)?;
    let shipping: ScaledDecimal = "4.5".parse()?;
    println!("Subtotal: {}", subtotal);
    println!("With shipping: {}", subtotal.checked_add(shipping)?);

    // Division always names its result scale
    let third = ScaledDecimal::ONE.checked_div(ScaledDecimal::from_i64(3), 4)?;
    println!("\n1/3 at scale 4: {}", third);

    // Rounding is half away from zero
    for s in ["1.235", "-1.235", "1.234"] {
        let d: ScaledDecimal = s.parse()?;
        println!("round({}, 2) = {}", d, d.round(2)?);
    }

    // Compound interest
    println!("\n=== Compound Interest ===");
    let principal: ScaledDecimal = "100000".parse()?;
    let rate = "6.5".parse::<ScaledDecimal>()?.checked_div("100".parse()?, 3)?;
    let growth = ScaledDecimal::ONE.checked_add(rate)?.checked_pow(20)?;
    let total = principal.checked_mul(growth)?.round(2)?;
    println!("100000 at {}% for 20 years: {}", "6.5", total);

    let precise = ScaledDecimal::ONE
        .checked_add(rate)?
        .checked_pow_with(20, &DecimalConfig::high_precision())?;
    println!("Growth factor (high precision): {}", precise);

    // Errors are values
    println!("\n=== Errors ===");
    match ScaledDecimal::ONE.checked_div(ScaledDecimal::ZERO, 2) {
        Ok(v) => println!("unexpected: {}", v),
        Err(e) => println!("1 / 0: {}", e),
    }
    match "1.2.3".parse::<ScaledDecimal>() {
        Ok(v) => println!("unexpected: {}", v),
        Err(e) => println!("parse \"1.2.3\": {}", e),
    }

    // Binary interchange
    println!("\n=== Interchange ===");
    let parts = total.decompose();
    println!(
        "negative={} exponent={} magnitude={:02x?}",
        parts.negative, parts.exponent, parts.magnitude
    );
    println!("Recomposed: {}", parts.compose()?);

    // Nullable column values
    println!("\n=== Nullable ===");
    let column = [
        HostValue::Text("12.5".to_string()),
        HostValue::Null,
        HostValue::Int(8),
    ];
    for value in &column {
        let d = NullableDecimal::scan_value(value)?;
        let taxed = d.checked_mul("1.2".parse()?)?;
        println!("{:?} -> {:?}", value, taxed.to_value());
    }

    Ok(())
}
