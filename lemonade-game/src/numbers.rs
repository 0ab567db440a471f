//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the u32 range, returning 0 for non-finite values.
#[must_use]
pub fn floor_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let max = f64::from(u32::MAX);
    let clamped = value.clamp(0.0, max).floor();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Total price of `quantity` units at `unit_price` each.
#[must_use]
pub fn money_for(quantity: u32, unit_price: f64) -> f64 {
    f64::from(quantity) * unit_price
}

/// Format a currency amount with exactly two decimals.
#[must_use]
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}
