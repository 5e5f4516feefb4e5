/// Share of the listed price suggested by the price hint.
pub const SUGGESTED_PRICE_FACTOR: f64 = 0.95;

/// Read a displayed price such as `"$12.50"` or `"₹1,200"`.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().ok()
}

/// Suggested price, rounded to cents.
pub fn suggested_price(price: f64) -> f64 {
    (price * SUGGESTED_PRICE_FACTOR * 100.0).round() / 100.0
}
