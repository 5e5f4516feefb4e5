//! Money display.
//!
//! `format_currency` follows `en-US` number formatting for INR amounts.
//! Cart totals use the plain glyph form from `cart_total_label`, which does
//! not group thousands.

pub const CURRENCY_GLYPH: &str = "₹";

/// `₹1,234.50`, `-₹3.00`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{CURRENCY_GLYPH}{grouped}.{fraction}")
}

/// `₹20.00`, as shown under the cart rows.
pub fn cart_total_label(total: f64) -> String {
    format!("{CURRENCY_GLYPH}{total:.2}")
}
