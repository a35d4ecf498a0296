//! Display formatting for peso amounts.

use crate::domain::money::Money;

/// Formats an amount the way Colombian storefronts print prices: a `$` sign,
/// a space, and `.` as the thousands separator (`$ 12.500`).
pub fn format_cop(amount: Money) -> String {
    let digits = amount.value().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    grouped.push_str("$ ");
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}
