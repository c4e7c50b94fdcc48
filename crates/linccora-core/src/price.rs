// Price text helpers. Backend prices are whatever the shop wrote, e.g. "Tk. 1,250"
use linccora_api::RawPrice;

/// Bangladeshi taka sign
pub const CURRENCY_SYMBOL: char = '৳';

pub const PRICE_PLACEHOLDER: &str = "Price not available";

fn is_price_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c == '.'
}

fn is_separator(c: char) -> bool {
    c == ',' || c == '.'
}

/// Display form of a raw price: decoration stripped, taka sign prepended
///
/// Absent or empty input gives `""`. Text without any digits comes back
/// untouched, and numeric prices pass through as plain numbers.
pub fn format_price(raw: Option<&RawPrice>) -> String {
    let text = match raw {
        None => return String::new(),
        Some(RawPrice::Number(n)) => return n.to_string(),
        Some(RawPrice::Text(text)) => text,
    };

    if text.is_empty() {
        return String::new();
    }

    let cleaned: String = text.chars().filter(|c| is_price_char(*c)).collect();
    // "Tk. 500" leaves a stray leading '.'
    let cleaned = cleaned.trim_matches(is_separator);

    if cleaned.is_empty() {
        text.clone()
    } else {
        format!("{}{}", CURRENCY_SYMBOL, cleaned)
    }
}

/// `format_price`, or the placeholder when there is nothing to show
pub fn display_price(raw: Option<&RawPrice>) -> String {
    let formatted = format_price(raw);
    if formatted.trim().is_empty() {
        PRICE_PLACEHOLDER.to_string()
    } else {
        formatted
    }
}

/// Numeric value of a raw price, `0.0` when there isn't one
///
/// Note that garbage text also yields `0.0`, so a `min_price` filter
/// will drop unpriced items and a `max_price` filter will keep them.
pub fn parse_price(raw: Option<&RawPrice>) -> f64 {
    match raw {
        None => 0.0,
        Some(RawPrice::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(RawPrice::Text(text)) => parse_price_text(text),
    }
}

/// Every non-price character goes, so space-grouped "12 500" reads as 12500
pub fn parse_price_text(text: &str) -> f64 {
    let kept: String = text.chars().filter(|c| is_price_char(*c)).collect();
    let digits: String = kept
        .trim_matches(is_separator)
        .chars()
        .filter(|c| *c != ',')
        .collect();

    leading_decimal(&digits)
}

/// Longest `\d+(\.\d+)?` prefix, parsed
fn leading_decimal(s: &str) -> f64 {
    let mut end = 0;
    let mut seen_dot = false;

    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Render a price bound for the query string (1500.0 -> "1500")
pub fn format_bound(value: f64) -> String {
    value.to_string()
}
