//! Display strings for page values.

use time::macros::format_description;

use stockdeck_core::UtcDateTime;

/// `$1234.50`; negative amounts as `-$3.25`.
pub fn currency(value: f64) -> String {
    if let Some(symbol) = non_finite(value) {
        return symbol.to_owned();
    }

    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${value:.2}")
    }
}

/// Integer with comma thousands separators, e.g. `8,724,577`.
pub fn volume(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

pub fn percent(value: f64) -> String {
    match non_finite(value) {
        Some(symbol) => symbol.to_owned(),
        None => format!("{value:.2}%"),
    }
}

pub fn datetime(value: UtcDateTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC");
    value
        .into_inner()
        .format(format)
        .unwrap_or_else(|_| value.format_rfc3339())
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("n/a")
    } else if value == f64::INFINITY {
        Some("∞")
    } else if value == f64::NEG_INFINITY {
        Some("-∞")
    } else {
        None
    }
}
