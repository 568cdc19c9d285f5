/// Placeholder for a value the backend did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fixed-point number, "N/A" when absent.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// "3.00%", "N/A" when absent.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// "+1.23%" / "-4.50%" for gain/loss percentages.
pub fn format_signed_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v >= 0.0 => format!("+{v:.2}%"),
        Some(v) => format!("{v:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Market cap given in billions: "$375.0B", or "$1.2T" from 1000B up.
pub fn format_market_cap(value: Option<f64>) -> String {
    match value {
        Some(v) if v >= 1000.0 => format!("${:.1}T", v / 1000.0),
        Some(v) => format!("${v:.1}B"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// US-dollar amount with thousands separators: "$1,234.56", "-$12.00".
pub fn format_currency(value: Option<f64>) -> String {
    let Some(v) = value else {
        return NOT_AVAILABLE.to_string();
    };
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${whole}.{:02}", cents % 100)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
