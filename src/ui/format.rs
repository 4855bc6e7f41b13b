use chrono::{DateTime, NaiveDateTime};

/// Money with thousands separators, e.g. `$50,100.00` / `-$12.50`.
pub fn format_money(amount: f64, decimals: usize) -> String {
    let fixed = format!("{:.decimals$}", amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Three significant digits with an SI suffix, for axis ticks.
pub fn format_si(value: f64) -> String {
    const SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k")];

    let abs = value.abs();
    let (scaled, suffix) = SUFFIXES
        .iter()
        .find(|(scale, _)| abs >= *scale)
        .map(|(scale, suffix)| (value / scale, *suffix))
        .unwrap_or((value, ""));

    let digits = if scaled.abs() >= 100.0 {
        0
    } else if scaled.abs() >= 10.0 {
        1
    } else {
        2
    };
    format!("{scaled:.digits$}{suffix}")
}

/// Plot x coordinate for a snapshot timestamp (seconds since the epoch).
pub fn timestamp_to_x(timestamp: &NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp() as f64
}

pub fn x_to_timestamp(x: f64) -> Option<NaiveDateTime> {
    if !x.is_finite() {
        return None;
    }
    DateTime::from_timestamp(x.round() as i64, 0).map(|dt| dt.naive_utc())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
