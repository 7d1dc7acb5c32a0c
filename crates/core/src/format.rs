//! Persian (fa-IR) display formatting for Toman amounts, quantities and
//! percentages.
//!
//! The engine itself never rounds; everything here is presentation only.
//! Digits are Eastern Arabic (۰..۹), thousands group with U+066C (٬) and
//! decimals separate with U+066B (٫).

const THOUSANDS_SEP: char = '\u{066C}';
const DECIMAL_SEP: char = '\u{066B}';
const PERCENT_SIGN: char = '\u{066A}';

/// Map ASCII digits to Persian digits, leaving everything else untouched.
#[must_use]
pub fn to_persian_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '0'..='9' => {
                let offset = c as u32 - '0' as u32;
                // U+06F0 is ۰
                char::from_u32(0x06F0 + offset).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Format a Toman amount: rounded to a whole number, grouped in threes,
/// Persian digits. Rounds halves toward positive infinity.
#[must_use]
pub fn format_toman(value: f64) -> String {
    let rounded = (value + 0.5).floor();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let grouped = group_thousands(&digits, THOUSANDS_SEP);
    let persian = to_persian_digits(&grouped);
    if negative {
        format!("-{persian}")
    } else {
        persian
    }
}

/// Format an asset quantity: up to 2 decimals, or up to 4 for small
/// fractional amounts (0 < value < 1), trailing zeros trimmed.
#[must_use]
pub fn format_quantity(value: f64) -> String {
    format_quantity_with(value, 2)
}

/// Like [`format_quantity`] with a caller-chosen decimal cap (gold grams
/// display with 4). Small fractional amounts still widen to at least 4.
#[must_use]
pub fn format_quantity_with(value: f64, max_decimals: usize) -> String {
    let decimals = if value > 0.0 && value < 1.0 {
        max_decimals.max(4)
    } else {
        max_decimals
    };
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut out = group_thousands(int_part, THOUSANDS_SEP);
    if !frac_part.is_empty() {
        out.push(DECIMAL_SEP);
        out.push_str(frac_part);
    }
    let persian = to_persian_digits(&out);
    if value < 0.0 {
        format!("-{persian}")
    } else {
        persian
    }
}

/// Format a percentage with exactly 2 decimals, an explicit `+` for
/// gains and a Persian percent sign.
#[must_use]
pub fn format_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut out = group_thousands(int_part, THOUSANDS_SEP);
    out.push(DECIMAL_SEP);
    out.push_str(frac_part);
    let persian = to_persian_digits(&out);
    if value < 0.0 {
        format!("{sign}-{persian}{PERCENT_SIGN}")
    } else {
        format!("{sign}{persian}{PERCENT_SIGN}")
    }
}

/// Re-group a raw amount string with ASCII commas as the user types.
/// Returns an empty string for input that is not a number.
#[must_use]
pub fn format_currency_input(val: &str) -> String {
    if val.is_empty() {
        return String::new();
    }
    let clean: String = val.chars().filter(|c| *c != ',').collect();
    if clean.parse::<f64>().is_err() {
        return String::new();
    }
    let (int_part, frac_part) = match clean.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (clean.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut out = format!("{sign}{}", group_thousands(digits, ','));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Parse a comma-grouped amount string back to a number.
/// Empty or unparseable input comes back as 0.
#[must_use]
pub fn parse_currency_input(val: &str) -> f64 {
    if val.is_empty() {
        return 0.0;
    }
    let clean: String = val.chars().filter(|c| *c != ',').collect();
    clean.parse().unwrap_or(0.0)
}

/// Insert `sep` every three digits, counting from the right.
fn group_thousands(digits: &str, sep: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(*c);
    }
    out
}
