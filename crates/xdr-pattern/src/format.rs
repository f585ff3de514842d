//! Number formatting for labels.
//!
//! [`format_g4`] reproduces the general "G4" numeric format: four
//! significant digits, trailing zeros dropped, and scientific notation
//! (`d.dddE+XX`) when the decimal exponent after rounding is below -4 or
//! at least 4.

/// Formats a value with four significant digits.
///
/// ```rust
/// use xdr_pattern::format::format_g4;
///
/// assert_eq!(format_g4(100.230125), "100.2");
/// assert_eq!(format_g4(10000.0), "1E+04");
/// assert_eq!(format_g4(0.0), "0");
/// ```
pub fn format_g4(value: f32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // "d.ddde±x", correctly rounded to four significant digits
    let sci = format!("{:.3e}", value.abs());
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let sign = if value < 0.0 { "-" } else { "" };

    if (-4..4).contains(&exp) {
        let body = if exp >= 0 {
            let (int, frac) = digits.split_at(exp as usize + 1);
            join_fraction(int, frac)
        } else {
            let zeros = "0".repeat((-exp - 1) as usize);
            join_fraction("0", &format!("{zeros}{digits}"))
        };
        format!("{sign}{body}")
    } else {
        let (lead, frac) = digits.split_at(1);
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{sign}{}E{exp_sign}{:02}", join_fraction(lead, frac), exp.abs())
    }
}

fn join_fraction(int: &str, frac: &str) -> String {
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    }
}

/// Two-digit uppercase hex of a code, truncated toward zero.
///
/// ```rust
/// use xdr_pattern::format::format_hex2;
///
/// assert_eq!(format_hex2(170.9), "AA");
/// assert_eq!(format_hex2(5.0), "05");
/// ```
pub fn format_hex2(code: f32) -> String {
    format!("{:02X}", code as i32)
}
