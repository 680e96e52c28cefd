//! Display formatting shared by the fragments.

/// `$1,234.56`, `-$1,234.56`. Non-finite values pass through as `$inf`/`$NaN`.
pub fn money(value: f64) -> String {
    let digits = grouped(value.abs(), 2);
    if is_negative(value, &digits) {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Money with an explicit `+` for non-negative values: `+$12.00`, `-$3.50`.
pub fn signed_money(value: f64) -> String {
    let digits = grouped(value.abs(), 2);
    if is_negative(value, &digits) {
        format!("-${}", digits)
    } else {
        format!("+${}", digits)
    }
}

pub fn percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Plain number with thousands separators, for prices.
pub fn price(value: f64) -> String {
    let digits = grouped(value.abs(), 2);
    if is_negative(value, &digits) {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// `-0.001` rounds to `0.00` and should not print a minus sign.
fn is_negative(value: f64, digits: &str) -> bool {
    value < 0.0
        && (value.is_infinite() || digits.chars().any(|c| c.is_ascii_digit() && c != '0'))
}

fn grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    let fixed = format!("{:.*}", decimals, value);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}
