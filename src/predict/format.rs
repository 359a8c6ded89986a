//! Result text formatting.
//!
//! The prediction endpoint's payload is not validated, so fields are
//! rendered with loose scripting-language conversions: a missing label shows
//! as `undefined`, a confidence that is not a number shows as `NaN`.

use serde_json::Value;

/// Shown in place of the result whenever a prediction fails.
pub const PREDICTION_ERROR_TEXT: &str = "Error making prediction";

/// `Class: {class}, Confidence: {confidence * 100, 2 decimals}%`
pub fn result_text(class: Option<&Value>, confidence: Option<&Value>) -> String {
    let label = match class {
        Some(v) => value_to_string(v),
        None => "undefined".to_owned(),
    };
    let percent = confidence.map(value_to_number).unwrap_or(f64::NAN) * 100.0;
    format!("Class: {}, Confidence: {}%", label, to_fixed(percent, 2))
}

/// String conversion of a JSON value as it would print inside a template
/// string.
pub fn value_to_string(v: &Value) -> String {
    match v {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) => number_to_string(f),
            None => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => value_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

/// Numeric conversion of a JSON value: strings parse after trimming, the
/// empty string and `null` are zero, booleans are one or zero, arrays go
/// through their string form, objects are NaN.
pub fn value_to_number(v: &Value) -> f64 {
    match v {
        Value::Null => 0.0,
        Value::Bool(b) => if *b { 1.0 } else { 0.0 },
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&value_to_string(v)),
        Value::Object(_) => f64::NAN,
    }
}

fn string_to_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(n) = prefixed_integer(t) {
        return n;
    }
    // Rust accepts spellings like "inf" and "nan" that are not numbers here.
    if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x`, `0o` and `0b` integer literals. Unsigned only; a bad digit makes
/// the whole string NaN.
fn prefixed_integer(t: &str) -> Option<f64> {
    let bytes = t.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &t[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let mut value = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => value = value * radix as f64 + d as f64,
            None => return Some(f64::NAN),
        }
    }
    Some(value)
}

fn number_to_string(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_owned()
    } else if f.is_infinite() {
        if f > 0.0 { "Infinity".to_owned() } else { "-Infinity".to_owned() }
    } else if f == 0.0 {
        "0".to_owned()
    } else if f.abs() >= 1e21 || f.abs() < 1e-6 {
        exponent_form(f)
    } else {
        // Shortest round-trip digits; integral values print without ".0".
        format!("{}", f)
    }
}

fn exponent_form(f: f64) -> String {
    let s = format!("{:e}", f);
    match s.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => s,
    }
}

/// Fixed-point formatting with `digits` decimals.
///
/// Rounds on the exact binary value, halves away from zero, so `1.005`
/// (stored just below the half) gives `1.00` while `0.125` gives `0.13`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return number_to_string(value);
    }
    if value.abs() >= 1e21 {
        return exponent_form(value);
    }

    // 1074 fractional digits hold any f64 exactly.
    let exact = format!("{:.1074}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept: Vec<u8> = int_part.bytes().chain(frac_part.bytes().take(digits)).collect();
    let round_up = frac_part.as_bytes().get(digits).map_or(false, |&d| d >= b'5');

    if round_up {
        let mut i = kept.len();
        loop {
            if i == 0 {
                kept.insert(0, b'1');
                break;
            }
            i -= 1;
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    let split = kept.len() - digits;
    let (int_digits, frac_digits) = kept.split_at(split);
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&String::from_utf8_lossy(int_digits));
    if digits > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(frac_digits));
    }
    out
}
