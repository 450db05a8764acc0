//! Deterministic index scores.
//!
//! The score is the sole ordering key of the secondary indexes and a
//! compatibility surface: any change to the weighting breaks every
//! index already stored.
//!
//! Strings use positional weighting: character at position `i`
//! contributes `digit(c) * 0.01^i` with a=1..z=26, 0=27..9=36 and
//! everything else 0. Leading characters dominate, so order is
//! lexicographic for strings drawn from `[a-z0-9]`. Characters outside
//! that range collapse to 0, and resolution vanishes after a handful of
//! positions as the weights go to zero.

use crate::value::Value;

/// Digit value of one character.
fn digit(c: char) -> f64 {
    match c {
        'a'..='z' => (c as u32 - 'a' as u32 + 1) as f64,
        '0'..='9' => (c as u32 - '0' as u32 + 27) as f64,
        _ => 0.0,
    }
}

/// Score a string by positional base-0.01 weighting.
///
/// `score_str("")` is 0.
pub fn score_str(s: &str) -> f64 {
    let mut score = 0.0;
    for (i, c) in s.chars().enumerate() {
        score += digit(c) * 0.01_f64.powi(i as i32);
    }
    score
}

/// Score any scalar value: strings by [`score_str`], integers as
/// themselves, booleans as 0 or 1.
pub fn score_value(value: &Value) -> f64 {
    match value {
        Value::Str(s) => score_str(s),
        Value::Int(i) => *i as f64,
        Value::Bool(true) => 1.0,
        Value::Bool(false) => 0.0,
    }
}
