//! ECMAScript `Number::toString` formatting.

/// Format a number the way `String(n)` does.
///
/// Shortest round-trip digits; plain decimal notation for magnitudes in
/// `[1e-6, 1e21)`, exponent notation (`1e+21`, `1.5e-7`) outside it. Both
/// zeros print as `"0"`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{n}");
    }

    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
