//! Display formatting for computed results.
//!
//! Results are shown with the shortest decimal text that reads back as the
//! same `f64`. Magnitudes in `[1e-6, 1e21)` print as plain decimals; anything
//! else switches to exponent form with an explicit sign (`1e+21`, `1.5e-8`),
//! which is what a browser's number-to-string conversion shows on the same
//! keypad.

/// Lower bound (inclusive) of the plain-decimal range.
const PLAIN_MIN: f64 = 1e-6;

/// Upper bound (exclusive) of the plain-decimal range.
const PLAIN_MAX: f64 = 1e21;

/// Renders a computed value for the display.
///
/// No rounding is applied, so representational artifacts are kept:
///
/// ```
/// use pocket_core::engine::format_number;
///
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(15.0), "15");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    // Also folds -0 into "0".
    if value == 0.0 {
        return "0".to_string();
    }

    if (PLAIN_MIN..PLAIN_MAX).contains(&value.abs()) {
        return value.to_string();
    }

    let exp_form = format!("{value:e}");
    match exp_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exp_form,
    }
}
