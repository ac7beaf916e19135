//! Locale-aware number formatting.
//!
//! The formatter is part-based: [`format_to_parts`] emits a sequence of
//! typed [`FormatPart`]s (digits, separators, signs, style tokens) and the
//! string renderers concatenate them. Keeping the parts around lets the
//! locale probing in [`crate::locale::locale_details`] and host renderers
//! (e.g. styling the fraction differently) work from the same source of
//! truth as the final string.

use crate::locale::{
    CurrencyPlacement, Locale, currency_placement, currency_symbol, percent_symbol_for,
    separators_for, unit_attaches_directly, unit_token,
};
use crate::options::{FormatOptions, NumberStyle, SignDisplay};

/// The role of a formatted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// A run of integer digits between group separators.
    Integer,
    /// A group (thousands) separator.
    Group,
    /// The decimal separator.
    Decimal,
    /// The fraction digits.
    Fraction,
    /// A minus sign.
    MinusSign,
    /// A plus sign.
    PlusSign,
    /// The percent symbol.
    Percent,
    /// A currency symbol.
    Currency,
    /// A unit suffix token.
    Unit,
    /// Connecting literal text, such as the space before a unit.
    Literal,
}

/// One typed segment of a formatted number.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatPart {
    /// What this segment represents.
    pub kind: PartKind,
    /// The rendered text.
    pub text: String,
}

impl FormatPart {
    fn new(kind: PartKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Format a value into its typed parts.
///
/// Non-finite values produce an empty part list; the caller decides how to
/// present them (fields render an empty string).
///
/// # Example
///
/// ```
/// use numfield::{FormatOptions, Locale, format_number};
///
/// let text = format_number(Some(1234.5), &Locale::new("en-US"), &FormatOptions::new());
/// assert_eq!(text, "1,234.5");
/// ```
pub fn format_to_parts(value: f64, locale: &Locale, options: &FormatOptions) -> Vec<FormatPart> {
    if !value.is_finite() {
        return Vec::new();
    }

    let scaled = apply_style_scale(value, options);
    let (min, max) = options.fraction_digits();
    let (integer, fraction) = rounded_digits(scaled.abs(), min, max);

    render_parts(scaled.is_sign_negative(), &integer, &fraction, locale, options)
}

/// Format a value to a string. `None` formats to the empty string.
pub fn format_number(value: Option<f64>, locale: &Locale, options: &FormatOptions) -> String {
    match value {
        Some(value) => concat_parts(&format_to_parts(value, locale, options)),
        None => String::new(),
    }
}

/// Format a value at full precision, ignoring the fraction-digit limits.
///
/// Used while a field is being edited so no stored precision is hidden
/// from the user. Grouping, style tokens, and the locale's separators
/// still apply; only the rounding is lifted.
pub fn format_max_precision(value: f64, locale: &Locale, options: &FormatOptions) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let scaled = apply_style_scale(value, options);
    let digits = shortest_digits(scaled.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (digits, String::new()),
    };

    concat_parts(&render_parts(
        scaled.is_sign_negative(),
        &integer,
        &fraction,
        locale,
        options,
    ))
}

fn concat_parts(parts: &[FormatPart]) -> String {
    parts.iter().map(|p| p.text.as_str()).collect()
}

/// Percent style renders the value scaled by 100.
///
/// The multiplication can introduce binary drift (`0.07 * 100` is not
/// exactly `7`), so the scaled value is corrected through a short decimal
/// round-trip.
fn apply_style_scale(value: f64, options: &FormatOptions) -> f64 {
    if options.style == NumberStyle::Percent {
        let scaled = value * 100.0;
        format!("{scaled:.10}").parse().unwrap_or(scaled)
    } else {
        value
    }
}

/// Round `abs` to at most `max` fraction digits and split into integer and
/// fraction digit strings. Trailing fraction zeros are trimmed down to
/// `min` digits.
fn rounded_digits(abs: f64, min: u32, max: u32) -> (String, String) {
    let rendered = format!("{abs:.prec$}", prec = max as usize);
    match rendered.split_once('.') {
        Some((integer, fraction)) => {
            let keep = fraction
                .len()
                .max(min as usize)
                .min(fraction.trim_end_matches('0').len().max(min as usize));
            (integer.to_string(), fraction[..keep].to_string())
        }
        None => {
            let pad = "0".repeat(min as usize);
            (rendered, pad)
        }
    }
}

/// The shortest decimal string that round-trips to `abs`.
///
/// `Display` for `f64` already produces the shortest round-trip form; the
/// exponent notation it uses for extreme magnitudes is expanded to plain
/// digits.
fn shortest_digits(abs: f64) -> String {
    let rendered = format!("{abs}");
    if !rendered.contains(['e', 'E']) {
        return rendered;
    }
    let expanded = format!("{abs:.12}");
    match expanded.split_once('.') {
        Some((integer, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                integer.to_string()
            } else {
                format!("{integer}.{fraction}")
            }
        }
        None => expanded,
    }
}

fn render_parts(
    negative: bool,
    integer: &str,
    fraction: &str,
    locale: &Locale,
    options: &FormatOptions,
) -> Vec<FormatPart> {
    let separators = separators_for(locale);
    let is_zero = integer.chars().chain(fraction.chars()).all(|c| c == '0');
    let mut parts = Vec::new();

    // Sign comes first, before any currency prefix (`-$1.00`).
    match options.sign_display {
        SignDisplay::Never => {}
        SignDisplay::Auto => {
            if negative && !is_zero {
                parts.push(FormatPart::new(PartKind::MinusSign, "-"));
            }
        }
        SignDisplay::ExceptZero => {
            if !is_zero {
                let kind = if negative {
                    PartKind::MinusSign
                } else {
                    PartKind::PlusSign
                };
                let text = if negative { "-" } else { "+" };
                parts.push(FormatPart::new(kind, text));
            }
        }
        SignDisplay::Always => {
            let show_minus = negative && !is_zero;
            let kind = if show_minus {
                PartKind::MinusSign
            } else {
                PartKind::PlusSign
            };
            let text = if show_minus { "-" } else { "+" };
            parts.push(FormatPart::new(kind, text));
        }
    }

    let currency = match options.style {
        NumberStyle::Currency => options.currency.as_deref(),
        _ => None,
    };

    if let Some(code) = currency
        && currency_placement(code) == CurrencyPlacement::Prefix
    {
        parts.push(FormatPart::new(PartKind::Currency, currency_symbol(code)));
    }

    push_grouped_integer(&mut parts, integer, separators.group, options.use_grouping);

    if !fraction.is_empty() {
        parts.push(FormatPart::new(
            PartKind::Decimal,
            separators.decimal.to_string(),
        ));
        parts.push(FormatPart::new(PartKind::Fraction, fraction));
    }

    match options.style {
        NumberStyle::Percent => {
            parts.push(FormatPart::new(
                PartKind::Percent,
                percent_symbol_for(locale).to_string(),
            ));
        }
        NumberStyle::Unit => {
            if let Some(unit) = options.unit.as_deref() {
                let token = unit_token(unit);
                if token == "%" {
                    parts.push(FormatPart::new(PartKind::Percent, token));
                } else {
                    if !unit_attaches_directly(&token) {
                        parts.push(FormatPart::new(PartKind::Literal, " "));
                    }
                    parts.push(FormatPart::new(PartKind::Unit, token));
                }
            }
        }
        NumberStyle::Currency => {
            if let Some(code) = currency
                && currency_placement(code) == CurrencyPlacement::SuffixWithSpace
            {
                parts.push(FormatPart::new(PartKind::Literal, " "));
                parts.push(FormatPart::new(PartKind::Currency, currency_symbol(code)));
            }
        }
        NumberStyle::Decimal => {}
    }

    parts
}

/// Push the integer digits, inserting a group separator every three digits
/// from the right when grouping is enabled.
fn push_grouped_integer(parts: &mut Vec<FormatPart>, integer: &str, group: char, grouped: bool) {
    if !grouped || integer.len() <= 3 {
        parts.push(FormatPart::new(PartKind::Integer, integer));
        return;
    }

    let digits: Vec<char> = integer.chars().collect();
    let first = digits.len() % 3;
    let mut index = 0;

    if first > 0 {
        parts.push(FormatPart::new(
            PartKind::Integer,
            digits[..first].iter().collect::<String>(),
        ));
        index = first;
    }

    while index < digits.len() {
        if index > 0 {
            parts.push(FormatPart::new(PartKind::Group, group.to_string()));
        }
        parts.push(FormatPart::new(
            PartKind::Integer,
            digits[index..index + 3].iter().collect::<String>(),
        ));
        index += 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        Locale::new("en-US")
    }

    #[test]
    fn test_basic_decimal() {
        assert_eq!(format_number(Some(1234.5), &en(), &FormatOptions::new()), "1,234.5");
        assert_eq!(format_number(Some(0.0), &en(), &FormatOptions::new()), "0");
        assert_eq!(format_number(Some(-42.0), &en(), &FormatOptions::new()), "-42");
    }

    #[test]
    fn test_grouping() {
        let options = FormatOptions::new();
        assert_eq!(format_number(Some(1234567.0), &en(), &options), "1,234,567");
        assert_eq!(
            format_number(Some(1234567.0), &Locale::new("de-DE"), &options),
            "1.234.567"
        );
        assert_eq!(
            format_number(Some(1234567.0), &Locale::new("fr-FR"), &options),
            "1\u{202F}234\u{202F}567"
        );

        let ungrouped = FormatOptions::new().with_use_grouping(false);
        assert_eq!(format_number(Some(1234567.0), &en(), &ungrouped), "1234567");
    }

    #[test]
    fn test_fraction_rounding() {
        let options = FormatOptions::new();
        // Default decimal max is 3 fraction digits.
        assert_eq!(format_number(Some(1.23456), &en(), &options), "1.235");

        let pinned = FormatOptions::new()
            .with_minimum_fraction_digits(2)
            .with_maximum_fraction_digits(2);
        assert_eq!(format_number(Some(1.0), &en(), &pinned), "1.00");
        assert_eq!(format_number(Some(1.239), &en(), &pinned), "1.24");
    }

    #[test]
    fn test_percent_style() {
        let options = FormatOptions::new().with_style(NumberStyle::Percent);
        assert_eq!(format_number(Some(0.12), &en(), &options), "12%");
        assert_eq!(format_number(Some(0.07), &en(), &options), "7%");
        assert_eq!(format_number(Some(1.0), &en(), &options), "100%");
    }

    #[test]
    fn test_currency_styles() {
        let usd = FormatOptions::new()
            .with_style(NumberStyle::Currency)
            .with_currency("USD");
        assert_eq!(format_number(Some(1234.0), &en(), &usd), "$1,234.00");
        assert_eq!(format_number(Some(-1.0), &en(), &usd), "-$1.00");

        let eur = FormatOptions::new()
            .with_style(NumberStyle::Currency)
            .with_currency("EUR");
        assert_eq!(
            format_number(Some(1234.5), &Locale::new("de-DE"), &eur),
            "1.234,50 \u{20ac}"
        );
    }

    #[test]
    fn test_unit_style() {
        let km = FormatOptions::new()
            .with_style(NumberStyle::Unit)
            .with_unit("kilometer");
        assert_eq!(format_number(Some(12.0), &en(), &km), "12 km");

        let percent = FormatOptions::new()
            .with_style(NumberStyle::Unit)
            .with_unit("percent");
        // Unit percent does not scale and attaches directly.
        assert_eq!(format_number(Some(12.0), &en(), &percent), "12%");
    }

    #[test]
    fn test_sign_display() {
        let always = FormatOptions::new().with_sign_display(SignDisplay::Always);
        assert_eq!(format_number(Some(5.0), &en(), &always), "+5");
        assert_eq!(format_number(Some(-5.0), &en(), &always), "-5");
        assert_eq!(format_number(Some(0.0), &en(), &always), "+0");

        let never = FormatOptions::new().with_sign_display(SignDisplay::Never);
        assert_eq!(format_number(Some(-5.0), &en(), &never), "5");

        let except_zero = FormatOptions::new().with_sign_display(SignDisplay::ExceptZero);
        assert_eq!(format_number(Some(5.0), &en(), &except_zero), "+5");
        assert_eq!(format_number(Some(0.0), &en(), &except_zero), "0");
    }

    #[test]
    fn test_none_and_non_finite_are_empty() {
        assert_eq!(format_number(None, &en(), &FormatOptions::new()), "");
        assert_eq!(format_number(Some(f64::NAN), &en(), &FormatOptions::new()), "");
        assert_eq!(
            format_number(Some(f64::INFINITY), &en(), &FormatOptions::new()),
            ""
        );
    }

    #[test]
    fn test_parts_structure() {
        let parts = format_to_parts(-1234.5, &en(), &FormatOptions::new());
        let kinds: Vec<PartKind> = parts.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PartKind::MinusSign,
                PartKind::Integer,
                PartKind::Group,
                PartKind::Integer,
                PartKind::Decimal,
                PartKind::Fraction,
            ]
        );
    }

    #[test]
    fn test_max_precision_keeps_all_digits() {
        let options = FormatOptions::new();
        // 0.30000000000000004 has 17 significant digits; the default
        // formatter would round it away.
        let value = 0.1 + 0.2;
        assert_eq!(
            format_max_precision(value, &en(), &options),
            "0.30000000000000004"
        );
        assert_eq!(format_number(Some(value), &en(), &options), "0.3");
    }

    #[test]
    fn test_max_precision_percent() {
        let options = FormatOptions::new().with_style(NumberStyle::Percent);
        assert_eq!(format_max_precision(0.07, &en(), &options), "7%");
        assert_eq!(format_max_precision(0.1234, &en(), &options), "12.34%");
    }

    #[test]
    fn test_arabic_locale_output() {
        let locale = Locale::new("ar-EG");
        let options = FormatOptions::new().with_minimum_fraction_digits(1);
        assert_eq!(
            format_number(Some(1234.5), &locale, &options),
            "1\u{066C}234\u{066B}5"
        );

        let percent = FormatOptions::new().with_style(NumberStyle::Percent);
        assert_eq!(format_number(Some(0.5), &locale, &percent), "50\u{066A}");
    }
}
