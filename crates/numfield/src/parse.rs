//! Locale-aware number parsing.
//!
//! The parser is deliberately forgiving: it accepts whatever a user might
//! plausibly type or paste into a numeric field (foreign numeral scripts,
//! accounting parentheses, trailing signs, doubled decimal points, style
//! tokens from the field's own formatter) and produces either a finite
//! `f64` or `None`. It never panics on malformed input.
//!
//! Parsing runs as a fixed pipeline over the raw string:
//!
//! 1. strip invisible format controls and trim
//! 2. detect accounting-style parenthesized negatives
//! 3. normalize Unicode sign variants to ASCII
//! 4. reject infinity spellings
//! 5. scan for and remove percent / permille symbols
//! 6. infer an effective locale from the numeral script
//! 7. strip the style tokens the options could have rendered
//! 8. remove group separators, map the decimal separator to `.`
//! 9. normalize digits to ASCII
//! 10. resolve leading or trailing sign, collapse stray decimal points
//! 11. convert, then apply the percent / permille scale

use std::sync::LazyLock;

use numfield_core::logging::targets;
use regex::Regex;

use crate::locale::{self, Locale, locale_details};
use crate::numeral::{
    NumeralSystem, detect_numeral_system, is_percent, is_permille, normalize_digits,
    normalize_sign, strip_format_controls,
};
use crate::options::{FormatOptions, NumberStyle};

static SPACE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Zs}").unwrap_or_else(|e| panic!("invalid regex: {e}")));

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?")
        .unwrap_or_else(|e| panic!("invalid regex: {e}"))
});

/// Parse user input into a number.
///
/// `locale` selects the separator conventions; `None` uses the system
/// locale. When the input is written in a non-Latin numeral script the
/// locale is inferred from the script instead, so pasted Arabic-Indic or
/// Han numbers parse correctly regardless of the configured locale.
///
/// Returns `None` for empty, unparseable, or non-finite input.
///
/// # Example
///
/// ```
/// use numfield::{FormatOptions, Locale, parse_number};
///
/// let en = Locale::new("en-US");
/// let options = FormatOptions::new();
/// assert_eq!(parse_number("1,234.5", Some(&en), &options), Some(1234.5));
/// assert_eq!(parse_number("(42)", Some(&en), &options), Some(-42.0));
/// assert_eq!(parse_number("twelve", Some(&en), &options), None);
/// ```
pub fn parse_number(text: &str, locale: Option<&Locale>, options: &FormatOptions) -> Option<f64> {
    let text = strip_format_controls(text);
    let mut text = text.trim().to_string();
    if text.is_empty() {
        return None;
    }

    // Accounting notation: (1234) means -1234.
    let mut paren_negative = false;
    if text.len() >= 2 && text.starts_with('(') && text.ends_with(')') {
        paren_negative = true;
        text = text[1..text.len() - 1].trim().to_string();
    }

    let mut text = normalize_sign(&text);

    let lowered = text.to_lowercase();
    if lowered.contains("infinity") || lowered.contains('\u{221E}') {
        return None;
    }

    // Percent and permille symbols scale the result; strip them here so
    // the token and separator passes never see them.
    let mut percent_seen = false;
    let mut permille_seen = false;
    text.retain(|c| {
        if is_percent(c) {
            percent_seen = true;
            false
        } else if is_permille(c) {
            permille_seen = true;
            false
        } else {
            true
        }
    });

    let effective = effective_locale(&text, locale);

    strip_style_tokens(&mut text, &effective, options);
    strip_separators(&mut text, &effective);

    let text = normalize_digits(&text);
    let (negative, text) = resolve_sign(text.trim())?;
    let text = collapse_decimal_points(&text);

    let matched = FLOAT_PREFIX.find(&text)?;
    let mut value: f64 = matched.as_str().parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    if negative || paren_negative {
        value = -value;
    }

    if permille_seen {
        value /= 1000.0;
    } else if (percent_seen || options.style == NumberStyle::Percent) && !options.unit_is_percent()
    {
        value /= 100.0;
    }

    tracing::trace!(target: targets::PARSE, input = %text, value, "parsed number");
    Some(value)
}

/// The non-digit characters a field should accept as keystrokes for a
/// `(locale, options)` pair.
///
/// Hosts use this to filter keyboard input before it reaches the text
/// buffer. Digits (in any supported script) are always allowed and are
/// not included here.
pub fn allowed_non_numeric_keys(locale: &Locale, options: &FormatOptions) -> Vec<char> {
    let details = locale_details(locale, options);
    let mut allowed = vec![
        details.decimal_separator,
        details.group_separator,
        '.',
        ',',
        '-',
        '+',
        '(',
        ')',
        ' ',
    ];

    if options.style == NumberStyle::Percent || options.unit_is_percent() {
        allowed.push(details.percent_symbol);
        allowed.push('%');
    }
    if let Some(symbol) = &details.currency_symbol {
        allowed.extend(symbol.chars());
    }
    if options.style == NumberStyle::Unit
        && let Some(unit) = options.unit.as_deref()
    {
        allowed.extend(locale::unit_token(unit).chars());
    }

    allowed.sort_unstable();
    allowed.dedup();
    allowed
}

/// Pick the locale whose separator conventions the input actually uses.
///
/// Arabic-Indic and Persian digits imply Arabic-script separators no
/// matter what the field is configured with; Han and fullwidth digits
/// imply dot-decimal conventions.
fn effective_locale(text: &str, locale: Option<&Locale>) -> Locale {
    match detect_numeral_system(text) {
        Some(NumeralSystem::ArabicIndic | NumeralSystem::Persian) => Locale::new("ar"),
        Some(NumeralSystem::Han | NumeralSystem::Fullwidth) => Locale::new("zh-CN"),
        Some(NumeralSystem::Latin) | None => locale.cloned().unwrap_or_else(Locale::system),
    }
}

/// Remove the currency / unit / literal tokens the formatter could have
/// produced for these options, plus the raw currency code and unit name.
///
/// Longer tokens are removed first so `"CA$"` is not half-eaten by `"$"`.
fn strip_style_tokens(text: &mut String, locale: &Locale, options: &FormatOptions) {
    let mut tokens: Vec<String> = Vec::new();

    if let Some(code) = options.currency.as_deref() {
        tokens.push(locale::currency_symbol(code));
        tokens.push(code.to_string());
    }
    if let Some(unit) = options.unit.as_deref() {
        let token = locale::unit_token(unit);
        if token != "%" {
            tokens.push(token);
        }
        tokens.push(unit.to_string());
    }
    let details = locale_details(locale, options);
    if let Some(symbol) = details.currency_symbol {
        tokens.push(symbol);
    }

    tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));
    for token in &tokens {
        if !token.is_empty() {
            *text = text.replace(token.as_str(), "");
        }
    }
}

/// Drop group separators and map the locale's decimal separator to `.`.
///
/// Any space-class character is treated as a group separator; narrow
/// no-break spaces and regular spaces are interchangeable in practice.
fn strip_separators(text: &mut String, locale: &Locale) {
    let separators = locale::separators_for(locale);

    let without_groups: String = text.chars().filter(|c| *c != separators.group).collect();
    let without_spaces = SPACE_SEPARATORS.replace_all(&without_groups, "");

    *text = without_spaces
        .chars()
        .map(|c| if c == separators.decimal { '.' } else { c })
        .collect();
}

/// Accept one sign at the head or the tail of the digits.
///
/// `"1234-"` is treated like `"-1234"`. A sign anywhere else, or signs at
/// both ends, makes the input unparseable.
fn resolve_sign(text: &str) -> Option<(bool, String)> {
    let mut negative = false;
    let mut rest = text;

    let leading = rest.starts_with(['-', '+']);
    let trailing = rest.ends_with(['-', '+']);
    if leading && trailing && rest.len() > 1 {
        return None;
    }

    if leading {
        negative = rest.starts_with('-');
        rest = rest[1..].trim_start();
    } else if trailing {
        negative = rest.ends_with('-');
        rest = rest[..rest.len() - 1].trim_end();
    }

    // Any sign still inside the digits is malformed (exponent signs are
    // carried by the float syntax and never reach here ambiguously).
    let interior = rest
        .char_indices()
        .any(|(i, c)| matches!(c, '-' | '+') && !follows_exponent(rest, i));
    if interior {
        return None;
    }

    Some((negative, rest.to_string()))
}

fn follows_exponent(text: &str, index: usize) -> bool {
    text[..index]
        .chars()
        .next_back()
        .is_some_and(|c| c == 'e' || c == 'E')
}

/// Keep only the last decimal point.
///
/// After group-separator removal the remaining points are either a single
/// decimal point, typos (`"1..5"`), or foreign group separators; the last
/// one is the decimal point in every convention the parser supports.
fn collapse_decimal_points(text: &str) -> String {
    let count = text.matches('.').count();
    if count <= 1 {
        return text.to_string();
    }
    let last = match text.rfind('.') {
        Some(index) => index,
        None => return text.to_string(),
    };
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        if c != '.' || i == last {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SignDisplay;

    fn en() -> Locale {
        Locale::new("en-US")
    }

    fn parse_en(text: &str) -> Option<f64> {
        parse_number(text, Some(&en()), &FormatOptions::new())
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_en("1234"), Some(1234.0));
        assert_eq!(parse_en("1,234.5"), Some(1234.5));
        assert_eq!(parse_en("-42"), Some(-42.0));
        assert_eq!(parse_en("+42"), Some(42.0));
        assert_eq!(parse_en(".5"), Some(0.5));
        assert_eq!(parse_en("  12  "), Some(12.0));
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(parse_en(""), None);
        assert_eq!(parse_en("   "), None);
        assert_eq!(parse_en("abc"), None);
        assert_eq!(parse_en("--5"), None);
        assert_eq!(parse_en("-5-"), None);
        assert_eq!(parse_en("1-2"), None);
    }

    #[test]
    fn test_infinity_and_nan_rejected() {
        assert_eq!(parse_en("Infinity"), None);
        assert_eq!(parse_en("-infinity"), None);
        assert_eq!(parse_en("\u{221E}"), None);
        assert_eq!(parse_en("NaN"), None);
    }

    #[test]
    fn test_trailing_sign_and_parens() {
        assert_eq!(parse_en("1234-"), Some(-1234.0));
        assert_eq!(parse_en("1234+"), Some(1234.0));
        assert_eq!(parse_en("(1234)"), Some(-1234.0));
        assert_eq!(parse_en("( 1,234.5 )"), Some(-1234.5));
    }

    #[test]
    fn test_unicode_minus() {
        assert_eq!(parse_en("\u{2212}7"), Some(-7.0));
        assert_eq!(parse_en("\u{2013}7"), Some(-7.0));
    }

    #[test]
    fn test_doubled_decimal_point() {
        assert_eq!(parse_en("1..5"), Some(1.5));
        assert_eq!(parse_en("1.2.5"), Some(12.5));
    }

    #[test]
    fn test_mixed_separators_by_locale() {
        let options = FormatOptions::new();
        let fr = Locale::new("fr-FR");
        assert_eq!(
            parse_number("1.234.567,89", Some(&fr), &options),
            Some(1234567.89)
        );
        assert_eq!(
            parse_number("1.234.567,89", Some(&en()), &options),
            Some(1234.56789)
        );

        let de = Locale::new("de-DE");
        assert_eq!(parse_number("1.234,5", Some(&de), &options), Some(1234.5));
        assert_eq!(
            parse_number("1\u{202F}234,5", Some(&fr), &options),
            Some(1234.5)
        );
        // Plain space where the locale renders a narrow no-break space.
        assert_eq!(parse_number("1 234,5", Some(&fr), &options), Some(1234.5));
    }

    #[test]
    fn test_percent_scaling() {
        let decimal = FormatOptions::new();
        assert_eq!(parse_number("12%", Some(&en()), &decimal), Some(0.12));

        let percent = FormatOptions::new().with_style(NumberStyle::Percent);
        assert_eq!(parse_number("12%", Some(&en()), &percent), Some(0.12));
        // Percent style scales even without the symbol typed.
        assert_eq!(parse_number("12", Some(&en()), &percent), Some(0.12));

        let unit_percent = FormatOptions::new()
            .with_style(NumberStyle::Unit)
            .with_unit("percent");
        assert_eq!(parse_number("12%", Some(&en()), &unit_percent), Some(12.0));
        assert_eq!(parse_number("12", Some(&en()), &unit_percent), Some(12.0));
    }

    #[test]
    fn test_permille() {
        assert_eq!(parse_en("15\u{2030}"), Some(0.015));
    }

    #[test]
    fn test_currency_tokens_stripped() {
        let usd = FormatOptions::new()
            .with_style(NumberStyle::Currency)
            .with_currency("USD");
        assert_eq!(parse_number("$1,234.00", Some(&en()), &usd), Some(1234.0));
        assert_eq!(parse_number("-$1.00", Some(&en()), &usd), Some(-1.0));
        assert_eq!(parse_number("$-12", Some(&en()), &usd), Some(-12.0));
        assert_eq!(parse_number("USD 12", Some(&en()), &usd), Some(12.0));

        let eur = FormatOptions::new()
            .with_style(NumberStyle::Currency)
            .with_currency("EUR");
        let de = Locale::new("de-DE");
        assert_eq!(
            parse_number("1.234,50 \u{20ac}", Some(&de), &eur),
            Some(1234.5)
        );
    }

    #[test]
    fn test_unit_tokens_stripped() {
        let km = FormatOptions::new()
            .with_style(NumberStyle::Unit)
            .with_unit("kilometer");
        assert_eq!(parse_number("12 km", Some(&en()), &km), Some(12.0));
        assert_eq!(parse_number("12 kilometer", Some(&en()), &km), Some(12.0));
    }

    #[test]
    fn test_foreign_numerals() {
        let options = FormatOptions::new();
        // Arabic-Indic digits with Arabic separators, regardless of the
        // configured locale.
        assert_eq!(
            parse_number("\u{0661}\u{0662}\u{066B}\u{0665}", Some(&en()), &options),
            Some(12.5)
        );
        assert_eq!(
            parse_number("۱۲۳", Some(&en()), &options),
            Some(123.0)
        );
        assert_eq!(parse_number("１２３", Some(&en()), &options), Some(123.0));
        assert_eq!(parse_number("五六", Some(&en()), &options), Some(56.0));
    }

    #[test]
    fn test_format_controls_stripped() {
        assert_eq!(parse_en("1\u{200E}234"), Some(1234.0));
    }

    #[test]
    fn test_round_trip_with_formatter() {
        use crate::format::format_number;

        let locales = ["en-US", "de-DE", "fr-FR", "ar-EG", "ja-JP"];
        let values = [0.0, 1.5, -1234.25, 987654.0];
        let options = FormatOptions::new()
            .with_maximum_fraction_digits(6)
            .with_sign_display(SignDisplay::Auto);

        for tag in locales {
            let locale = Locale::new(tag);
            for value in values {
                let text = format_number(Some(value), &locale, &options);
                assert_eq!(
                    parse_number(&text, Some(&locale), &options),
                    Some(value),
                    "round trip failed for {value} in {tag}: {text:?}"
                );
            }
        }
    }

    #[test]
    fn test_allowed_characters() {
        let allowed = allowed_non_numeric_keys(&en(), &FormatOptions::new());
        assert!(allowed.contains(&'.'));
        assert!(allowed.contains(&','));
        assert!(allowed.contains(&'-'));
        assert!(!allowed.contains(&'%'));

        let percent = FormatOptions::new().with_style(NumberStyle::Percent);
        let allowed = allowed_non_numeric_keys(&en(), &percent);
        assert!(allowed.contains(&'%'));

        let usd = FormatOptions::new()
            .with_style(NumberStyle::Currency)
            .with_currency("USD");
        let allowed = allowed_non_numeric_keys(&en(), &usd);
        assert!(allowed.contains(&'$'));
    }
}
