//! Locale model: tag parsing, separator and symbol tables, and the derived
//! per-(locale, options) [`LocaleDetails`] record the parser relies on.
//!
//! The tables cover the locales the engine formats for directly; unknown
//! language codes fall back to the default (en-style) separators rather
//! than failing, so a malformed tag can never take down a field.

use crate::format::{self, PartKind};
use crate::options::{FormatOptions, NumberStyle};

/// A parsed locale tag.
///
/// Only the pieces the number pipeline needs are kept: the language code
/// (lowercased) and the optional region (uppercased).
///
/// # Example
///
/// ```
/// use numfield::Locale;
///
/// let locale = Locale::new("fr-FR");
/// assert_eq!(locale.language(), "fr");
/// assert_eq!(locale.region(), Some("FR"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    language: String,
    region: Option<String>,
}

impl Locale {
    /// Parse a locale identifier into its components.
    ///
    /// Accepts both `-` and `_` as subtag separators. Script subtags
    /// (4 letters, title case) are skipped; 2-letter or 3-digit subtags are
    /// treated as regions.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let mut parts = tag.split(['-', '_']);

        let language = parts.next().unwrap_or("en").to_lowercase();
        let mut region = None;

        for part in parts {
            if (part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()))
                || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
            {
                region = Some(part.to_uppercase());
            }
        }

        Self {
            tag,
            language,
            region,
        }
    }

    /// Get the current system locale.
    ///
    /// Falls back to `en-US` when the platform locale cannot be detected.
    pub fn system() -> Self {
        Self::new(sys_locale::get_locale().unwrap_or_else(|| "en-US".to_string()))
    }

    /// The full tag this locale was parsed from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The lowercased language code (e.g. `"en"`, `"fr"`).
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The uppercased region code (e.g. `"US"`), if present.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Whether the language code has a dedicated separator table entry.
    ///
    /// Unknown languages still format and parse; they use the default
    /// separators.
    pub fn is_known(&self) -> bool {
        !matches!(separator_class(&self.language), SeparatorClass::Unknown)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new("en-US")
    }
}

/// Separator conventions a language can follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeparatorClass {
    /// Comma group, dot decimal (English and most East Asian locales).
    DotDecimal,
    /// Dot group, comma decimal (German, Spanish, Italian, ...).
    CommaDecimal,
    /// Narrow no-break space group, comma decimal (French, Russian, ...).
    SpaceGroup,
    /// Arabic-script separators (U+066C group, U+066B decimal).
    ArabicScript,
    /// Not in the table; treated as `DotDecimal`.
    Unknown,
}

fn separator_class(language: &str) -> SeparatorClass {
    match language {
        "en" | "ja" | "zh" | "ko" | "he" | "hi" | "th" | "ms" | "fil" => {
            SeparatorClass::DotDecimal
        }
        "de" | "es" | "it" | "pt" | "nl" | "da" | "el" | "tr" | "vi" | "id" | "ca" | "gl"
        | "eu" | "hr" | "sl" | "sr" | "ro" | "hu" => SeparatorClass::CommaDecimal,
        "fr" | "fi" | "sv" | "nb" | "nn" | "no" | "pl" | "cs" | "sk" | "ru" | "uk" | "bg"
        | "et" | "lv" | "lt" => SeparatorClass::SpaceGroup,
        "ar" | "fa" | "ur" | "ckb" | "ps" | "sd" => SeparatorClass::ArabicScript,
        _ => SeparatorClass::Unknown,
    }
}

/// The decimal and group separator characters for a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Separators {
    pub group: char,
    pub decimal: char,
}

/// Determine separators based on the locale's language.
pub(crate) fn separators_for(locale: &Locale) -> Separators {
    match separator_class(locale.language()) {
        SeparatorClass::CommaDecimal => Separators {
            group: '.',
            decimal: ',',
        },
        SeparatorClass::SpaceGroup => Separators {
            // Narrow no-break space, comma
            group: '\u{202F}',
            decimal: ',',
        },
        SeparatorClass::ArabicScript => Separators {
            group: '\u{066C}',
            decimal: '\u{066B}',
        },
        SeparatorClass::DotDecimal | SeparatorClass::Unknown => Separators {
            group: ',',
            decimal: '.',
        },
    }
}

/// The percent symbol a locale renders.
pub(crate) fn percent_symbol_for(locale: &Locale) -> char {
    match separator_class(locale.language()) {
        SeparatorClass::ArabicScript => '\u{066A}', // ٪
        _ => '%',
    }
}

/// Get the display symbol for an ISO 4217 currency code.
///
/// Returns a common symbol for well-known currencies, or the currency code
/// itself for unknown currencies.
pub(crate) fn currency_symbol(code: &str) -> String {
    match code {
        "USD" => "$".to_string(),
        "EUR" => "\u{20ac}".to_string(), // €
        "GBP" => "\u{00a3}".to_string(), // £
        "JPY" => "\u{00a5}".to_string(), // ¥
        "CNY" => "\u{00a5}".to_string(), // ¥
        "KRW" => "\u{20a9}".to_string(), // ₩
        "INR" => "\u{20b9}".to_string(), // ₹
        "RUB" => "\u{20bd}".to_string(), // ₽
        "BRL" => "R$".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        "CHF" => "CHF".to_string(),
        "MXN" => "MX$".to_string(),
        _ => code.to_string(),
    }
}

/// Where a currency symbol sits relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CurrencyPlacement {
    /// Symbol immediately before the digits (`$1,234.00`).
    Prefix,
    /// Symbol after the digits with a connecting space (`1.234,00 €`).
    SuffixWithSpace,
}

/// Placement convention for a currency code.
pub(crate) fn currency_placement(code: &str) -> CurrencyPlacement {
    match code {
        "EUR" => CurrencyPlacement::SuffixWithSpace,
        _ => CurrencyPlacement::Prefix,
    }
}

/// Map a unit name to its display token.
///
/// Unknown units use the name itself as the suffix.
pub(crate) fn unit_token(unit: &str) -> String {
    match unit {
        "percent" => "%".to_string(),
        "degree" => "\u{00b0}".to_string(),
        "celsius" => "\u{00b0}C".to_string(),
        "fahrenheit" => "\u{00b0}F".to_string(),
        "millimeter" => "mm".to_string(),
        "centimeter" => "cm".to_string(),
        "meter" => "m".to_string(),
        "kilometer" => "km".to_string(),
        "inch" => "in".to_string(),
        "foot" => "ft".to_string(),
        "mile" => "mi".to_string(),
        "gram" => "g".to_string(),
        "kilogram" => "kg".to_string(),
        "millisecond" => "ms".to_string(),
        "second" => "s".to_string(),
        "minute" => "min".to_string(),
        "hour" => "h".to_string(),
        "byte" => "B".to_string(),
        "kilobyte" => "kB".to_string(),
        "megabyte" => "MB".to_string(),
        "gigabyte" => "GB".to_string(),
        "liter" => "L".to_string(),
        "milliliter" => "mL".to_string(),
        other => other.to_string(),
    }
}

/// Whether a unit token attaches to the digits without a connecting space.
pub(crate) fn unit_attaches_directly(token: &str) -> bool {
    token == "%" || token.starts_with('\u{00b0}')
}

/// Structural details of how a `(locale, options)` pair formats numbers.
///
/// Derived by formatting probe values through the part pipeline and
/// inspecting the parts, so it always agrees with what the formatter
/// actually emits. Recomputed on demand; callers that format in a tight
/// loop may hold on to one.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleDetails {
    /// The decimal separator character.
    pub decimal_separator: char,
    /// The group (thousands) separator character.
    pub group_separator: char,
    /// The currency symbol, when the options carry a currency.
    pub currency_symbol: Option<String>,
    /// The percent symbol for this locale.
    pub percent_symbol: char,
    /// Literal connecting text (e.g. the space before a unit), if any.
    pub literal_text: Option<String>,
}

/// Resolve the [`LocaleDetails`] for a `(locale, options)` pair.
///
/// Two probes are formatted: a large-magnitude fractional value in plain
/// decimal style (to expose the separators even when the options suppress
/// fractions or grouping), and `1` with the full options (to expose the
/// currency/percent/unit tokens and connecting literals).
pub fn locale_details(locale: &Locale, options: &FormatOptions) -> LocaleDetails {
    // Probe 1: separators, independent of style-specific rounding.
    let separator_probe = FormatOptions::new()
        .with_minimum_fraction_digits(1)
        .with_use_grouping(true);
    let mut decimal_separator = '.';
    let mut group_separator = ',';
    for part in format::format_to_parts(1234567.8, locale, &separator_probe) {
        match part.kind {
            PartKind::Decimal => decimal_separator = part.text.chars().next().unwrap_or('.'),
            PartKind::Group => group_separator = part.text.chars().next().unwrap_or(','),
            _ => {}
        }
    }

    // Probe 2: style tokens under the caller's actual options.
    let mut currency = None;
    let mut literal_text = None;
    let mut percent_symbol = percent_symbol_for(locale);
    for part in format::format_to_parts(1.0, locale, options) {
        match part.kind {
            PartKind::Currency => currency = Some(part.text),
            PartKind::Percent => {
                percent_symbol = part.text.chars().next().unwrap_or(percent_symbol);
            }
            PartKind::Literal => literal_text = Some(part.text),
            _ => {}
        }
    }

    // A currency option always yields a symbol, even if the probe value
    // somehow dropped it.
    if currency.is_none()
        && options.style == NumberStyle::Currency
        && let Some(code) = options.currency.as_deref()
    {
        currency = Some(currency_symbol(code));
    }

    LocaleDetails {
        decimal_separator,
        group_separator,
        currency_symbol: currency,
        percent_symbol,
        literal_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parse() {
        let locale = Locale::new("en-US");
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.region(), Some("US"));

        let locale = Locale::new("fr_FR");
        assert_eq!(locale.language(), "fr");
        assert_eq!(locale.region(), Some("FR"));

        let locale = Locale::new("zh-Hant-TW");
        assert_eq!(locale.language(), "zh");
        assert_eq!(locale.region(), Some("TW"));

        let locale = Locale::new("de");
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.region(), None);
    }

    #[test]
    fn test_system_locale_is_parseable() {
        let locale = Locale::system();
        assert!(!locale.language().is_empty());
    }

    #[test]
    fn test_separator_tables() {
        assert_eq!(
            separators_for(&Locale::new("en-US")),
            Separators {
                group: ',',
                decimal: '.'
            }
        );
        assert_eq!(
            separators_for(&Locale::new("de-DE")),
            Separators {
                group: '.',
                decimal: ','
            }
        );
        assert_eq!(
            separators_for(&Locale::new("fr-FR")),
            Separators {
                group: '\u{202F}',
                decimal: ','
            }
        );
        assert_eq!(
            separators_for(&Locale::new("ar-EG")),
            Separators {
                group: '\u{066C}',
                decimal: '\u{066B}'
            }
        );
    }

    #[test]
    fn test_unknown_language_falls_back() {
        let locale = Locale::new("xx-YY");
        assert!(!locale.is_known());
        assert_eq!(
            separators_for(&locale),
            Separators {
                group: ',',
                decimal: '.'
            }
        );
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("EUR"), "\u{20ac}");
        assert_eq!(currency_symbol("GBP"), "\u{00a3}");
        assert_eq!(currency_symbol("XTS"), "XTS");
    }

    #[test]
    fn test_locale_details_en() {
        let details = locale_details(&Locale::new("en-US"), &FormatOptions::new());
        assert_eq!(details.decimal_separator, '.');
        assert_eq!(details.group_separator, ',');
        assert_eq!(details.currency_symbol, None);
        assert_eq!(details.percent_symbol, '%');
    }

    #[test]
    fn test_locale_details_de_currency() {
        let options = FormatOptions::new()
            .with_style(NumberStyle::Currency)
            .with_currency("EUR");
        let details = locale_details(&Locale::new("de-DE"), &options);
        assert_eq!(details.decimal_separator, ',');
        assert_eq!(details.group_separator, '.');
        assert_eq!(details.currency_symbol.as_deref(), Some("\u{20ac}"));
        assert_eq!(details.literal_text.as_deref(), Some(" "));
    }

    #[test]
    fn test_locale_details_unit_literal() {
        let options = FormatOptions::new()
            .with_style(NumberStyle::Unit)
            .with_unit("kilometer");
        let details = locale_details(&Locale::new("en-US"), &options);
        assert_eq!(details.literal_text.as_deref(), Some(" "));
    }
}
