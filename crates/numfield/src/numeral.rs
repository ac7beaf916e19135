//! Numeral system handling: digit normalization across scripts, sign
//! character normalization, and percent/permille symbol recognition.
//!
//! Users paste numbers written with Arabic-Indic, Persian, fullwidth, or
//! Han digits; the parser normalizes all of them to ASCII before the
//! numeric conversion runs, so every downstream step only ever sees
//! `0`..=`9`.

use std::sync::LazyLock;

use regex::Regex;

/// A numeral script the engine recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralSystem {
    /// ASCII digits `0`..=`9`.
    Latin,
    /// Arabic-Indic digits U+0660..=U+0669.
    ArabicIndic,
    /// Extended Arabic-Indic (Persian) digits U+06F0..=U+06F9.
    Persian,
    /// Fullwidth digits U+FF10..=U+FF19.
    Fullwidth,
    /// Han numerals (〇 through 九, plus 零).
    Han,
}

/// Map a single character to its digit value, if it is a digit in any
/// supported numeral system.
pub(crate) fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        '\u{0660}'..='\u{0669}' => Some(c as u32 - 0x0660),
        '\u{06F0}'..='\u{06F9}' => Some(c as u32 - 0x06F0),
        '\u{FF10}'..='\u{FF19}' => Some(c as u32 - 0xFF10),
        '\u{3007}' | '\u{96F6}' => Some(0), // 〇, 零
        '\u{4E00}' => Some(1),              // 一
        '\u{4E8C}' => Some(2),              // 二
        '\u{4E09}' => Some(3),              // 三
        '\u{56DB}' => Some(4),              // 四
        '\u{4E94}' => Some(5),              // 五
        '\u{516D}' => Some(6),              // 六
        '\u{4E03}' => Some(7),              // 七
        '\u{516B}' => Some(8),              // 八
        '\u{4E5D}' => Some(9),              // 九
        _ => None,
    }
}

/// Identify which numeral system a character belongs to.
pub(crate) fn numeral_system_of(c: char) -> Option<NumeralSystem> {
    match c {
        '0'..='9' => Some(NumeralSystem::Latin),
        '\u{0660}'..='\u{0669}' => Some(NumeralSystem::ArabicIndic),
        '\u{06F0}'..='\u{06F9}' => Some(NumeralSystem::Persian),
        '\u{FF10}'..='\u{FF19}' => Some(NumeralSystem::Fullwidth),
        _ => digit_value(c).map(|_| NumeralSystem::Han),
    }
}

/// Detect the dominant non-Latin numeral system in a string.
///
/// Returns the first non-Latin system encountered, or `None` when the
/// string contains only ASCII digits (or no digits at all).
pub fn detect_numeral_system(text: &str) -> Option<NumeralSystem> {
    text.chars()
        .filter_map(numeral_system_of)
        .find(|system| *system != NumeralSystem::Latin)
}

/// Replace every recognized digit with its ASCII equivalent.
///
/// Non-digit characters pass through unchanged.
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| match digit_value(c) {
            Some(value) => char::from(b'0' + value as u8),
            None => c,
        })
        .collect()
}

/// Normalize the many Unicode minus and plus variants to ASCII `-`/`+`.
///
/// Covers the true minus sign, en/em/figure dashes, and the fullwidth and
/// small form variants, all of which show up in pasted text.
pub(crate) fn normalize_sign(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2212}' | '\u{2013}' | '\u{2014}' | '\u{2012}' | '\u{FF0D}' | '\u{FE63}' => '-',
            '\u{FF0B}' | '\u{FE62}' => '+',
            other => other,
        })
        .collect()
}

/// Whether a character is a percent sign in any script.
pub(crate) fn is_percent(c: char) -> bool {
    matches!(c, '%' | '\u{066A}' | '\u{FF05}' | '\u{FE6A}')
}

/// Whether a character is a permille sign.
pub(crate) fn is_permille(c: char) -> bool {
    matches!(c, '\u{2030}' | '\u{0609}')
}

static FORMAT_CONTROLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Cf}").unwrap_or_else(|e| panic!("invalid regex: {e}")));

/// Strip invisible format-control characters (category Cf).
///
/// Pasted text frequently carries left-to-right marks, zero-width spaces,
/// and similar controls that would otherwise break tokenization.
pub(crate) fn strip_format_controls(text: &str) -> String {
    FORMAT_CONTROLS.replace_all(text, "").into_owned()
}
