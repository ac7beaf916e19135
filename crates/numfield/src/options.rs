//! Formatting options for numeric fields.
//!
//! [`FormatOptions`] drives both directions of the engine symmetrically:
//! the formatter uses it to decide how a value is rendered, and the parser
//! uses it to know which tokens (percent sign, currency symbol, unit
//! suffix) to expect and strip from user input.

/// The presentation style of a formatted number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    /// Plain decimal formatting.
    #[default]
    Decimal,
    /// Percent formatting: the value is scaled by 100 and a percent symbol
    /// is appended. `0.12` renders as `12%`.
    Percent,
    /// Currency formatting with a symbol placed per currency convention.
    Currency,
    /// A number with a unit suffix (e.g. `12 km`).
    Unit,
}

/// Controls when a sign character is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignDisplay {
    /// Minus sign for negative values only.
    #[default]
    Auto,
    /// Never render a sign.
    Never,
    /// Always render a sign, including `+` for positive values and zero.
    Always,
    /// Render a sign for everything except zero.
    ExceptZero,
}

/// Configuration for formatting and parsing numbers.
///
/// # Example
///
/// ```
/// use numfield::{FormatOptions, NumberStyle};
///
/// let price = FormatOptions::new()
///     .with_style(NumberStyle::Currency)
///     .with_currency("EUR");
///
/// let ratio = FormatOptions::new()
///     .with_style(NumberStyle::Percent);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormatOptions {
    /// The presentation style.
    pub style: NumberStyle,
    /// ISO 4217 currency code, used when `style` is [`NumberStyle::Currency`].
    pub currency: Option<String>,
    /// Unit name (e.g. `"kilometer"`, `"percent"`), used when `style` is
    /// [`NumberStyle::Unit`].
    pub unit: Option<String>,
    /// Minimum number of fraction digits to render.
    pub minimum_fraction_digits: Option<u32>,
    /// Maximum number of fraction digits to render.
    pub maximum_fraction_digits: Option<u32>,
    /// Whether to insert group separators in the integer part.
    pub use_grouping: bool,
    /// When to render a sign character.
    pub sign_display: SignDisplay,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            style: NumberStyle::Decimal,
            currency: None,
            unit: None,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
            use_grouping: true,
            sign_display: SignDisplay::Auto,
        }
    }
}

impl FormatOptions {
    /// Create options with default settings (decimal style, grouping on).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the style using builder pattern.
    pub fn with_style(mut self, style: NumberStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the currency code using builder pattern.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the unit name using builder pattern.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the minimum fraction digits using builder pattern.
    pub fn with_minimum_fraction_digits(mut self, digits: u32) -> Self {
        self.minimum_fraction_digits = Some(digits);
        self
    }

    /// Set the maximum fraction digits using builder pattern.
    pub fn with_maximum_fraction_digits(mut self, digits: u32) -> Self {
        self.maximum_fraction_digits = Some(digits);
        self
    }

    /// Set whether grouping separators are rendered using builder pattern.
    pub fn with_use_grouping(mut self, use_grouping: bool) -> Self {
        self.use_grouping = use_grouping;
        self
    }

    /// Set the sign display mode using builder pattern.
    pub fn with_sign_display(mut self, sign_display: SignDisplay) -> Self {
        self.sign_display = sign_display;
        self
    }

    /// Resolve the effective `(minimum, maximum)` fraction digits.
    ///
    /// Defaults follow platform formatter conventions: 0..=3 for decimal
    /// and unit styles, 0 for percent, 2 for currency. An explicit minimum
    /// raises the maximum so the pair stays consistent.
    pub(crate) fn fraction_digits(&self) -> (u32, u32) {
        let (default_min, default_max) = match self.style {
            NumberStyle::Decimal | NumberStyle::Unit => (0, 3),
            NumberStyle::Percent => (0, 0),
            NumberStyle::Currency => (2, 2),
        };
        let min = self.minimum_fraction_digits.unwrap_or(default_min);
        let max = self.maximum_fraction_digits.unwrap_or(default_max).max(min);
        (min, max)
    }

    /// Whether the caller pinned fraction digits explicitly.
    pub(crate) fn has_explicit_fraction_digits(&self) -> bool {
        self.minimum_fraction_digits.is_some() || self.maximum_fraction_digits.is_some()
    }

    /// Whether parsing should treat a percent indicator as a scale factor.
    ///
    /// The `style: Unit, unit: "percent"` combination renders a percent
    /// symbol but does NOT scale: `"12%"` parses to `12`, not `0.12`.
    pub(crate) fn unit_is_percent(&self) -> bool {
        self.style == NumberStyle::Unit && self.unit.as_deref() == Some("percent")
    }
}
