//! The headless number field.
//!
//! [`NumberField`] ties the parsing, formatting, and validation layers
//! together into a single piece of state a host UI can drive. It owns no
//! rendering and no event loop: the host forwards text edits, commits,
//! wheel deltas, and step requests, and observes the results through
//! signals and accessors.
//!
//! Editing is two-phase. While the user types, [`NumberField::set_input_text`]
//! records the raw text and marks the field dirty; nothing is parsed and
//! the committed value is untouched, so intermediate states like `"1."`
//! or `"-"` are never rejected. [`NumberField::commit_input`] (on blur or
//! Enter) parses, validates, and commits in one step, after which the
//! display is reconciled back to the canonical formatted form.

use numfield_core::Signal;
use numfield_core::logging::targets;
use static_assertions::assert_impl_all;

use crate::format;
use crate::locale::Locale;
use crate::options::FormatOptions;
use crate::parse;
use crate::validate::{StepAmounts, StepConfig, StepModifiers, to_validated_number};

/// The result of committing the edit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The input parsed and a value was committed.
    Committed,
    /// The input was blank; the value was cleared.
    Empty,
    /// The input did not parse; the value was cleared.
    Unparseable,
}

/// Headless state machine for a numeric input field.
///
/// # Example
///
/// ```
/// use numfield::{CommitOutcome, Locale, NumberField};
///
/// let mut field = NumberField::new().with_locale(Locale::new("en-US"));
///
/// field.set_input_text("1,234.5");
/// assert_eq!(field.commit_input(), CommitOutcome::Committed);
/// assert_eq!(field.value(), Some(1234.5));
/// assert_eq!(field.display_text(), "1,234.5");
/// ```
pub struct NumberField {
    locale: Locale,
    options: FormatOptions,
    step_config: StepConfig,
    step_amounts: StepAmounts,
    value: Option<f64>,
    input_text: String,
    dirty: bool,

    /// Emitted when the committed value changes.
    pub value_changed: Signal<Option<f64>>,
    /// Emitted when the edit buffer changes, whether from typing or from
    /// display reconciliation.
    pub input_changed: Signal<String>,
    /// Emitted when an edit session ends via [`NumberField::commit_input`].
    pub editing_finished: Signal<()>,
}

impl Default for NumberField {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberField {
    /// Create a field with the system locale, default options, and an
    /// unconstrained range.
    pub fn new() -> Self {
        Self {
            locale: Locale::system(),
            options: FormatOptions::default(),
            step_config: StepConfig::default(),
            step_amounts: StepAmounts::default(),
            value: None,
            input_text: String::new(),
            dirty: false,
            value_changed: Signal::new(),
            input_changed: Signal::new(),
            editing_finished: Signal::new(),
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Set the locale using builder pattern.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Set the format options using builder pattern.
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the range/step constraints using builder pattern.
    pub fn with_step_config(mut self, config: StepConfig) -> Self {
        self.step_config = config;
        self
    }

    /// Set the step magnitudes using builder pattern.
    pub fn with_step_amounts(mut self, amounts: StepAmounts) -> Self {
        self.step_amounts = amounts;
        self
    }

    /// Set the initial value using builder pattern. The value is
    /// validated; no signals fire.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = to_validated_number(Some(value), &self.step_config, &self.options);
        self.input_text = self.formatted();
        self
    }

    /// The field's locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The field's format options.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// The field's range/step constraints.
    pub fn step_config(&self) -> &StepConfig {
        &self.step_config
    }

    /// The field's step magnitudes.
    pub fn step_amounts(&self) -> &StepAmounts {
        &self.step_amounts
    }

    /// Change the locale. The committed value is unchanged; the display
    /// is rewritten in the new locale's conventions.
    pub fn set_locale(&mut self, locale: Locale) {
        if self.locale != locale {
            self.locale = locale;
            self.reconcile_display();
        }
    }

    /// Change the format options. The committed value is re-validated
    /// (fraction-digit limits affect the floating-point cleanup) and the
    /// display is rewritten.
    pub fn set_options(&mut self, options: FormatOptions) {
        if self.options != options {
            self.options = options;
            self.revalidate();
        }
    }

    /// Change the range/step constraints and re-validate the committed
    /// value against them.
    pub fn set_step_config(&mut self, config: StepConfig) {
        if self.step_config != config {
            self.step_config = config;
            self.revalidate();
        }
    }

    /// Change the step magnitudes.
    pub fn set_step_amounts(&mut self, amounts: StepAmounts) {
        self.step_amounts = amounts;
    }

    // ========================================================================
    // Value access
    // ========================================================================

    /// The committed value.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Commit a value programmatically.
    ///
    /// The value passes through validation. `value_changed` fires only
    /// when the validated value differs from the current one; the display
    /// is reconciled either way (unless an edit is in progress).
    pub fn set_value(&mut self, value: Option<f64>) {
        let validated = to_validated_number(value, &self.step_config, &self.options);
        if self.value != validated {
            self.value = validated;
            tracing::trace!(target: targets::FIELD, value = ?validated, "value changed");
            self.value_changed.emit(validated);
        }
        self.reconcile_display();
    }

    // ========================================================================
    // Text editing
    // ========================================================================

    /// The raw edit buffer.
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Whether the edit buffer holds uncommitted text.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record typed text without parsing it.
    ///
    /// Marks the field dirty so the buffer survives reconciliation until
    /// the next commit.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.input_text != text || !self.dirty {
            self.input_text = text.clone();
            self.dirty = true;
            self.input_changed.emit(text);
        }
    }

    /// Parse, validate, and commit the edit buffer.
    ///
    /// Blank input clears the value; input that does not parse also
    /// clears it, so the field never holds a value its display
    /// contradicts. The buffer is rewritten to the canonical formatted
    /// form and `editing_finished` fires.
    pub fn commit_input(&mut self) -> CommitOutcome {
        let outcome = if self.input_text.trim().is_empty() {
            self.apply_committed(None);
            CommitOutcome::Empty
        } else {
            match parse::parse_number(&self.input_text, Some(&self.locale), &self.options) {
                Some(parsed) => {
                    self.apply_committed(Some(parsed));
                    CommitOutcome::Committed
                }
                None => {
                    tracing::trace!(
                        target: targets::FIELD,
                        input = %self.input_text,
                        "commit of unparseable input"
                    );
                    self.apply_committed(None);
                    CommitOutcome::Unparseable
                }
            }
        };

        self.dirty = false;
        self.reconcile_display();
        self.editing_finished.emit(());
        outcome
    }

    /// Rewrite the edit buffer from the committed value.
    ///
    /// Does nothing while an edit is in progress. Returns whether the
    /// buffer changed.
    pub fn reconcile_display(&mut self) -> bool {
        if self.dirty {
            return false;
        }
        let formatted = self.formatted();
        if self.input_text != formatted {
            self.input_text = formatted.clone();
            self.input_changed.emit(formatted);
            true
        } else {
            false
        }
    }

    /// The text the host should render right now.
    pub fn display_text(&self) -> String {
        if self.dirty {
            self.input_text.clone()
        } else {
            self.formatted()
        }
    }

    /// The committed value in canonical formatted form (empty when there
    /// is no value).
    ///
    /// Without explicit fraction-digit options the full stored precision
    /// is rendered, so committing `1.2345` does not display as `1.234`
    /// while holding a different value underneath.
    pub fn formatted(&self) -> String {
        match self.value {
            Some(value) if self.options.has_explicit_fraction_digits() => {
                format::format_number(Some(value), &self.locale, &self.options)
            }
            Some(value) => format::format_max_precision(value, &self.locale, &self.options),
            None => String::new(),
        }
    }

    /// The non-digit characters the host should accept as keystrokes.
    pub fn allowed_keys(&self) -> Vec<char> {
        parse::allowed_non_numeric_keys(&self.locale, &self.options)
    }

    // ========================================================================
    // Stepping
    // ========================================================================

    /// Step the committed value by the modifier-scaled amount.
    ///
    /// `direction` is reduced to its sign. A field with no value starts
    /// stepping from the lower bound when it is finite, otherwise from
    /// zero (pulled into range by validation). Returns the new value.
    pub fn increment(&mut self, direction: i32, modifiers: &StepModifiers) -> Option<f64> {
        let sign = direction.signum();
        if sign == 0 {
            return self.value;
        }
        let amount = self.step_amounts.amount_for(modifiers) * f64::from(sign);
        let next = self.starting_point() + amount;
        self.set_value(Some(next));
        self.value
    }

    /// Apply a wheel delta, in the conventional 120-units-per-detent
    /// scale. Positive deltas increment. Returns the new value.
    pub fn handle_wheel(&mut self, delta: f64, modifiers: &StepModifiers) -> Option<f64> {
        let mut detents = (delta / 120.0).round();
        if detents == 0.0 && delta != 0.0 {
            detents = delta.signum();
        }
        if detents == 0.0 {
            return self.value;
        }
        let amount = self.step_amounts.amount_for(modifiers) * detents;
        let next = self.starting_point() + amount;
        self.set_value(Some(next));
        self.value
    }

    fn starting_point(&self) -> f64 {
        match self.value {
            Some(value) => value,
            None if self.step_config.min.is_finite() => self.step_config.min,
            None if self.step_config.max.is_finite() && self.step_config.max < 0.0 => {
                self.step_config.max
            }
            None => 0.0,
        }
    }

    fn apply_committed(&mut self, value: Option<f64>) {
        let validated = to_validated_number(value, &self.step_config, &self.options);
        if self.value != validated {
            self.value = validated;
            self.value_changed.emit(validated);
        }
    }

    /// Re-run validation after a constraint change.
    fn revalidate(&mut self) {
        let validated = to_validated_number(self.value, &self.step_config, &self.options);
        if self.value != validated {
            self.value = validated;
            self.value_changed.emit(validated);
        }
        self.reconcile_display();
    }
}

assert_impl_all!(NumberField: Send, Sync);
