//! Value validation: clamping, step snapping, and floating-point cleanup.
//!
//! Every value that enters a field (typed, stepped, scrubbed, or set
//! programmatically) passes through [`to_validated_number`] so the
//! committed state always satisfies the range and step constraints.

use crate::options::FormatOptions;

/// Range and step constraints for a numeric field.
///
/// # Example
///
/// ```
/// use numfield::{FormatOptions, StepConfig, to_validated_number};
///
/// let config = StepConfig::new().with_range(0.0, 100.0).with_step(5.0);
/// let options = FormatOptions::new();
/// assert_eq!(to_validated_number(Some(12.0), &config, &options), Some(10.0));
/// assert_eq!(to_validated_number(Some(-3.0), &config, &options), Some(0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StepConfig {
    /// The step the value snaps to, measured from the snap origin.
    pub step: Option<f64>,
    /// Inclusive lower bound. Defaults to negative infinity.
    pub min: f64,
    /// Inclusive upper bound. Defaults to positive infinity.
    pub max: f64,
    /// The point the step grid is anchored at. Defaults to `min` when
    /// finite, else 0.
    pub snap_origin: Option<f64>,
    /// Whether values snap to the step grid during validation.
    pub snap_on_step: bool,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            step: None,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
            snap_origin: None,
            snap_on_step: true,
        }
    }
}

impl StepConfig {
    /// Create an unconstrained config (no step, unbounded range).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step using builder pattern. Non-positive steps are ignored.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = (step > 0.0).then_some(step);
        self
    }

    /// Set the range using builder pattern. The bounds are swapped if
    /// given in the wrong order.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        if min <= max {
            self.min = min;
            self.max = max;
        } else {
            self.min = max;
            self.max = min;
        }
        self
    }

    /// Set the snap origin using builder pattern.
    pub fn with_snap_origin(mut self, origin: f64) -> Self {
        self.snap_origin = Some(origin);
        self
    }

    /// Set whether validation snaps to the step grid using builder pattern.
    pub fn with_snap_on_step(mut self, snap: bool) -> Self {
        self.snap_on_step = snap;
        self
    }

    /// The anchor point of the step grid.
    pub(crate) fn origin(&self) -> f64 {
        self.snap_origin
            .unwrap_or(if self.min.is_finite() { self.min } else { 0.0 })
    }
}

/// The step magnitudes a field offers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepAmounts {
    /// The default step per increment. Defaults to 1.
    pub step: f64,
    /// The step applied with the fine modifier held. Defaults to 0.1.
    pub small_step: f64,
    /// The step applied with the coarse modifier held. Defaults to 10.
    pub large_step: f64,
}

impl Default for StepAmounts {
    fn default() -> Self {
        Self {
            step: 1.0,
            small_step: 0.1,
            large_step: 10.0,
        }
    }
}

/// Modifier keys active during a step gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepModifiers {
    /// Fine adjustment modifier (typically Alt/Option).
    pub fine: bool,
    /// Coarse adjustment modifier (typically Shift).
    pub coarse: bool,
}

impl StepAmounts {
    /// The effective step magnitude for the active modifiers.
    ///
    /// Fine wins when both modifiers are held.
    pub fn amount_for(&self, modifiers: &StepModifiers) -> f64 {
        if modifiers.fine {
            self.small_step
        } else if modifiers.coarse {
            self.large_step
        } else {
            self.step
        }
    }
}

/// Validate a value against a [`StepConfig`].
///
/// `None` passes through unchanged. Otherwise the value is clamped to the
/// range, snapped to the nearest step-grid point (when a step is set and
/// snapping is on), re-clamped in case snapping overshot a bound, and
/// finally cleaned of floating-point representation error. The result of
/// validating an already-validated value is itself.
pub fn to_validated_number(
    value: Option<f64>,
    config: &StepConfig,
    options: &FormatOptions,
) -> Option<f64> {
    let value = value?;
    if value.is_nan() {
        return None;
    }

    let mut value = value.clamp(config.min, config.max);

    if config.snap_on_step
        && let Some(step) = config.step
    {
        let origin = config.origin();
        let steps = ((value - origin) / step).round();
        value = (origin + steps * step).clamp(config.min, config.max);
    }

    Some(remove_floating_point_errors(value, options))
}

/// Strip accumulated binary representation error from a value.
///
/// The value is rendered through a fixed-precision decimal path and parsed
/// back, so `0.1 + 0.2` comes out as `0.3`. When the options pin fraction
/// digits the precision follows them; otherwise 12 digits, enough to
/// absorb drift without losing intentional precision.
pub fn remove_floating_point_errors(value: f64, options: &FormatOptions) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let digits = if options.has_explicit_fraction_digits() {
        options.fraction_digits().1
    } else {
        12
    };
    format!("{value:.prec$}", prec = digits as usize)
        .parse()
        .unwrap_or(value)
}
