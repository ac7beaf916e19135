//! # numfield
//!
//! A headless engine for numeric input fields: locale-aware parsing and
//! formatting, value validation and stepping, and the interaction
//! controllers (press-and-hold auto-repeat, drag-to-scrub) that number
//! fields need, with no rendering or platform dependencies.
//!
//! The crate is host-agnostic by construction. All time-based behavior is
//! deadline-driven against `Instant`s the host supplies, pointer input
//! arrives as plain coordinates, and state changes surface through
//! [`Signal`]s, so the same engine runs under a desktop event loop, a
//! terminal UI, or a test harness.
//!
//! ## Parsing and formatting
//!
//! [`parse_number`] accepts whatever users actually type: foreign numeral
//! scripts, accounting parentheses, trailing minus signs, percent and
//! currency tokens, mixed separators. [`format_number`] renders values
//! back in the locale's conventions.
//!
//! ```
//! use numfield::{FormatOptions, Locale, NumberStyle, format_number, parse_number};
//!
//! let de = Locale::new("de-DE");
//! let options = FormatOptions::new();
//!
//! assert_eq!(parse_number("1.234,5", Some(&de), &options), Some(1234.5));
//! assert_eq!(format_number(Some(1234.5), &de, &options), "1.234,5");
//!
//! let percent = FormatOptions::new().with_style(NumberStyle::Percent);
//! let en = Locale::new("en-US");
//! assert_eq!(parse_number("12%", Some(&en), &percent), Some(0.12));
//! ```
//!
//! ## The field state machine
//!
//! [`NumberField`] holds a committed value and a raw edit buffer.
//! Keystrokes only touch the buffer; parsing and validation run when the
//! edit is committed, so half-typed input is never rejected.
//!
//! ```
//! use numfield::{CommitOutcome, Locale, NumberField, StepConfig};
//!
//! let mut field = NumberField::new()
//!     .with_locale(Locale::new("en-US"))
//!     .with_step_config(StepConfig::new().with_range(0.0, 100.0).with_step(5.0));
//!
//! field.set_input_text("12");
//! assert_eq!(field.commit_input(), CommitOutcome::Committed);
//! assert_eq!(field.value(), Some(10.0)); // snapped to the step grid
//! ```

mod field;
mod format;
mod locale;
mod numeral;
mod options;
mod parse;
mod repeat;
mod scrub;
mod validate;

pub use field::{CommitOutcome, NumberField};
pub use format::{FormatPart, PartKind, format_max_precision, format_number, format_to_parts};
pub use locale::{Locale, LocaleDetails, locale_details};
pub use numeral::{NumeralSystem, detect_numeral_system, normalize_digits};
pub use options::{FormatOptions, NumberStyle, SignDisplay};
pub use parse::{allowed_non_numeric_keys, parse_number};
pub use repeat::{AutoRepeat, RepeatConfig};
pub use scrub::{PointerCapability, ScrubAxis, ScrubConfig, ScrubController};
pub use validate::{
    StepAmounts, StepConfig, StepModifiers, remove_floating_point_errors, to_validated_number,
};

pub use numfield_core::{ConnectionGuard, ConnectionId, Signal};
