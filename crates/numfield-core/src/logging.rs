//! Logging facilities for numfield.
//!
//! numfield uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! The constants in [`targets`] can be combined with `tracing` filter
//! directives (e.g. `RUST_LOG=numfield_core::timer=trace`) to narrow the
//! output to a single subsystem.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "numfield_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "numfield_core::signal";
    /// Timer system target.
    pub const TIMER: &str = "numfield_core::timer";
    /// Number parser target.
    pub const PARSE: &str = "numfield::parse";
    /// Field state machine target.
    pub const FIELD: &str = "numfield::field";
}
