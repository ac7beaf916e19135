//! Drag-to-adjust ("scrubbing") over a field's label or track.
//!
//! [`ScrubController`] converts pointer drags into ±1 step counts: every
//! `pixel_sensitivity` pixels of travel along the configured axis emits a
//! step. Hosts that can lock the pointer feed raw deltas through
//! [`ScrubController::pointer_move_relative`]; everyone else reports
//! absolute positions and gets an unbounded drag anyway, because the
//! controller maintains a virtual cursor that wraps inside a teleport
//! rectangle centered on the press point.

use numfield_core::logging::targets;

/// The screen axis a scrub gesture reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrubAxis {
    /// Drag right to increment.
    #[default]
    Horizontal,
    /// Drag up to increment.
    Vertical,
}

/// Parameters for scrub gestures.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubConfig {
    /// The axis whose movement adjusts the value.
    pub axis: ScrubAxis,
    /// Pixels of travel per step.
    pub pixel_sensitivity: f64,
    /// Width and height of the rectangle the virtual cursor wraps in.
    /// An extent of zero on an axis disables wrapping on that axis.
    pub teleport_extent: (f64, f64),
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            axis: ScrubAxis::Horizontal,
            pixel_sensitivity: 2.0,
            teleport_extent: (200.0, 200.0),
        }
    }
}

/// What the host's pointer backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerCapability {
    /// The backend can lock the pointer and deliver raw deltas.
    pub pointer_lock: bool,
    /// Pointer lock exists but misreports deltas; treat it as absent.
    pub buggy_pointer_lock: bool,
}

/// Live state of one scrub gesture.
#[derive(Debug, Clone, PartialEq)]
struct ScrubSession {
    /// Where the pointer went down; the teleport rectangle is centered
    /// here.
    origin: (f64, f64),
    /// Last absolute pointer position reported.
    last_pointer: (f64, f64),
    /// Host-drawn cursor position, wrapped inside the teleport rectangle.
    virtual_cursor: (f64, f64),
    /// Travel along the scrub axis not yet converted to steps.
    cumulative_delta: f64,
}

/// Converts pointer drags into value steps.
///
/// # Example
///
/// ```
/// use numfield::{ScrubConfig, ScrubController};
///
/// let mut scrub = ScrubController::new(ScrubConfig::default());
/// scrub.pointer_down(100.0, 100.0);
/// assert_eq!(scrub.pointer_move(105.0, 100.0), 2);
/// scrub.pointer_up();
/// ```
pub struct ScrubController {
    config: ScrubConfig,
    session: Option<ScrubSession>,
}

impl ScrubController {
    /// Create a controller with the given gesture parameters.
    pub fn new(config: ScrubConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Whether the host should lock the pointer for scrubbing.
    pub fn wants_pointer_lock(&self, capability: &PointerCapability) -> bool {
        capability.pointer_lock && !capability.buggy_pointer_lock
    }

    /// Begin a scrub at the given pointer position.
    ///
    /// Replaces any session already in progress.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.session = Some(ScrubSession {
            origin: (x, y),
            last_pointer: (x, y),
            virtual_cursor: (x, y),
            cumulative_delta: 0.0,
        });
        tracing::trace!(target: targets::FIELD, x, y, "scrub started");
    }

    /// Report an absolute pointer position.
    ///
    /// Returns the signed number of steps this movement produced, zero
    /// when no session is active.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> i32 {
        let Some(session) = &mut self.session else {
            return 0;
        };
        let dx = x - session.last_pointer.0;
        let dy = y - session.last_pointer.1;
        session.last_pointer = (x, y);
        self.apply_delta(dx, dy)
    }

    /// Report a raw pointer delta from a pointer-locked host.
    pub fn pointer_move_relative(&mut self, dx: f64, dy: f64) -> i32 {
        if self.session.is_none() {
            return 0;
        }
        self.apply_delta(dx, dy)
    }

    /// End the gesture normally.
    pub fn pointer_up(&mut self) {
        self.session = None;
    }

    /// Abort the gesture (e.g. focus loss). Same effect as release; the
    /// steps already emitted stand.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Whether a scrub gesture is in progress.
    pub fn is_scrubbing(&self) -> bool {
        self.session.is_some()
    }

    /// Where the host should draw the cursor during the gesture.
    pub fn virtual_cursor(&self) -> Option<(f64, f64)> {
        self.session.as_ref().map(|s| s.virtual_cursor)
    }

    fn apply_delta(&mut self, dx: f64, dy: f64) -> i32 {
        let Some(session) = &mut self.session else {
            return 0;
        };

        // Dragging up is an increase, so the vertical axis is inverted.
        let along_axis = match self.config.axis {
            ScrubAxis::Horizontal => dx,
            ScrubAxis::Vertical => -dy,
        };

        session.cumulative_delta += along_axis;
        let steps = (session.cumulative_delta / self.config.pixel_sensitivity).trunc();
        session.cumulative_delta -= steps * self.config.pixel_sensitivity;

        session.virtual_cursor.0 = wrap_coordinate(
            session.virtual_cursor.0 + dx,
            session.origin.0,
            self.config.teleport_extent.0,
        );
        session.virtual_cursor.1 = wrap_coordinate(
            session.virtual_cursor.1 + dy,
            session.origin.1,
            self.config.teleport_extent.1,
        );

        steps as i32
    }
}

/// Wrap `position` into the interval of width `extent` centered on
/// `center`. A zero or negative extent leaves the position alone.
fn wrap_coordinate(position: f64, center: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return position;
    }
    let low = center - extent / 2.0;
    (position - low).rem_euclid(extent) + low
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_steps() {
        let mut scrub = ScrubController::new(ScrubConfig::default());
        scrub.pointer_down(0.0, 0.0);

        // 2px per step.
        assert_eq!(scrub.pointer_move(1.0, 0.0), 0);
        assert_eq!(scrub.pointer_move(2.0, 0.0), 1);
        assert_eq!(scrub.pointer_move(8.0, 0.0), 3);
        assert_eq!(scrub.pointer_move(4.0, 0.0), -2);
    }

    #[test]
    fn test_vertical_up_is_increment() {
        let config = ScrubConfig {
            axis: ScrubAxis::Vertical,
            ..ScrubConfig::default()
        };
        let mut scrub = ScrubController::new(config);
        scrub.pointer_down(0.0, 100.0);

        assert_eq!(scrub.pointer_move(0.0, 96.0), 2);
        assert_eq!(scrub.pointer_move(0.0, 100.0), -2);
    }

    #[test]
    fn test_residual_accumulates() {
        let mut scrub = ScrubController::new(ScrubConfig::default());
        scrub.pointer_down(0.0, 0.0);

        // Three 1px moves: the step lands on the second.
        assert_eq!(scrub.pointer_move(1.0, 0.0), 0);
        assert_eq!(scrub.pointer_move(2.0, 0.0), 1);
        assert_eq!(scrub.pointer_move(3.0, 0.0), 0);
    }

    #[test]
    fn test_relative_moves() {
        let mut scrub = ScrubController::new(ScrubConfig::default());
        scrub.pointer_down(50.0, 50.0);

        assert_eq!(scrub.pointer_move_relative(6.0, 0.0), 3);
        assert_eq!(scrub.pointer_move_relative(-2.0, 0.0), -1);
    }

    #[test]
    fn test_no_session_no_steps() {
        let mut scrub = ScrubController::new(ScrubConfig::default());
        assert_eq!(scrub.pointer_move(100.0, 0.0), 0);
        assert_eq!(scrub.pointer_move_relative(100.0, 0.0), 0);
        assert!(!scrub.is_scrubbing());
        assert_eq!(scrub.virtual_cursor(), None);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut scrub = ScrubController::new(ScrubConfig::default());
        scrub.pointer_down(0.0, 0.0);
        assert!(scrub.is_scrubbing());

        scrub.pointer_up();
        assert!(!scrub.is_scrubbing());
        assert_eq!(scrub.pointer_move(100.0, 0.0), 0);

        scrub.pointer_down(0.0, 0.0);
        scrub.cancel();
        assert!(!scrub.is_scrubbing());
    }

    #[test]
    fn test_virtual_cursor_wraps() {
        let config = ScrubConfig {
            teleport_extent: (100.0, 100.0),
            ..ScrubConfig::default()
        };
        let mut scrub = ScrubController::new(config);
        scrub.pointer_down(500.0, 500.0);

        // Inside the rectangle the cursor tracks the pointer.
        scrub.pointer_move(540.0, 500.0);
        assert_eq!(scrub.virtual_cursor(), Some((540.0, 500.0)));

        // Past the right edge (550) it wraps to the left edge side.
        scrub.pointer_move(560.0, 500.0);
        assert_eq!(scrub.virtual_cursor(), Some((460.0, 500.0)));
    }

    #[test]
    fn test_wants_pointer_lock() {
        let scrub = ScrubController::new(ScrubConfig::default());
        assert!(scrub.wants_pointer_lock(&PointerCapability {
            pointer_lock: true,
            buggy_pointer_lock: false,
        }));
        assert!(!scrub.wants_pointer_lock(&PointerCapability {
            pointer_lock: true,
            buggy_pointer_lock: true,
        }));
        assert!(!scrub.wants_pointer_lock(&PointerCapability::default()));
    }
}
