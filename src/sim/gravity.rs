//! Orientation-to-gravity mapping
//!
//! Two tilt angles become a gentle 2D gravity vector. Sensor ranges are wide
//! (front/back spans ±180°, left/right ±90°), so a comfortable hand tilt of
//! ±45° is mapped to the full range before scaling down for a floating feel.

use glam::Vec2;

use crate::consts::{GRAVITY_MAX, TILT_FULL_ANGLE};

/// Map a tilt sample (degrees) to gravity in g-units.
///
/// `front_back` drives the y axis, `left_right` the x axis. Each component
/// saturates at ±`GRAVITY_MAX` once the tilt passes ±`TILT_FULL_ANGLE`.
pub fn gravity_from_tilt(front_back: f32, left_right: f32) -> Vec2 {
    let x = (left_right / TILT_FULL_ANGLE).clamp(-1.0, 1.0) * GRAVITY_MAX;
    let y = (front_back / TILT_FULL_ANGLE).clamp(-1.0, 1.0) * GRAVITY_MAX;
    Vec2::new(x, y)
}

/// Whether tilt samples are being consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiltState {
    /// Initial state: gravity pinned to zero, samples ignored
    Inactive,
    /// Receiving orientation samples
    Active,
}

/// Tilt-driven gravity source.
///
/// Starts `Inactive` because reading orientation sensors needs a user-granted
/// permission on some platforms. `activate` is one-way: there is no return to
/// `Inactive` within a session.
#[derive(Debug, Clone)]
pub struct TiltGravity {
    state: TiltState,
    gravity: Vec2,
}

impl TiltGravity {
    pub fn new() -> Self {
        Self {
            state: TiltState::Inactive,
            gravity: Vec2::ZERO,
        }
    }

    /// Transition to `Active`. Returns true only on the actual transition;
    /// repeated calls are no-ops.
    pub fn activate(&mut self) -> bool {
        if self.state == TiltState::Active {
            return false;
        }
        self.state = TiltState::Active;
        true
    }

    pub fn state(&self) -> TiltState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TiltState::Active
    }

    /// Feed one orientation sample (degrees). Ignored while inactive.
    pub fn sample(&mut self, front_back: f32, left_right: f32) {
        if self.state == TiltState::Active {
            self.gravity = gravity_from_tilt(front_back, left_right);
        }
    }

    /// Current gravity in g-units, components in [-GRAVITY_MAX, GRAVITY_MAX]
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }
}

impl Default for TiltGravity {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_device_is_weightless() {
        assert_eq!(gravity_from_tilt(0.0, 0.0), Vec2::ZERO);
    }

    #[test]
    fn test_full_tilt_saturates_one_axis() {
        assert_eq!(gravity_from_tilt(45.0, 0.0), Vec2::new(0.0, 0.5));
        assert_eq!(gravity_from_tilt(0.0, 45.0), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_overtilt_clamps() {
        assert_eq!(gravity_from_tilt(-90.0, -90.0), Vec2::new(-0.5, -0.5));
        assert_eq!(gravity_from_tilt(180.0, 90.0), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_half_tilt_is_linear() {
        let g = gravity_from_tilt(22.5, -22.5);
        assert!((g.y - 0.25).abs() < 1e-6);
        assert!((g.x + 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_activation_happens_once() {
        let mut tilt = TiltGravity::new();
        assert_eq!(tilt.state(), TiltState::Inactive);
        assert!(tilt.activate());
        assert!(!tilt.activate());
        assert!(!tilt.activate());
        assert_eq!(tilt.state(), TiltState::Active);
    }

    #[test]
    fn test_samples_ignored_while_inactive() {
        let mut tilt = TiltGravity::new();
        tilt.sample(45.0, 45.0);
        assert_eq!(tilt.gravity(), Vec2::ZERO);

        tilt.activate();
        tilt.sample(45.0, 45.0);
        assert_eq!(tilt.gravity(), Vec2::new(0.5, 0.5));
    }

    proptest! {
        // Clamping law over the full sensor ranges and well past them
        #[test]
        fn test_gravity_always_in_range(
            front_back in -720.0f32..720.0,
            left_right in -720.0f32..720.0,
        ) {
            let g = gravity_from_tilt(front_back, left_right);
            prop_assert!(g.x >= -0.5 && g.x <= 0.5);
            prop_assert!(g.y >= -0.5 && g.y <= 0.5);
        }
    }
}
