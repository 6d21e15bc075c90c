//! Floating menu items
//!
//! Each item is a fixed-size rectangular body carrying a label. Bodies are
//! created once at startup and never destroyed during a session.

use glam::Vec2;
use rand::Rng;
use rapier2d::prelude::*;

use crate::PhysicsTuning;
use crate::consts::SCATTER_MARGIN;

/// Description of an item to spawn
#[derive(Debug, Clone)]
pub struct ItemSpec {
    /// Display string rendered on the plaque
    pub label: String,
    /// Half extents of the rectangle in pixels
    pub half_extents: Vec2,
}

impl ItemSpec {
    pub fn new(label: impl Into<String>, tuning: &PhysicsTuning) -> Self {
        Self {
            label: label.into(),
            half_extents: Vec2::new(tuning.item_width / 2.0, tuning.item_height / 2.0),
        }
    }
}

/// A spawned floating item: its body handle plus presentation data
#[derive(Debug, Clone)]
pub struct FloatingItem {
    pub label: String,
    pub half_extents: Vec2,
    pub body: RigidBodyHandle,
}

impl FloatingItem {
    /// True if `point` (world space) lies inside the item's rectangle
    pub fn contains_point(&self, bodies: &RigidBodySet, point: Vec2) -> bool {
        let Some(body) = bodies.get(self.body) else {
            return false;
        };
        let local = body
            .position()
            .inverse_transform_point(&point![point.x, point.y]);
        local.x.abs() <= self.half_extents.x && local.y.abs() <= self.half_extents.y
    }
}

/// Scatter `n` spawn positions inside the viewport, keeping a margin from the
/// edges. Viewports narrower than twice the margin collapse to the center
/// line on that axis.
pub fn scatter_positions<R: Rng>(rng: &mut R, width: f32, height: f32, n: usize) -> Vec<Vec2> {
    (0..n)
        .map(|_| {
            let x = if width > 2.0 * SCATTER_MARGIN {
                rng.random_range(SCATTER_MARGIN..width - SCATTER_MARGIN)
            } else {
                width / 2.0
            };
            let y = if height > 2.0 * SCATTER_MARGIN {
                rng.random_range(SCATTER_MARGIN..height - SCATTER_MARGIN)
            } else {
                height / 2.0
            };
            Vec2::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_scatter_respects_margin() {
        let mut rng = Pcg32::seed_from_u64(7);
        let positions = scatter_positions(&mut rng, 800.0, 600.0, 50);
        assert_eq!(positions.len(), 50);
        for p in positions {
            assert!(p.x >= SCATTER_MARGIN && p.x <= 800.0 - SCATTER_MARGIN);
            assert!(p.y >= SCATTER_MARGIN && p.y <= 600.0 - SCATTER_MARGIN);
        }
    }

    #[test]
    fn test_scatter_degenerate_viewport_centers() {
        let mut rng = Pcg32::seed_from_u64(7);
        let positions = scatter_positions(&mut rng, 150.0, 600.0, 5);
        for p in positions {
            assert_eq!(p.x, 75.0);
            assert!(p.y >= SCATTER_MARGIN && p.y <= 600.0 - SCATTER_MARGIN);
        }
    }

    #[test]
    fn test_scatter_is_seed_deterministic() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        assert_eq!(
            scatter_positions(&mut a, 800.0, 600.0, 5),
            scatter_positions(&mut b, 800.0, 600.0, 5)
        );
    }

    #[test]
    fn test_item_spec_half_extents_from_tuning() {
        let spec = ItemSpec::new("深煎りブレンド", &PhysicsTuning::default());
        assert_eq!(spec.half_extents, Vec2::new(100.0, 30.0));
    }
}
