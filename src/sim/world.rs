//! Physics world: boundary walls, floating items, fixed-timestep stepping
//!
//! The world owns the whole rapier context as one explicitly constructed
//! object; nothing here lives in globals. All dynamics (integration, contact
//! resolution, damping, restitution) are rapier's job.

use glam::Vec2;
use rapier2d::prelude::*;

use super::drag::PointerDrag;
use super::item::{FloatingItem, ItemSpec};
use crate::PhysicsTuning;
use crate::consts::{GRAVITY_MAX, SIM_DT};

/// Viewport dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// The simulation context: rapier state, four boundary walls, floating items
pub struct World {
    tuning: PhysicsTuning,
    bounds: Bounds,
    /// Gravity in g-units, components always within ±GRAVITY_MAX
    gravity: Vec2,
    items: Vec<FloatingItem>,
    walls: [RigidBodyHandle; 4],

    bodies: RigidBodySet,
    colliders: ColliderSet,
    integration: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
}

impl World {
    pub fn new(bounds: Bounds, tuning: PhysicsTuning) -> Self {
        let mut integration = IntegrationParameters::default();
        integration.dt = SIM_DT;

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let walls = build_walls(&mut bodies, &mut colliders, bounds, tuning.wall_thickness);

        Self {
            tuning,
            bounds,
            gravity: Vec2::ZERO,
            items: Vec::new(),
            walls,
            bodies,
            colliders,
            integration,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn items(&self) -> &[FloatingItem] {
        &self.items
    }

    /// Current gravity in g-units
    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    /// Set gravity in g-units; components are clamped to the legal range
    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity.clamp(Vec2::splat(-GRAVITY_MAX), Vec2::splat(GRAVITY_MAX));
    }

    /// Replace the four boundary walls with ones sized to the new viewport.
    /// Floating items are untouched; from the caller's perspective the
    /// swap is a single call with no zero-wall state observable outside it.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.bounds = Bounds { width, height };
        for handle in self.walls {
            self.bodies.remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            );
        }
        self.walls = build_walls(
            &mut self.bodies,
            &mut self.colliders,
            self.bounds,
            self.tuning.wall_thickness,
        );
    }

    /// Create a floating item at `pos` and add it to the world. Positions
    /// outside the viewport are allowed; the next physics tick resolves them
    /// against the walls. Returns the item index, or None for an empty label.
    pub fn spawn_item(&mut self, spec: ItemSpec, pos: Vec2) -> Option<usize> {
        if spec.label.is_empty() {
            log::warn!("skipping menu item with empty label");
            return None;
        }

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![pos.x, pos.y])
            // Per-tick damping fraction mapped to rapier's per-second damping
            .linear_damping(self.tuning.air_damping / SIM_DT)
            .angular_damping(self.tuning.air_damping / SIM_DT)
            .build();
        let handle = self.bodies.insert(body);

        // Max combine rule: walls have zero restitution and must not halve
        // the items' bounciness
        let collider = ColliderBuilder::cuboid(spec.half_extents.x, spec.half_extents.y)
            .restitution(self.tuning.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        self.items.push(FloatingItem {
            label: spec.label,
            half_extents: spec.half_extents,
            body: handle,
        });
        Some(self.items.len() - 1)
    }

    /// Topmost item under `point`, if any (last spawned draws last)
    pub fn item_at_point(&self, point: Vec2) -> Option<&FloatingItem> {
        self.items
            .iter()
            .rev()
            .find(|item| item.contains_point(&self.bodies, point))
    }

    /// Pick the item under `point` for dragging: its body handle plus the
    /// grab point in the body's local frame
    pub fn pick(&self, point: Vec2) -> Option<(RigidBodyHandle, Vec2)> {
        let item = self.item_at_point(point)?;
        let body = self.bodies.get(item.body)?;
        let local = body
            .position()
            .inverse_transform_point(&point![point.x, point.y]);
        Some((item.body, Vec2::new(local.x, local.y)))
    }

    /// Pose of an item's body: (position, rotation in radians)
    pub fn item_pose(&self, item: &FloatingItem) -> (Vec2, f32) {
        match self.bodies.get(item.body) {
            Some(body) => {
                let t = body.translation();
                (Vec2::new(t.x, t.y), body.rotation().angle())
            }
            None => (Vec2::ZERO, 0.0),
        }
    }

    /// Advance the simulation by one fixed timestep, applying the drag
    /// constraint first
    pub fn step(&mut self, drag: &PointerDrag) {
        drag.apply(&mut self.bodies, self.tuning.drag_stiffness, SIM_DT);

        let gravity = vector![
            self.gravity.x * self.tuning.gravity_px,
            self.gravity.y * self.tuning.gravity_px
        ];
        self.pipeline.step(
            &gravity,
            &self.integration,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }
}

/// Build the four boundary walls for `bounds`. Wall centers sit half a
/// thickness outside each viewport edge, so the frame encloses the viewport
/// with no gap wider than the thickness.
fn build_walls(
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    bounds: Bounds,
    thickness: f32,
) -> [RigidBodyHandle; 4] {
    let (w, h, t) = (bounds.width, bounds.height, thickness);
    // (center x, center y, half width, half height)
    let frame = [
        (w / 2.0, -t / 2.0, w / 2.0, t / 2.0),    // top
        (w / 2.0, h + t / 2.0, w / 2.0, t / 2.0), // bottom
        (w + t / 2.0, h / 2.0, t / 2.0, h / 2.0), // right
        (-t / 2.0, h / 2.0, t / 2.0, h / 2.0),    // left
    ];
    frame.map(|(cx, cy, hx, hy)| {
        let body = RigidBodyBuilder::fixed().translation(vector![cx, cy]).build();
        let handle = bodies.insert(body);
        let collider = ColliderBuilder::cuboid(hx, hy).build();
        colliders.insert_with_parent(collider, handle, bodies);
        handle
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PointerDrag;

    fn test_world() -> World {
        World::new(
            Bounds {
                width: 800.0,
                height: 600.0,
            },
            PhysicsTuning::default(),
        )
    }

    fn spawn(world: &mut World, label: &str, pos: Vec2) -> usize {
        let spec = ItemSpec::new(label, &PhysicsTuning::default());
        world.spawn_item(spec, pos).unwrap()
    }

    #[test]
    fn test_new_world_has_four_walls() {
        let world = test_world();
        assert_eq!(world.walls.len(), 4);
        assert_eq!(world.bodies.len(), 4);
        assert!(world.items().is_empty());
    }

    #[test]
    fn test_walls_enclose_viewport() {
        let world = test_world();
        let t = world.tuning.wall_thickness;
        let expected = [
            (400.0, -t / 2.0),
            (400.0, 600.0 + t / 2.0),
            (800.0 + t / 2.0, 300.0),
            (-t / 2.0, 300.0),
        ];
        for (handle, (cx, cy)) in world.walls.iter().zip(expected) {
            let body = &world.bodies[*handle];
            assert!(body.is_fixed());
            assert!((body.translation().x - cx).abs() < 1e-4);
            assert!((body.translation().y - cy).abs() < 1e-4);
        }
    }

    #[test]
    fn test_resize_replaces_walls_and_keeps_items() {
        let mut world = test_world();
        spawn(&mut world, "季節のタルト", Vec2::new(400.0, 300.0));
        spawn(&mut world, "水出しアイス", Vec2::new(200.0, 200.0));
        let old_walls = world.walls;

        world.resize(1024.0, 768.0);

        assert_eq!(world.items().len(), 2);
        assert_eq!(world.walls.len(), 4);
        // 4 walls + 2 items, the old walls are gone
        assert_eq!(world.bodies.len(), 6);
        for old in old_walls {
            assert!(world.bodies.get(old).is_none());
        }

        let t = world.tuning.wall_thickness;
        let top = &world.bodies[world.walls[0]];
        assert!((top.translation().x - 512.0).abs() < 1e-4);
        assert!((top.translation().y - (-t / 2.0)).abs() < 1e-4);
        let right = &world.bodies[world.walls[2]];
        assert!((right.translation().x - (1024.0 + t / 2.0)).abs() < 1e-4);

        // Items still step normally after the swap
        world.set_gravity(Vec2::new(0.0, 0.5));
        let drag = PointerDrag::new();
        for _ in 0..10 {
            world.step(&drag);
        }
    }

    #[test]
    fn test_spawn_rejects_empty_label() {
        let mut world = test_world();
        let spec = ItemSpec::new("", &PhysicsTuning::default());
        assert!(world.spawn_item(spec, Vec2::new(400.0, 300.0)).is_none());
        assert!(world.items().is_empty());
    }

    #[test]
    fn test_spawned_item_carries_tuning() {
        let mut world = test_world();
        let idx = spawn(&mut world, "深煎りブレンド", Vec2::new(400.0, 300.0));
        let item = &world.items()[idx];

        let body = &world.bodies[item.body];
        assert!((body.linear_damping() - 3.0).abs() < 1e-4);

        let collider_handle = body.colliders()[0];
        let collider = &world.colliders[collider_handle];
        assert!((collider.restitution() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_is_clamped() {
        let mut world = test_world();
        world.set_gravity(Vec2::new(2.0, -3.0));
        assert_eq!(world.gravity(), Vec2::new(0.5, -0.5));
    }

    #[test]
    fn test_gravity_moves_items() {
        let mut world = test_world();
        spawn(&mut world, "本日、在庫あり", Vec2::new(400.0, 100.0));
        world.set_gravity(Vec2::new(0.0, 0.5));

        let drag = PointerDrag::new();
        for _ in 0..30 {
            world.step(&drag);
        }
        let (pos, _) = world.item_pose(&world.items()[0]);
        assert!(pos.y > 100.0, "item should fall, got {pos}");
    }

    #[test]
    fn test_zero_gravity_leaves_items_at_rest() {
        let mut world = test_world();
        spawn(&mut world, "本日、在庫あり", Vec2::new(400.0, 300.0));

        let drag = PointerDrag::new();
        for _ in 0..60 {
            world.step(&drag);
        }
        let (pos, _) = world.item_pose(&world.items()[0]);
        assert!((pos - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn test_out_of_bounds_spawn_is_pushed_back() {
        let mut world = test_world();
        // Center just outside the left edge, overlapping the wall
        spawn(&mut world, "森のスコーン", Vec2::new(-20.0, 300.0));

        let drag = PointerDrag::new();
        for _ in 0..120 {
            world.step(&drag);
        }
        let (pos, _) = world.item_pose(&world.items()[0]);
        assert!(pos.x > -20.0, "item should be pushed inward, got {pos}");
    }

    #[test]
    fn test_item_at_point_prefers_topmost() {
        let mut world = test_world();
        spawn(&mut world, "深煎りブレンド", Vec2::new(400.0, 300.0));
        spawn(&mut world, "季節のタルト", Vec2::new(400.0, 300.0));

        let hit = world.item_at_point(Vec2::new(400.0, 300.0)).unwrap();
        assert_eq!(hit.label, "季節のタルト");
        assert!(world.item_at_point(Vec2::new(10.0, 10.0)).is_none());
    }
}
