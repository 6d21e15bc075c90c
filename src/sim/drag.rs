//! Pointer-to-physics input bridge
//!
//! A press picks whichever item the pointer overlaps; while held, the grab
//! point is pulled toward the pointer by a soft spring so dragged items feel
//! springy rather than rigidly pinned. No state machine beyond grabbed/empty.

use glam::Vec2;
use rapier2d::prelude::*;

use super::world::World;

/// An active grab on a floating item
#[derive(Debug, Clone, Copy)]
struct Grab {
    body: RigidBodyHandle,
    /// Grab point in the body's local frame
    anchor: Vec2,
}

/// Continuous pass-through of pointer position to the drag constraint
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerDrag {
    grab: Option<Grab>,
    target: Vec2,
}

impl PointerDrag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag if `point` overlaps an item. Returns whether a grab
    /// started.
    pub fn press(&mut self, world: &World, point: Vec2) -> bool {
        self.target = point;
        self.grab = world
            .pick(point)
            .map(|(body, anchor)| Grab { body, anchor });
        self.grab.is_some()
    }

    /// Track the pointer while pressed
    pub fn move_to(&mut self, point: Vec2) {
        self.target = point;
    }

    /// End the drag (pointer-up)
    pub fn release(&mut self) {
        self.grab = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    /// Pull the grabbed point toward the pointer. Soft constraint: close a
    /// `stiffness` fraction of the gap per step, shedding existing momentum
    /// so the item trails the pointer instead of orbiting it.
    pub(crate) fn apply(&self, bodies: &mut RigidBodySet, stiffness: f32, dt: f32) {
        let Some(grab) = self.grab else { return };
        let Some(body) = bodies.get_mut(grab.body) else {
            return;
        };

        let anchor = body
            .position()
            .transform_point(&point![grab.anchor.x, grab.anchor.y]);
        let gap = vector![self.target.x - anchor.x, self.target.y - anchor.y];
        let desired = gap * (stiffness / dt);
        let impulse = (desired - *body.linvel()) * (body.mass() * stiffness);
        body.apply_impulse_at_point(impulse, anchor, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PhysicsTuning;
    use crate::sim::item::ItemSpec;
    use crate::sim::world::Bounds;

    fn world_with_item(pos: Vec2) -> World {
        let tuning = PhysicsTuning::default();
        let mut world = World::new(
            Bounds {
                width: 800.0,
                height: 600.0,
            },
            tuning.clone(),
        );
        world
            .spawn_item(ItemSpec::new("森のスコーン", &tuning), pos)
            .unwrap();
        world
    }

    #[test]
    fn test_press_on_empty_space_grabs_nothing() {
        let world = world_with_item(Vec2::new(400.0, 300.0));
        let mut drag = PointerDrag::new();
        assert!(!drag.press(&world, Vec2::new(50.0, 50.0)));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_press_on_item_grabs_it() {
        let world = world_with_item(Vec2::new(400.0, 300.0));
        let mut drag = PointerDrag::new();
        assert!(drag.press(&world, Vec2::new(420.0, 310.0)));
        assert!(drag.is_dragging());

        drag.release();
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drag_pulls_item_toward_pointer() {
        let start = Vec2::new(400.0, 300.0);
        let mut world = world_with_item(start);
        let mut drag = PointerDrag::new();
        assert!(drag.press(&world, start));

        let target = Vec2::new(550.0, 300.0);
        drag.move_to(target);
        for _ in 0..120 {
            world.step(&drag);
        }

        let item = &world.items()[0];
        let (pos, _) = world.item_pose(item);
        assert!(
            target.distance(pos) < target.distance(start) / 2.0,
            "item should close on the pointer, got {pos}"
        );
    }

    #[test]
    fn test_released_drag_applies_nothing() {
        let start = Vec2::new(400.0, 300.0);
        let mut world = world_with_item(start);
        let mut drag = PointerDrag::new();
        drag.press(&world, start);
        drag.move_to(Vec2::new(700.0, 300.0));
        drag.release();

        for _ in 0..60 {
            world.step(&drag);
        }
        let (pos, _) = world.item_pose(&world.items()[0]);
        assert!((pos.x - start.x).abs() < 1.0);
    }
}
