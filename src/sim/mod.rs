//! Simulation module
//!
//! Thin orchestration over the rapier2d rigid-body engine:
//! - Explicit world context (no globals), walls replaced wholesale on resize
//! - Tilt-to-gravity mapping with a one-way activation gate
//! - Pointer dragging as a soft spring constraint
//!
//! This module has no rendering or browser dependencies; it compiles and
//! tests natively.

pub mod drag;
pub mod gravity;
pub mod item;
pub mod world;

pub use drag::PointerDrag;
pub use gravity::{TiltGravity, TiltState, gravity_from_tilt};
pub use item::{FloatingItem, ItemSpec, scatter_positions};
pub use world::{Bounds, World};
