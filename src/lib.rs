//! Drift Menu - a floating cafe-menu page
//!
//! Core modules:
//! - `sim`: Physics world, floating items, tilt-to-gravity mapping, dragging
//! - `renderer`: Canvas 2D presentation (label plaques rasterized once)
//! - `platform`: Browser capability/permission plumbing for orientation
//! - `config`: Data-driven menu content and physics tuning

pub mod config;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use config::{MenuConfig, PhysicsTuning};

/// Simulation constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, rapier's native rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Tilt angle (degrees) that saturates one gravity axis
    pub const TILT_FULL_ANGLE: f32 = 45.0;
    /// Magnitude cap for each gravity component, in g-units
    pub const GRAVITY_MAX: f32 = 0.5;

    /// Margin kept between scattered items and the viewport edges
    pub const SCATTER_MARGIN: f32 = 100.0;
}
