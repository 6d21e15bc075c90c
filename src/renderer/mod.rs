//! Canvas 2D presentation
//!
//! Label plaques are rasterized once to offscreen canvases at startup; each
//! frame just blits them at their bodies' poses.

pub mod canvas;
pub mod sprite;

pub use canvas::CanvasRenderer;
pub use sprite::LabelSprite;
