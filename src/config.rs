//! Menu content and physics tuning
//!
//! The page is data-driven: labels and feel constants come from a JSON
//! document rather than code. A default menu ships embedded; the page can
//! override it with a `<script type="application/json" id="menu-config">`
//! block.

use serde::{Deserialize, Serialize};

/// Default menu document, embedded at build time
pub const DEFAULT_MENU_JSON: &str = include_str!("../menu.json");

/// Physics feel constants for the floating items
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Bounciness of each item (0 = dead stop, 1 = perfect bounce)
    pub restitution: f32,
    /// Air damping as a per-tick velocity fraction (higher = thicker fluid)
    pub air_damping: f32,
    /// Drag spring stiffness (soft constraint, so items trail the pointer)
    pub drag_stiffness: f32,
    /// Item plaque width in pixels
    pub item_width: f32,
    /// Item plaque height in pixels
    pub item_height: f32,
    /// Boundary wall thickness in pixels
    pub wall_thickness: f32,
    /// Acceleration in px/s² for one g-unit of gravity
    pub gravity_px: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            restitution: 0.6,
            air_damping: 0.05,
            drag_stiffness: 0.2,
            item_width: 200.0,
            item_height: 60.0,
            wall_thickness: 100.0,
            gravity_px: 1600.0,
        }
    }
}

/// Menu content plus tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Label strings, one floating item per entry
    pub items: Vec<String>,
    /// Physics feel constants
    #[serde(default)]
    pub physics: PhysicsTuning,
}

impl Default for MenuConfig {
    fn default() -> Self {
        // The embedded document is part of the crate; a parse failure here
        // is a build defect, not a runtime condition.
        serde_json::from_str(DEFAULT_MENU_JSON).expect("embedded menu.json is valid")
    }
}

impl MenuConfig {
    /// Parse a config document, falling back to the embedded default on error
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Invalid menu config, using default: {err}");
                Self::default()
            }
        }
    }

    /// Load the page-provided override from the DOM, if present (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let override_json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("menu-config"))
            .and_then(|el| el.text_content());

        match override_json {
            Some(json) => {
                log::info!("Using page-provided menu config");
                Self::from_json_or_default(&json)
            }
            None => Self::default(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_menu_parses() {
        let config = MenuConfig::default();
        assert_eq!(config.items.len(), 5);
        assert_eq!(config.items[0], "本日、在庫あり");
        assert!((config.physics.restitution - 0.6).abs() < f32::EPSILON);
        assert!((config.physics.air_damping - 0.05).abs() < f32::EPSILON);
        assert!((config.physics.drag_stiffness - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let config = MenuConfig::from_json_or_default("not json at all");
        assert_eq!(config.items.len(), 5);
    }

    #[test]
    fn test_partial_tuning_uses_defaults() {
        let config =
            MenuConfig::from_json_or_default(r#"{"items":["a"],"physics":{"restitution":0.9}}"#);
        assert_eq!(config.items, vec!["a"]);
        assert!((config.physics.restitution - 0.9).abs() < f32::EPSILON);
        // Unspecified fields keep their defaults
        assert!((config.physics.item_width - 200.0).abs() < f32::EPSILON);
    }
}
