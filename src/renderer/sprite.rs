//! One-time label plaque rasterization

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// Plaque palette
const WOOD_BASE: &str = "#8d6e63";
const WOOD_GRAIN: &str = "#6d4c41";
const WOOD_BEVEL: &str = "#5d4037";
const LABEL_INK: &str = "#fff8e1";

/// Grain strokes per plaque
const GRAIN_STROKES: usize = 5;

/// A label plaque rasterized once at startup. The backing canvas never
/// changes afterwards; physics updates only move it around.
pub struct LabelSprite {
    canvas: HtmlCanvasElement,
    width: f64,
    height: f64,
}

impl LabelSprite {
    /// Rasterize `label` onto a fresh offscreen canvas. `seed` varies the
    /// wood grain from plaque to plaque.
    pub fn rasterize(
        document: &Document,
        label: &str,
        width: f64,
        height: f64,
        seed: u64,
    ) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        // Wood base
        ctx.set_fill_style_str(WOOD_BASE);
        ctx.fill_rect(0.0, 0.0, width, height);

        // Grain: a few bezier wanders across the plaque, seeded so each
        // label gets its own pattern
        let mut rng = Pcg32::seed_from_u64(seed);
        ctx.set_stroke_style_str(WOOD_GRAIN);
        ctx.set_line_width(2.0);
        for _ in 0..GRAIN_STROKES {
            ctx.begin_path();
            ctx.move_to(0.0, rng.random_range(0.0..height));
            ctx.bezier_curve_to(
                width / 3.0,
                rng.random_range(0.0..height),
                2.0 * width / 3.0,
                rng.random_range(0.0..height),
                width,
                rng.random_range(0.0..height),
            );
            ctx.stroke();
        }

        // Bevel border
        ctx.set_stroke_style_str(WOOD_BEVEL);
        ctx.set_line_width(4.0);
        ctx.stroke_rect(0.0, 0.0, width, height);

        // Label text, centered
        ctx.set_fill_style_str(LABEL_INK);
        ctx.set_font("24px \"Hiragino Mincho ProN\", serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.fill_text(label, width / 2.0, height / 2.0)?;

        Ok(Self {
            canvas,
            width,
            height,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}
