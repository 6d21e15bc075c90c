//! Full-window canvas renderer

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::sprite::LabelSprite;
use crate::sim::World;

/// Page background, matching the body style
const BACKGROUND: &str = "#1a1a1a";

/// Owns the display canvas and its 2D context
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            dpr: 1.0,
        })
    }

    /// Match the canvas backing store to the reported viewport exactly,
    /// scaled by the device pixel ratio
    pub fn resize(&mut self, width: f32, height: f32, dpr: f64) {
        self.dpr = dpr;
        self.canvas.set_width((width as f64 * dpr) as u32);
        self.canvas.set_height((height as f64 * dpr) as u32);
    }

    /// Clear and draw every item at its body's pose. `sprites` is indexed in
    /// item spawn order.
    pub fn draw(&self, world: &World, sprites: &[LabelSprite]) -> Result<(), JsValue> {
        let bounds = world.bounds();
        self.ctx
            .set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0)?;
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx
            .fill_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);

        for (item, sprite) in world.items().iter().zip(sprites) {
            let (pos, angle) = world.item_pose(item);
            self.draw_sprite(sprite, pos, angle)?;
        }
        Ok(())
    }

    fn draw_sprite(&self, sprite: &LabelSprite, pos: Vec2, angle: f32) -> Result<(), JsValue> {
        self.ctx.save();
        self.ctx.translate(pos.x as f64, pos.y as f64)?;
        self.ctx.rotate(angle as f64)?;
        self.ctx.draw_image_with_html_canvas_element(
            sprite.canvas(),
            -sprite.width() / 2.0,
            -sprite.height() / 2.0,
        )?;
        self.ctx.restore();
        Ok(())
    }
}
