// Renderer that draws the particle field onto a 2d canvas context obtained
// from a <canvas> element in the page.

use crate::color::Color;
use crate::error::SetupError;
use crate::field::Viewport;
use crate::surface::Surface;
use std::f64::consts::PI;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    pub context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Grabs the 2d context from the canvas; fails if the canvas refuses one
    pub fn new(canvas: &HtmlCanvasElement, canvas_id: &str) -> Result<Self, SetupError> {
        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(|| SetupError::NoContext2d(canvas_id.to_owned()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SetupError::NoContext2d(canvas_id.to_owned()))?;

        Ok(CanvasSurface { context })
    }

    fn reset_effects(&self) {
        self.context.set_global_alpha(1.0);
        self.context.set_shadow_blur(0.0);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        let [width, height] = viewport.extent();
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color, opacity: f64, glow: f64) {
        let style = color.to_css(1.0);
        self.context.begin_path();
        self.context.set_fill_style(&JsValue::from_str(&style));
        self.context.set_global_alpha(opacity);
        self.context.set_shadow_blur(glow);
        self.context.set_shadow_color(&style);
        if let Err(e) = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0) {
            warn!(?e, radius, "skipping particle the canvas refused to draw");
            self.reset_effects();
            return;
        }
        self.context.fill();
        self.reset_effects();
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, opacity: f64, width: f64) {
        // Line alpha is the color's own alpha times the connection opacity
        self.context.begin_path();
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css(1.0)));
        self.context.set_global_alpha(opacity);
        self.context.set_line_width(width);
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
        self.reset_effects();
    }
}
