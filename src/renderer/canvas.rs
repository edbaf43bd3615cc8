//! Canvas 2D backdrop renderer
//!
//! Draws each particle as a blurred, gradient-filled disc with additive
//! ("lighter") compositing so overlaps brighten.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::backdrop::particle::BACKGROUND;
use crate::backdrop::{Particle, ParticleField};

pub struct BackdropRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl BackdropRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        let renderer = Self { canvas, ctx };
        renderer.ctx.set_global_composite_operation("lighter")?;
        Ok(renderer)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Match the canvas to the viewport. Resizing resets context state, so
    /// the blend mode is restored.
    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.ctx.set_global_composite_operation("lighter")
    }

    /// One-off diagonal background fill
    pub fn paint_background(&self) -> Result<(), JsValue> {
        let (w, h) = self.size();
        let (w, h) = (w as f64, h as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        let grd = self.ctx.create_linear_gradient(0.0, h, w, 0.0);
        grd.add_color_stop(0.0, BACKGROUND[0])?;
        grd.add_color_stop(1.0, BACKGROUND[1])?;
        self.ctx.set_fill_style_canvas_gradient(&grd);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        Ok(())
    }

    fn draw_particle(&self, p: &Particle) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.set_filter(&format!("blur({}px)", p.blur));

        let g = p.gradient;
        let grd = self
            .ctx
            .create_linear_gradient(g.x as f64, g.y as f64, g.z as f64, g.w as f64);
        grd.add_color_stop(0.0, p.colors.start)?;
        grd.add_color_stop(1.0, p.colors.end)?;
        self.ctx.set_fill_style_canvas_gradient(&grd);

        self.ctx.arc(
            p.pos.x as f64,
            p.pos.y as f64,
            p.radius as f64,
            0.0,
            std::f64::consts::TAU,
        )?;
        self.ctx.fill();
        self.ctx.close_path();
        Ok(())
    }

    /// Clear and redraw the whole field
    pub fn draw(&self, field: &ParticleField) -> Result<(), JsValue> {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
        for particle in &field.particles {
            self.draw_particle(particle)?;
        }
        Ok(())
    }
}
