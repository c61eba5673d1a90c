use glam::Vec2;
use starry_core::{RenderTarget, Rgb, Stroke};
use wasm_bindgen::JsCast;
use web_sys as web;

/// The visible canvas. Never cleared by the loop; trails come from `fade`.
pub struct CanvasTarget {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasTarget {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx: web::CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
            .dyn_into()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        Ok(Self { canvas, ctx })
    }

    /// Paint the whole surface opaque, dropping accumulated trails.
    pub fn clear(&mut self, color: Rgb) {
        self.ctx.set_fill_style_str(&css_rgba(color, 1.0));
        let size = self.size();
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }
}

impl RenderTarget for CanvasTarget {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn fade(&mut self, color: Rgb, alpha: f32) {
        self.ctx.set_fill_style_str(&css_rgba(color, alpha));
        let size = self.size();
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn stroke(&mut self, stroke: &Stroke) {
        if stroke.alpha <= 0.0 || stroke.width <= 0.0 {
            return;
        }
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&css_rgba(stroke.color, stroke.alpha));
        ctx.set_line_width(stroke.line_width() as f64);
        ctx.begin_path();
        ctx.move_to(stroke.from.x as f64, stroke.from.y as f64);
        ctx.quadratic_curve_to(
            stroke.control.x as f64,
            stroke.control.y as f64,
            stroke.to.x as f64,
            stroke.to.y as f64,
        );
        ctx.stroke();
    }
}

#[inline]
pub fn css_rgba(c: Rgb, alpha: f32) -> String {
    format!("rgba({},{},{},{:.3})", c.r, c.g, c.b, alpha.clamp(0.0, 1.0))
}
