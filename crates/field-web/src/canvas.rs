use anyhow::anyhow;
use field_core::{FieldError, Painter, Rgba, SurfaceMetrics, SurfaceTarget};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Canvas 2D implementation of the core drawing and surface seams.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let attrs = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&attrs, &"alpha".into(), &JsValue::TRUE);
        let _ = js_sys::Reflect::set(&attrs, &"desynchronized".into(), &JsValue::TRUE);
        let ctx = canvas
            .get_context_with_context_options("2d", &attrs)
            .map_err(|e| anyhow!("getContext failed: {:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("unexpected context type: {:?}", e))?;
        Ok(Self { canvas, ctx })
    }
}

fn surface_err(e: JsValue) -> FieldError {
    FieldError::Surface(format!("{:?}", e))
}

impl SurfaceTarget for CanvasSurface {
    fn apply(&mut self, metrics: &SurfaceMetrics) -> field_core::error::Result<()> {
        let (w_px, h_px) = metrics.backing_size();
        // Resizing the backing store also resets the context transform.
        self.canvas.set_width(w_px);
        self.canvas.set_height(h_px);
        let style = self.canvas.style();
        style
            .set_property("width", &format!("{}px", metrics.logical.x))
            .map_err(surface_err)?;
        style
            .set_property("height", &format!("{}px", metrics.logical.y))
            .map_err(surface_err)?;
        let dpr = metrics.dpr as f64;
        self.ctx
            .set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
            .map_err(surface_err)
    }
}

impl Painter for CanvasSurface {
    fn clear(&mut self, size: Vec2) {
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}
