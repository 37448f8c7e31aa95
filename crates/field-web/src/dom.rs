use anyhow::anyhow;
use field_core::SurfaceMetrics;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("#{id} is not a canvas: {:?}", e))
}

/// Full-viewport logical size and the current device pixel ratio.
pub fn viewport_metrics(window: &web::Window) -> SurfaceMetrics {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    SurfaceMetrics::new(
        Vec2::new(w as f32, h as f32),
        window.device_pixel_ratio() as f32,
    )
}

#[inline]
pub fn reduced_motion_query(window: &web::Window) -> Option<web::MediaQueryList> {
    window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}
