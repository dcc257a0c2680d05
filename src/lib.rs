pub mod config;
pub mod ir;
pub mod layout;
pub mod measure;
pub mod svg;

use wasm_bindgen::prelude::*;

use ir::{Diagram, DiagramError};
use layout::LayoutEngine;
use svg::SvgRenderer;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Parse a JSON diagram, route its connections and render SVG.
pub fn render_json(input: &str) -> Result<String, DiagramError> {
    let diagram = Diagram::from_json(input)?;
    let layout = LayoutEngine::for_diagram(&diagram).layout(&diagram);
    Ok(SvgRenderer::default().render(&diagram, &layout))
}

/// Render a JSON diagram to SVG
#[wasm_bindgen(js_name = "diagramToSvg")]
pub fn render_diagram(json: &str) -> Result<String, String> {
    render_json(json).map_err(|e| e.to_string())
}
