use crate::foundation::core::Affine;
use crate::foundation::error::{ReelError, ReelResult};

/// Eight-petal pinwheel drawn behind the card strip and the ending text.
pub const WATERMARK_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 480 480" width="480" height="480"><path d="m240 240 160-80v-.7A79.8 79.8 0 0 0 320.7 80h-.7l-80 160ZM240 240 160 80h-.7A79.8 79.8 0 0 0 80 159.3v.7l160 80ZM240 240l80 160h.7a79.8 79.8 0 0 0 79.3-79.3v-.7l-160-80ZM240 240 80 320v.7a79.8 79.8 0 0 0 79.3 79.3h.7l80-160ZM240 240l169.7 56.6.5-.5a79.8 79.8 0 0 0 0-112.2l-.5-.5L240 240ZM240 240l56.6-169.7-.5-.5a79.8 79.8 0 0 0-112.2 0l-.5.5L240 240ZM240 240l-56.6 169.7.5.5a79.8 79.8 0 0 0 112.2 0l.5-.5L240 240ZM240 240 70.3 183.4l-.5.5a79.8 79.8 0 0 0 0 112.2l.5.5L240 240Z" fill="gray"/></svg>"#;

/// Parse [`WATERMARK_SVG`].
pub fn parse_watermark() -> ReelResult<usvg::Tree> {
    parse_svg(WATERMARK_SVG.as_bytes())
}

/// Parse SVG bytes with default options.
pub fn parse_svg(bytes: &[u8]) -> ReelResult<usvg::Tree> {
    usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| ReelError::validation(format!("svg parse failed: {e}")))
}

/// Raster size for drawing `tree` under `transform`, plus the transform to draw that raster with.
///
/// Rasterizing at the drawn scale keeps the watermark sharp when the preview is scaled.
pub fn svg_raster_params(tree: &usvg::Tree, transform: Affine) -> ReelResult<(u32, u32, Affine)> {
    fn to_px(v: f32) -> ReelResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ReelError::evaluation("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let base_w = to_px(size.width())?;
    let base_h = to_px(size.height())?;

    let [a, b, c, d, _e, _f] = transform.as_coeffs();
    let sx = (a * a + b * b).sqrt().max(1e-6);
    let sy = (c * c + d * d).sqrt().max(1e-6);

    let w = (f64::from(base_w) * sx).ceil().max(1.0) as u32;
    let h = (f64::from(base_h) * sy).ceil().max(1.0) as u32;

    const MAX_DIM: u32 = 16_384;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(ReelError::evaluation(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let inv = Affine::scale_non_uniform(1.0 / sx, 1.0 / sy);
    Ok((w, h, transform * inv))
}

/// Premultiplied RGBA8 raster of `tree` stretched to `width x height`.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> ReelResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ReelError::evaluation("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/render/watermark.rs"]
mod tests;
