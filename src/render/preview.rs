//! Storyboard raster of one evaluated frame.
//!
//! Cards, title bars and the overlay badge are drawn as flat placeholder shapes at their
//! evaluated transforms; only the watermark is real artwork. Useful for eyeballing timing, not
//! as final output.

use std::sync::Arc;

use crate::{
    composition::{
        evaluator::{EvaluatedFrame, Evaluator},
        model::CompositionPlan,
    },
    foundation::core::{Affine, FrameIndex, Rgba8Premul, Vec2},
    foundation::error::{ReelError, ReelResult},
    render::watermark::{parse_watermark, rasterize_svg_to_premul_rgba8, svg_raster_params},
};

/// Watermark box edge in composition pixels.
const WATERMARK_SIZE: f64 = 300.0;
const WATERMARK_TOP: f64 = -90.0;
const WATERMARK_OPACITY: f32 = 0.5;
/// Horizontal gap left between neighboring cards.
const CARD_GAP: f64 = 50.0;
const CARD_RADIUS: f64 = 24.0;
const OVERLAY_SIZE: (f64, f64) = (640.0, 96.0);
const OVERLAY_TOP: f64 = 48.0;

/// Final premultiplied RGBA8 frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Always `true` for preview output.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Premultiplied `[r, g, b, a]` at `(x, y)`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4)?.try_into().ok()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Storyboard raster settings.
pub struct PreviewOptions {
    /// Output scale relative to the composition canvas.
    pub scale: f64,
    /// Card placeholder fill.
    pub card_color: Rgba8Premul,
    /// Title, overlay and ending text placeholder fill.
    pub accent_color: Rgba8Premul,
    /// Draw the rotating watermark.
    pub draw_watermark: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            scale: 0.25,
            card_color: Rgba8Premul::from_straight_rgba(0xF5, 0xF5, 0xF5, 255),
            accent_color: Rgba8Premul::from_straight_rgba(0xFB, 0xFF, 0xC2, 255),
            draw_watermark: true,
        }
    }
}

impl PreviewOptions {
    /// `scale` must be finite and positive.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(ReelError::validation("preview scale must be > 0"));
        }
        Ok(())
    }
}

/// Rasterizes storyboard frames. Holds the parsed watermark so repeated frames share it.
pub struct PreviewRenderer {
    watermark: usvg::Tree,
}

impl PreviewRenderer {
    /// Parse the built-in watermark.
    pub fn new() -> ReelResult<Self> {
        Ok(Self {
            watermark: parse_watermark()?,
        })
    }

    #[tracing::instrument(skip(self, plan, opts))]
    /// Evaluate `frame` and rasterize it.
    pub fn render(
        &self,
        plan: &CompositionPlan,
        frame: FrameIndex,
        opts: &PreviewOptions,
    ) -> ReelResult<FrameRGBA> {
        opts.validate()?;
        let eval = Evaluator::eval_frame(plan, frame)?;

        let cfg = &plan.config;
        let canvas = cfg.canvas();
        let width = scaled_dim(canvas.width, opts.scale, "width")?;
        let height = scaled_dim(canvas.height, opts.scale, "height")?;
        let root = Affine::scale(opts.scale);
        let canvas_w = f64::from(canvas.width);
        let canvas_h = f64::from(canvas.height);

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_transform(affine_to_cpu(root));
        set_color(&mut ctx, cfg.theme.background()?);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, canvas_w, canvas_h));

        if opts.draw_watermark && eval.intro.is_none() {
            self.draw_watermark(&mut ctx, root, canvas_w, eval.watermark_rotation_deg)?;
        }

        draw_cards(&mut ctx, root, plan, &eval, opts);
        draw_intro(&mut ctx, root, &eval, canvas_w, canvas_h, opts);
        draw_ending(&mut ctx, root, &eval, plan, canvas_w, canvas_h, opts);
        draw_overlay(&mut ctx, root, &eval, canvas_w, opts);

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(width),
            height: u32::from(height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_watermark(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        root: Affine,
        canvas_w: f64,
        rotation_deg: f64,
    ) -> ReelResult<()> {
        let half = WATERMARK_SIZE / 2.0;
        let view = f64::from(self.watermark.size().width());
        let placement = root
            * Affine::translate(Vec2::new(canvas_w / 2.0, WATERMARK_TOP + half))
            * Affine::rotate(rotation_deg.to_radians())
            * Affine::translate(Vec2::new(-half, -half))
            * Affine::scale(WATERMARK_SIZE / view);

        let (w, h, adjust) = svg_raster_params(&self.watermark, placement)?;
        let rgba = rasterize_svg_to_premul_rgba8(&self.watermark, w, h)?;
        let pixmap = pixmap_from_premul_bytes(&rgba, w, h)?;

        ctx.set_transform(affine_to_cpu(adjust));
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        ctx.push_opacity_layer(WATERMARK_OPACITY);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(w),
            f64::from(h),
        ));
        ctx.pop_layer();
        Ok(())
    }
}

/// One-shot convenience over [`PreviewRenderer`].
pub fn render_preview(
    plan: &CompositionPlan,
    frame: FrameIndex,
    opts: &PreviewOptions,
) -> ReelResult<FrameRGBA> {
    PreviewRenderer::new()?.render(plan, frame, opts)
}

fn draw_cards(
    ctx: &mut vello_cpu::RenderContext,
    root: Affine,
    plan: &CompositionPlan,
    eval: &EvaluatedFrame,
    opts: &PreviewOptions,
) {
    let card_w = (plan.timeline.layout.item_width - CARD_GAP).max(1.0);
    let card_h = f64::from(plan.config.height) * 0.5;
    let top = (f64::from(plan.config.height) - card_h) / 2.0;

    for item in &eval.items {
        let shape = kurbo::RoundedRect::new(0.0, top, card_w, top + card_h, CARD_RADIUS);
        ctx.set_transform(affine_to_cpu(root * item.transform().to_affine()));
        fill_shape(ctx, &shape, opts.card_color, item.opacity as f32);
    }
}

fn draw_intro(
    ctx: &mut vello_cpu::RenderContext,
    root: Affine,
    eval: &EvaluatedFrame,
    canvas_w: f64,
    canvas_h: f64,
    opts: &PreviewOptions,
) {
    let Some(intro) = eval.intro else {
        return;
    };
    // (width, height, resting top, percent offset)
    let bars = [
        (160.0, 160.0, canvas_h * 0.2, intro.logo_offset),
        (1200.0, 140.0, canvas_h * 0.45, intro.title_offset),
        (800.0, 80.0, canvas_h * 0.6, intro.subtitle_offset),
    ];
    for (w, h, rest, offset) in bars {
        let y = rest + h * offset / 100.0;
        let shape = kurbo::RoundedRect::new(
            (canvas_w - w) / 2.0,
            y,
            (canvas_w + w) / 2.0,
            y + h,
            h / 4.0,
        );
        ctx.set_transform(affine_to_cpu(root));
        fill_shape(ctx, &shape, opts.card_color, 1.0);
    }
}

fn draw_ending(
    ctx: &mut vello_cpu::RenderContext,
    root: Affine,
    eval: &EvaluatedFrame,
    plan: &CompositionPlan,
    canvas_w: f64,
    canvas_h: f64,
    opts: &PreviewOptions,
) {
    let Some(ending) = &eval.ending else {
        return;
    };
    let total = plan.ending_text.glyphs().len().max(1) as f64;
    let full_w = canvas_w * 0.5;
    let w = full_w * ending.visible_chars as f64 / total;
    if w <= 0.0 {
        return;
    }
    let x0 = (canvas_w - full_w) / 2.0;
    let y0 = canvas_h / 2.0 - 60.0;
    let shape = kurbo::RoundedRect::new(x0, y0, x0 + w, y0 + 120.0, 16.0);
    ctx.set_transform(affine_to_cpu(root));
    fill_shape(ctx, &shape, opts.card_color, ending.fade as f32);
}

fn draw_overlay(
    ctx: &mut vello_cpu::RenderContext,
    root: Affine,
    eval: &EvaluatedFrame,
    canvas_w: f64,
    opts: &PreviewOptions,
) {
    let Some(overlay) = eval.overlay.filter(|o| o.visible && o.opacity > 0.0) else {
        return;
    };
    let (w, h) = OVERLAY_SIZE;
    let y = OVERLAY_TOP + overlay.offset_y;
    let shape = kurbo::RoundedRect::new((canvas_w - w) / 2.0, y, (canvas_w + w) / 2.0, y + h, h / 2.0);
    ctx.set_transform(affine_to_cpu(root));
    fill_shape(ctx, &shape, opts.accent_color, overlay.opacity as f32);
}

fn fill_shape(
    ctx: &mut vello_cpu::RenderContext,
    shape: &impl kurbo::Shape,
    color: Rgba8Premul,
    opacity: f32,
) {
    if opacity <= 0.0 {
        return;
    }
    set_color(ctx, color);
    let path = bezpath_to_cpu(&shape.to_path(0.1));
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
        ctx.fill_path(&path);
        ctx.pop_layer();
    } else {
        ctx.fill_path(&path);
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8Premul) {
    let (r, g, b) = if c.a == 0 {
        (0, 0, 0)
    } else {
        let unpremul = |v: u8| ((u16::from(v) * 255 + u16::from(c.a) / 2) / u16::from(c.a)) as u8;
        (unpremul(c.r), unpremul(c.g), unpremul(c.b))
    };
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, c.a));
}

fn scaled_dim(v: u32, scale: f64, what: &str) -> ReelResult<u16> {
    let px = (f64::from(v) * scale).round().max(1.0);
    if px > f64::from(u16::MAX) {
        return Err(ReelError::evaluation(format!("preview {what} exceeds u16")));
    }
    Ok(px as u16)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> ReelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ReelError::evaluation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ReelError::evaluation("pixmap height exceeds u16"))?;
    if bytes.len() != width as usize * height as usize * 4 {
        return Err(ReelError::evaluation("pixmap byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels: Vec<_> = bytes
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
