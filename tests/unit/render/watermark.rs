use super::*;

#[test]
fn watermark_parses_at_its_view_box_size() {
    let tree = parse_watermark().unwrap();
    assert_eq!(tree.size().width(), 480.0);
    assert_eq!(tree.size().height(), 480.0);
}

#[test]
fn raster_params_follow_the_draw_scale() {
    let tree = parse_watermark().unwrap();
    let (w, h, adjust) = svg_raster_params(&tree, Affine::scale(0.5)).unwrap();
    assert_eq!((w, h), (240, 240));
    let [a, _, _, d, _, _] = adjust.as_coeffs();
    assert!((a - 1.0).abs() < 1e-9 && (d - 1.0).abs() < 1e-9);

    assert!(svg_raster_params(&tree, Affine::scale(100.0)).is_err());
}

#[test]
fn rasterized_pinwheel_has_ink_and_clear_corners() {
    let tree = parse_watermark().unwrap();
    let px = rasterize_svg_to_premul_rgba8(&tree, 48, 48).unwrap();
    assert_eq!(px.len(), 48 * 48 * 4);
    // Corner is outside every petal.
    assert_eq!(px[3], 0);
    assert!(px.chunks_exact(4).any(|p| p[3] > 0));
}

#[test]
fn malformed_svg_is_a_validation_error() {
    assert!(matches!(
        parse_svg(b"<svg"),
        Err(ReelError::Validation(_))
    ));
}
