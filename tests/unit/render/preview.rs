use super::*;
use crate::audio::volume::VolumePreset;
use crate::composition::model::{CompositionConfig, RecordOrder};
use crate::dataset::record::EntityRecord;

const BACKGROUND: [u8; 4] = [0x21, 0x21, 0x21, 255];

fn small_plan() -> CompositionPlan {
    let cfg = CompositionConfig {
        fps: 30,
        cards_to_show: 3,
        seconds_per_card: 2,
        intro_delay: 30,
        ending_seconds: 1,
        volume: VolumePreset::Mute,
        order: RecordOrder::AsLoaded,
        ..CompositionConfig::default()
    };
    let records = (0..3)
        .map(|i| EntityRecord {
            name: Some(format!("card {i}")),
            ..EntityRecord::default()
        })
        .collect();
    CompositionPlan::new(cfg, records).unwrap()
}

fn opts() -> PreviewOptions {
    PreviewOptions {
        scale: 0.125,
        ..PreviewOptions::default()
    }
}

#[test]
fn preview_matches_scaled_canvas() {
    let plan = small_plan();
    let frame = render_preview(&plan, FrameIndex(200), &opts()).unwrap();
    assert_eq!((frame.width, frame.height), (320, 180));
    assert_eq!(frame.data.len(), 320 * 180 * 4);
    assert!(frame.premultiplied);
}

#[test]
fn settled_card_is_drawn_over_background() {
    let plan = small_plan();
    let frame = render_preview(&plan, FrameIndex(200), &opts()).unwrap();

    // Center of the lead card: x = 2560/2 - 1300 + 300, y = 1440/2.
    let card = frame.pixel(35, 90).unwrap();
    assert!(card[0] > 200, "{card:?}");
    assert_eq!(frame.pixel(319, 179), Some(BACKGROUND));
    assert_eq!(frame.pixel(320, 0), None);
}

#[test]
fn intro_draws_title_bar() {
    let plan = small_plan();
    let frame = render_preview(&plan, FrameIndex(29), &opts()).unwrap();
    let title = frame.pixel(160, 90).unwrap();
    assert!(title[0] > 200, "{title:?}");
    assert_eq!(frame.pixel(5, 175), Some(BACKGROUND));
}

#[test]
fn renderer_is_deterministic() {
    let plan = small_plan();
    let r = PreviewRenderer::new().unwrap();
    let a = r.render(&plan, FrameIndex(150), &opts()).unwrap();
    let b = r.render(&plan, FrameIndex(150), &opts()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_requests_fail() {
    let plan = small_plan();
    let err = render_preview(&plan, FrameIndex(10_000), &opts()).unwrap_err();
    assert!(matches!(err, ReelError::Evaluation(_)));

    let bad = PreviewOptions {
        scale: 0.0,
        ..opts()
    };
    assert!(matches!(
        render_preview(&plan, FrameIndex(0), &bad),
        Err(ReelError::Validation(_))
    ));
}
