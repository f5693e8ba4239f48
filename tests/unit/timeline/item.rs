use super::*;
use crate::foundation::core::Fps;
use crate::timeline::entrance::EntranceConfig;
use crate::timeline::layout::ScrollConfig;
use crate::timeline::schedule::{Spacing, TriggerSchedule};

fn cfg() -> TimelineConfig {
    TimelineConfig::new(
        Fps::integer(60).unwrap(),
        8,
        120,
        Spacing {
            card_entry: 42,
            stagger: 200,
        },
        ScrollConfig {
            main_animation_frames: 318,
            scroll_duration_frames: 4000,
        },
    )
    .unwrap()
}

#[test]
fn before_trigger_item_is_hidden_and_lowered() {
    let c = cfg();
    let s = c.item_state(3, 0, 2560.0);
    assert_eq!(s.trigger_frame, 690);
    assert_eq!(s.local_frame, 0);
    assert_eq!(s.progress, 0.0);
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.translate_y, 120.0);
    assert!(!s.is_visible());
    assert!(!s.is_triggered(0));
}

#[test]
fn long_after_trigger_item_rests() {
    let c = cfg();
    let s = c.item_state(1, 180 + 600, 2560.0);
    assert_eq!(s.local_frame, 600);
    assert!((s.progress - 1.0).abs() < 1e-3);
    assert!(s.translate_y.abs() < 0.5);
    assert!(s.opacity > 0.99);
    assert!(s.is_visible());
}

#[test]
fn x_combines_layout_and_scroll() {
    let c = cfg();
    for frame in [0, 500, 2318, 10_000] {
        let s = c.item_state(2, frame, 2560.0);
        assert_eq!(s.x, c.static_position(2, 2560.0) + c.scroll_offset(frame));
    }
    let t = c.item_state(2, 0, 2560.0).transform();
    assert_eq!(t.translate.x, 1280.0);
    assert_eq!(t.translate.y, 120.0);
}

#[test]
fn evaluation_is_referentially_transparent() {
    let c = cfg();
    for frame in [0, 181, 700, 3000] {
        let a = c.item_states(frame, 1920.0);
        let b = c.item_states(frame, 1920.0);
        assert_eq!(a, b);
        // Independent of evaluation order.
        let single: Vec<_> = (0..8).rev().map(|i| c.item_state(i, frame, 1920.0)).collect();
        assert_eq!(a, single.into_iter().rev().collect::<Vec<_>>());
    }
}

#[test]
fn player_list_entrance_adds_bounce_and_fade() {
    let c = cfg()
        .with_schedule(TriggerSchedule::Staggered {
            initial_delay: 30,
            main_count: 4,
        })
        .with_entrance(EntranceConfig::player_list(40))
        .unwrap();

    let lead = c.item_state(0, 150, 2560.0);
    assert_eq!(lead.trigger_frame, 150);
    assert!(lead.intro_tier);
    assert_eq!(lead.translate_y, 220.0);
    assert_eq!(lead.opacity, 0.0);

    let halfway = c.item_state(0, 170, 2560.0);
    assert_eq!(halfway.opacity, 0.5);

    let late = c.item_state(5, 150 + 168 + 200 + 1000, 2560.0);
    assert!(!late.intro_tier);
    assert!(late.translate_y.abs() < 0.01);
}

#[test]
fn card_scale_is_fixed_across_the_entrance() {
    let c = cfg();
    for frame in [0, 120, 125, 150, 200, 690, 700, 5_000] {
        let s = c.item_state(3, frame, 2560.0);
        assert_eq!(s.scale, 1.0);
        let a = s.transform().to_affine().as_coeffs();
        assert_eq!((a[0], a[3]), (1.0, 1.0));
    }
}
