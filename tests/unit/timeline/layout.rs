use super::*;

#[test]
fn static_position_steps_by_item_width() {
    let layout = LayoutConfig::default();
    assert_eq!(layout.static_position(0, 2560.0), 1280.0 - 1300.0);
    assert_eq!(layout.static_position(2, 2560.0), -20.0 + 1300.0);
    for i in 0..50 {
        let a = layout.static_position(i, 1920.0);
        let b = layout.static_position(i + 1, 1920.0);
        assert!(b > a);
        assert!((b - a - 650.0).abs() < 1e-9);
    }
}

#[test]
fn scroll_offset_saturates_at_extent() {
    let layout = LayoutConfig::default();
    let scroll = ScrollConfig {
        main_animation_frames: 198,
        scroll_duration_frames: 1000,
    };
    assert_eq!(scroll.scroll_offset(0, &layout, 5), 0.0);
    assert_eq!(scroll.scroll_offset(198, &layout, 5), 0.0);
    assert_eq!(scroll.scroll_offset(698, &layout, 5), -1300.0);
    assert_eq!(scroll.scroll_offset(1198, &layout, 5), -2600.0);
    assert_eq!(scroll.scroll_offset(i64::MAX, &layout, 5), -2600.0);
    assert_eq!(scroll.scroll_offset(i64::MIN, &layout, 5), 0.0);
}

#[test]
fn scroll_offset_is_non_increasing() {
    let layout = LayoutConfig::default();
    let scroll = ScrollConfig {
        main_animation_frames: 10,
        scroll_duration_frames: 77,
    };
    let mut prev = scroll.scroll_offset(0, &layout, 12);
    for f in 0..200 {
        let v = scroll.scroll_offset(f, &layout, 12);
        assert!(v <= prev);
        prev = v;
    }
}

#[test]
fn single_item_never_scrolls() {
    let layout = LayoutConfig::default();
    let scroll = ScrollConfig {
        main_animation_frames: 0,
        scroll_duration_frames: 10,
    };
    for n in [0, 1] {
        assert_eq!(scroll.scroll_offset(5, &layout, n), 0.0);
        assert_eq!(scroll.scroll_offset(50, &layout, n), 0.0);
    }
}

#[test]
fn from_durations_matches_card_list_timing() {
    // 32 cards * 6s * 60fps
    let scroll = ScrollConfig::from_durations(11_520, 30, 42);
    assert_eq!(scroll.main_animation_frames, 198);
    assert_eq!(scroll.scroll_duration_frames, 11_322);

    let tiny = ScrollConfig::from_durations(10, 30, 42);
    assert_eq!(tiny.scroll_duration_frames, 1);
    assert_eq!(tiny.shifted(120).main_animation_frames, 318);
}

#[test]
fn validation_rejects_degenerate_geometry() {
    assert!(LayoutConfig::default().validate().is_ok());
    assert!(
        LayoutConfig {
            item_width: 0.0,
            ..LayoutConfig::default()
        }
        .validate()
        .is_err()
    );
    assert!(
        ScrollConfig {
            main_animation_frames: 0,
            scroll_duration_frames: 0
        }
        .validate()
        .is_err()
    );
}
