use super::*;

fn rec(name: &str, followers: f64) -> EntityRecord {
    EntityRecord {
        name: Some(name.to_string()),
        followers_count: Some(followers),
        ..EntityRecord::default()
    }
}

#[test]
fn empty_json_is_the_default_config() {
    let cfg = CompositionConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, CompositionConfig::default());
    assert_eq!(cfg.frames_per_card(), 360);
    assert_eq!(cfg.main_duration(), 11_520);
    assert_eq!(cfg.ending_frames(), 300);
    assert_eq!(cfg.total_frames(), 11_940);
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let cfg = CompositionConfig::from_reader(
        r#"{"fps":30,"theme":{"mode":"light"},"tail_gap":"stagger_delay"}"#.as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.cards_to_show, 32);
    assert_eq!(cfg.theme.background_hex(), "#FFFFFF");
    assert_eq!(cfg.tail_gap, TailGap::StaggerDelay);
}

#[test]
fn invalid_configs_are_rejected() {
    for json in [
        r#"{"fps":0}"#,
        r#"{"cards_to_show":0}"#,
        r#"{"seconds_per_card":0}"#,
        r#"{"card_entry_duration":0}"#,
        r#"{"theme":{"dark_background":"charcoal"}}"#,
        r#"{"layout":{"item_width":0}}"#,
        r#"{"watermark_speed":-1}"#,
    ] {
        let err = CompositionConfig::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ReelError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn sequences_partition_the_timeline() {
    let cfg = CompositionConfig::default();
    let at = |f: u64| cfg.sequence_at(FrameIndex(f));
    assert_eq!(at(0), Some((Sequence::Intro, FrameIndex(0))));
    assert_eq!(at(119), Some((Sequence::Intro, FrameIndex(119))));
    assert_eq!(at(120), Some((Sequence::Main, FrameIndex(0))));
    assert_eq!(at(11_639), Some((Sequence::Main, FrameIndex(11_519))));
    assert_eq!(at(11_640), Some((Sequence::Ending, FrameIndex(0))));
    assert_eq!(at(11_939), Some((Sequence::Ending, FrameIndex(299))));
    assert_eq!(at(11_940), None);
}

#[test]
fn data_source_priority() {
    let mut ds = DataSources::default();
    assert_eq!(ds.active(), DEFAULT_DATA_SOURCE);
    ds.instagram = Some("instagram/ig-global.json".into());
    assert_eq!(ds.active(), "instagram/ig-global.json");
    ds.youtube = Some("youtube/global.json".into());
    assert_eq!(ds.active(), "youtube/global.json");
    ds.gaming = Some("  ".into());
    assert_eq!(ds.active(), "youtube/global.json");
    ds.gaming = Some("gaming/onic.json".into());
    assert_eq!(ds.active(), "gaming/onic.json");
}

#[test]
fn default_timeline_uses_tiered_schedule_on_global_frames() {
    let cfg = CompositionConfig::default();
    let tl = cfg.to_timeline(32).unwrap();
    assert_eq!(tl.trigger_frame(0), 120);
    assert_eq!(tl.trigger_frame(1), 180);
    assert_eq!(tl.trigger_frame(3), 690);
    assert_eq!(tl.trigger_frame(12), 120 + 200 + 3 * 370 + 6 * 420 + 440);
    assert_eq!(tl.scroll.main_animation_frames, 120 + 30 + 4 * 42);
    assert_eq!(tl.scroll.scroll_duration_frames, 11_520 - 198);
}

#[test]
fn overrides_reach_the_timeline() {
    let cfg = CompositionConfig {
        schedule: Some(TriggerSchedule::Staggered {
            initial_delay: 30,
            main_count: 4,
        }),
        entrance: Some(EntranceConfig::player_list(40)),
        opacity: Some(OpacityCurve::Linear),
        ..CompositionConfig::default()
    };
    let tl = cfg.to_timeline(8).unwrap();
    assert_eq!(tl.trigger_frame(0), 150);
    assert_eq!(tl.trigger_frame(5), 150 + 4 * 42 + 200);
    assert_eq!(tl.entrance.opacity, OpacityCurve::Linear);
    assert_eq!(tl.entrance.intro_slide_distance, Some(200.0));
}

#[test]
fn staggered_schedule_defaults_to_the_player_list_fade() {
    let staggered = Some(TriggerSchedule::Staggered {
        initial_delay: 30,
        main_count: 4,
    });
    let cfg = CompositionConfig {
        schedule: staggered,
        opacity_transition_duration: 25,
        ..CompositionConfig::default()
    };
    let entrance = cfg.entrance_config();
    assert_eq!(entrance, EntranceConfig::player_list(25));
    assert_eq!(entrance.opacity, OpacityCurve::Ramp { duration_frames: 25 });

    let tiered = CompositionConfig {
        opacity_transition_duration: 25,
        ..CompositionConfig::default()
    };
    assert_eq!(tiered.entrance_config(), EntranceConfig::default());
}

#[test]
fn overlay_defaults_to_one_window_ten_seconds_in() {
    let cfg = CompositionConfig::default();
    let w = cfg.overlay.unwrap().window(120, 60);
    assert_eq!(w.start, 720);
    assert_eq!(w.window, 120);
    assert!(w.is_visible(720));
    assert!(!w.is_visible(840));
    assert!(!w.is_visible(720 + 1800));
}

#[test]
fn plan_orders_and_truncates_records() {
    let cfg = CompositionConfig {
        cards_to_show: 2,
        volume: VolumePreset::Simple,
        ..CompositionConfig::default()
    };
    let plan = CompositionPlan::new(
        cfg,
        vec![rec("c", 300.0), rec("a", 100.0), rec("b", 200.0)],
    )
    .unwrap();
    let names: Vec<_> = plan.records.iter().filter_map(|r| r.name.as_deref()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(plan.lead().and_then(|r| r.name.as_deref()), Some("a"));
    assert_eq!(plan.timeline.item_count, 2);
    assert!(plan.volume.is_some());
}

#[test]
fn plan_rejects_compositions_too_short_for_the_volume_envelope() {
    let cfg = CompositionConfig {
        cards_to_show: 1,
        seconds_per_card: 2,
        ..CompositionConfig::default()
    };
    assert!(CompositionPlan::new(cfg.clone(), vec![rec("a", 1.0)]).is_err());

    let muted = CompositionConfig {
        volume: VolumePreset::Mute,
        ..cfg
    };
    let plan = CompositionPlan::new(muted, vec![rec("a", 1.0)]).unwrap();
    assert!(plan.volume.is_none());
}
