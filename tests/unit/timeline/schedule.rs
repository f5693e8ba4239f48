use super::*;

const SPACING: Spacing = Spacing {
    card_entry: 42,
    stagger: 200,
};

#[test]
fn tiered_examples() {
    assert_eq!(tiered_trigger_frame(0, 120, 440), 120);
    assert_eq!(tiered_trigger_frame(1, 120, 440), 180);
    assert_eq!(tiered_trigger_frame(2, 120, 440), 320);
    assert_eq!(tiered_trigger_frame(3, 120, 440), 690);
    assert_eq!(tiered_trigger_frame(4, 120, 440), 1060);
    assert_eq!(tiered_trigger_frame(5, 120, 440), 120 + 200 + 3 * 370);
    assert_eq!(tiered_trigger_frame(10, 120, 440), 120 + 200 + 3 * 370 + 5 * 420);
    assert_eq!(tiered_trigger_frame(11, 120, 440), 120 + 200 + 3 * 370 + 6 * 420);
    assert_eq!(
        tiered_trigger_frame(13, 120, 440),
        120 + 200 + 3 * 370 + 6 * 420 + 2 * 440
    );
}

#[test]
fn tiered_is_monotonic_for_every_observed_tail_gap() {
    for gap in [200, 220, 370, 420, 440] {
        let frames: Vec<i64> = (0..40).map(|i| tiered_trigger_frame(i, 120, gap)).collect();
        assert!(frames.windows(2).all(|w| w[0] <= w[1]), "gap {gap}");
    }
}

#[test]
fn tail_gap_only_affects_the_tail() {
    for i in 0..=11 {
        assert_eq!(tiered_trigger_frame(i, 0, 200), tiered_trigger_frame(i, 0, 440));
    }
    assert_ne!(tiered_trigger_frame(12, 0, 200), tiered_trigger_frame(12, 0, 440));
}

#[test]
fn intro_delay_shifts_the_whole_schedule() {
    for i in 0..20 {
        let base = tiered_trigger_frame(i, 0, 220);
        assert_eq!(tiered_trigger_frame(i, -30, 220), base - 30);
        assert_eq!(tiered_trigger_frame(i, 500, 220), base + 500);
    }
}

#[test]
fn huge_indices_saturate() {
    assert_eq!(tiered_trigger_frame(usize::MAX, i64::MAX, 440), i64::MAX);
}

#[test]
fn tail_gap_can_follow_stagger_delay() {
    let sched = TriggerSchedule::Tiered {
        tail_gap: TailGap::StaggerDelay,
    };
    assert_eq!(
        sched.trigger_frame(12, 0, SPACING) - sched.trigger_frame(11, 0, SPACING),
        200
    );
}

#[test]
fn staggered_uses_entry_then_stagger_spacing() {
    let sched = TriggerSchedule::Staggered {
        initial_delay: 30,
        main_count: 4,
    };
    assert_eq!(sched.trigger_frame(0, 120, SPACING), 150);
    assert_eq!(sched.trigger_frame(3, 120, SPACING), 150 + 3 * 42);
    assert_eq!(sched.trigger_frame(4, 120, SPACING), 150 + 4 * 42);
    assert_eq!(sched.trigger_frame(6, 120, SPACING), 150 + 4 * 42 + 2 * 200);
    assert!(sched.is_intro_tier(3));
    assert!(!sched.is_intro_tier(4));
}

#[test]
fn spacing_rejects_zero() {
    assert!(SPACING.validate().is_ok());
    assert!(
        Spacing {
            card_entry: 0,
            stagger: 1
        }
        .validate()
        .is_err()
    );
    assert!(
        Spacing {
            card_entry: 1,
            stagger: 0
        }
        .validate()
        .is_err()
    );
}

#[test]
fn schedule_json_shape() {
    let s: TriggerSchedule =
        serde_json::from_str(r#"{"kind":"tiered","tail_gap":{"frames":220}}"#).unwrap();
    assert_eq!(
        s,
        TriggerSchedule::Tiered {
            tail_gap: TailGap::Frames(220)
        }
    );
    let s: TriggerSchedule =
        serde_json::from_str(r#"{"kind":"tiered","tail_gap":"stagger_delay"}"#).unwrap();
    assert_eq!(
        s,
        TriggerSchedule::Tiered {
            tail_gap: TailGap::StaggerDelay
        }
    );
}
