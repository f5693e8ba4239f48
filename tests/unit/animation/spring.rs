use super::*;

fn fps60() -> Fps {
    Fps::integer(60).unwrap()
}

#[test]
fn starts_at_zero_and_settles_at_one() {
    for params in [
        SpringParams::FAST,
        SpringParams::SLOW,
        SpringParams::BOUNCE,
        SpringParams::default(),
    ] {
        assert_eq!(params.position(0.0, fps60()), 0.0);
        assert!((params.position(300.0, fps60()) - 1.0).abs() < 1e-3, "{params:?}");
    }
}

#[test]
fn underdamped_spring_overshoots_unless_clamped() {
    let free = SpringParams::default();
    assert!(free.damping_ratio() < 1.0);
    let peak = (0..120)
        .map(|f| free.position(f as f64, fps60()))
        .fold(f64::MIN, f64::max);
    assert!(peak > 1.05, "peak {peak}");

    let clamped = SpringParams {
        overshoot_clamping: true,
        ..free
    };
    let peak = (0..120)
        .map(|f| clamped.position(f as f64, fps60()))
        .fold(f64::MIN, f64::max);
    assert!(peak <= 1.0);
}

#[test]
fn critically_damped_spring_is_monotone() {
    let stiff = SpringParams {
        damping: 40.0,
        mass: 1.0,
        stiffness: 100.0,
        overshoot_clamping: false,
    };
    assert!(stiff.damping_ratio() >= 1.0);
    let mut prev = 0.0;
    for f in 0..240 {
        let v = stiff.position(f as f64, fps60());
        assert!(v >= prev - 1e-12);
        assert!(v <= 1.0 + 1e-12);
        prev = v;
    }
}

#[test]
fn progress_is_flat_before_trigger_and_bounded() {
    let fps = fps60();
    let s = SpringParams::FAST;
    assert_eq!(s.progress(0, 100, fps), 0.0);
    assert_eq!(s.progress(99, 100, fps), 0.0);
    assert_eq!(s.progress(100, 100, fps), 0.0);
    assert!(s.progress(110, 100, fps) > 0.0);
    for frame in [i64::MIN, -1_000_000, -1, 0, 1, 50, 10_000, i64::MAX] {
        let p = s.progress(frame, 100, fps);
        assert!((0.0..=1.0).contains(&p), "frame {frame} -> {p}");
    }
}

#[test]
fn low_frame_rates_cap_the_step() {
    let s = SpringParams::default();
    let slow = Fps::integer(10).unwrap();
    // 10 frames at 10 fps advance 10 * 64ms, same as 38.4 frames at 60 fps.
    let a = s.position(10.0, slow);
    let b = s.position(38.4, fps60());
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn validate_rejects_non_physical_params() {
    assert!(SpringParams::FAST.validate().is_ok());
    for bad in [
        SpringParams {
            mass: 0.0,
            ..SpringParams::default()
        },
        SpringParams {
            stiffness: -1.0,
            ..SpringParams::default()
        },
        SpringParams {
            damping: -0.5,
            ..SpringParams::default()
        },
        SpringParams {
            damping: f64::NAN,
            ..SpringParams::default()
        },
    ] {
        assert!(bad.validate().is_err(), "{bad:?}");
    }
}
