use super::*;

#[test]
fn gentle_swells_holds_and_fades() {
    let env = VolumeEnvelope::gentle(12_000, 60).unwrap();
    assert_eq!(env.volume_at(-30), 0.0);
    assert_eq!(env.volume_at(0), 0.0);
    assert!((env.volume_at(40) - 0.03).abs() < 1e-12);
    assert!((env.volume_at(240) - 0.6).abs() < 1e-12);
    assert_eq!(env.volume_at(5_000), 0.6);
    assert!((env.volume_at(11_700) - 0.3).abs() < 1e-12);
    assert_eq!(env.volume_at(12_000), 0.0);
    assert_eq!(env.volume_at(20_000), 0.0);
}

#[test]
fn gentle_fade_in_is_eased_per_segment() {
    let env = VolumeEnvelope::gentle(12_000, 60).unwrap();
    // A quarter into the first segment the cubic ease-in gives 1/64 of the step.
    assert!((env.volume_at(10) - 0.03 / 64.0).abs() < 1e-12);
    assert!((env.volume_at(20) - 0.015).abs() < 1e-12);
}

#[test]
fn simple_plateaus_at_half_volume() {
    let env = VolumeEnvelope::simple(1_200, 60).unwrap();
    assert_eq!(env.volume_at(15), 0.25);
    assert_eq!(env.volume_at(30), 0.5);
    assert_eq!(env.volume_at(600), 0.5);
    assert_eq!(env.volume_at(900), 0.25);
    assert_eq!(env.volume_at(1_200), 0.0);
}

#[test]
fn short_compositions_are_rejected() {
    let err = VolumeEnvelope::gentle(600, 60).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    assert!(VolumeEnvelope::simple(600, 60).is_err());
}

#[test]
fn presets_resolve() {
    assert!(
        VolumeEnvelope::preset(VolumePreset::Mute, 12_000, 60)
            .unwrap()
            .is_none()
    );
    let simple = VolumeEnvelope::preset(VolumePreset::Simple, 1_200, 60)
        .unwrap()
        .unwrap();
    assert_eq!(simple, VolumeEnvelope::simple(1_200, 60).unwrap());
}

#[test]
fn out_of_range_stops_are_rejected() {
    let curve = Curve::new(&[0.0, 10.0], &[0.0, 1.5]).unwrap();
    assert!(VolumeEnvelope::new(curve).is_err());
}
