use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ReelError::schedule("x")
            .to_string()
            .contains("schedule error:")
    );
    assert!(
        ReelError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(ReelError::data("x").to_string().contains("data error:"));
}

#[test]
fn serde_json_errors_map_to_serde_variant() {
    let err: ReelError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ReelError::Serde(_)));
    assert!(err.to_string().contains("serialization error:"));
}
