use super::*;
use crate::indicator::loader::IndicatorState;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RevealError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RevealError::mask("x").to_string().contains("mask error:"));
    assert!(
        RevealError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn invalid_state_names_op_and_state() {
    let err = RevealError::invalid_state("reveal", IndicatorState::Revealed);
    assert!(err.is_invalid_state());
    let msg = err.to_string();
    assert!(msg.contains("`reveal`"));
    assert!(msg.contains("revealed"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RevealError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_invalid_state());
}
