//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::temporal::TemporalError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_from_temporal_error() {
    let core_error: CoreError = TemporalError::InvalidMonth(13).into();

    match core_error {
        CoreError::Temporal(TemporalError::InvalidMonth(m)) => assert_eq!(m, 13),
        _ => panic!("Expected Temporal error"),
    }
}

#[test]
fn test_core_error_display() {
    let error = CoreError::validation("user id must not contain '#'");
    assert_eq!(error.to_string(), "Validation error: user id must not contain '#'");
}
