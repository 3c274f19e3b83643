use dealbot::setup_logging;

#[test]
fn test_logging_setup() {
    // Logging setup must not panic, even when called repeatedly.
    let result = std::panic::catch_unwind(|| {
        setup_logging();
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}
