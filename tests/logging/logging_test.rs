//! Tests for `src/logging.rs`.

#[test]
fn second_init_keeps_existing_subscriber() {
    // Only this test installs a subscriber in this binary.
    assert!(relaylog::logging::init_cli("debug"));
    assert!(!relaylog::logging::init_cli("trace"));
    tracing::debug!("subscriber installed");
}
