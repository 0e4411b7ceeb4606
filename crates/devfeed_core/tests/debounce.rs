use devfeed_core::{DebounceGate, QUIET_PERIOD_MS};

#[test]
fn only_the_last_burst_value_fires_after_quiet_period() {
    let mut gate = DebounceGate::default();
    gate.push("r", 0);
    gate.push("ru", 100);
    gate.push("rust", 200);

    assert_eq!(gate.poll(300), None);
    assert_eq!(gate.poll(699), None);
    assert_eq!(gate.deadline(), Some(200 + QUIET_PERIOD_MS));
    assert_eq!(gate.poll(700), Some("rust"));

    // Fires once.
    assert_eq!(gate.poll(5_000), None);
    assert!(!gate.is_pending());
}

#[test]
fn late_poll_still_delivers_pending_value() {
    let mut gate = DebounceGate::new(50);
    gate.push(7u32, 10);
    assert_eq!(gate.poll(10_000), Some(7));
}

#[test]
fn cancelled_value_never_fires() {
    let mut gate = DebounceGate::default();
    gate.push(String::from("abandoned"), 0);
    gate.cancel();

    assert!(!gate.is_pending());
    assert_eq!(gate.poll(QUIET_PERIOD_MS * 10), None);
}
