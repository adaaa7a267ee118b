use super::*;

const MARKER: &str = "(take-image";
const FLASH: Duration = Duration::from_millis(1000);

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn manual_clock_moves_only_when_told() {
    let clock = ManualClock::new();
    assert_eq!(clock.now(), Duration::ZERO);
    clock.advance(ms(250));
    clock.advance(ms(250));
    assert_eq!(clock.now(), ms(500));
    clock.set(ms(42));
    assert_eq!(clock.now(), ms(42));

    let shared = std::sync::Arc::new(ManualClock::new());
    shared.advance(ms(7));
    assert_eq!(Clock::now(&shared), ms(7));
}

#[test]
fn flash_lasts_for_the_configured_duration() {
    let mut flash = CameraFlash::default();
    let action = Some("(take-image rover1 obj1 waypoint2 camera0)");

    assert!(flash.observe(action, ms(0), MARKER, FLASH));
    assert!(flash.observe(action, ms(999), MARKER, FLASH));
    assert!(!flash.observe(action, ms(1000), MARKER, FLASH));
}

#[test]
fn repeating_the_same_action_does_not_retrigger() {
    let mut flash = CameraFlash::default();
    let action = Some("(take-image r w o c)");
    flash.observe(action, ms(0), MARKER, FLASH);
    assert!(!flash.observe(action, ms(1500), MARKER, FLASH));
    assert!(!flash.observe(action, ms(1600), MARKER, FLASH));
}

#[test]
fn only_capture_actions_trigger() {
    let mut flash = CameraFlash::default();
    assert!(!flash.observe(Some("(navigate r1 w1 w2)"), ms(0), MARKER, FLASH));
    assert!(!flash.observe(None, ms(10), MARKER, FLASH));
    assert!(flash.observe(Some("(take-image r1 o1 w2 c)"), ms(20), MARKER, FLASH));
    // A later non-capture action does not cancel a running flash.
    assert!(flash.observe(Some("(navigate r1 w2 w3)"), ms(30), MARKER, FLASH));
}

#[test]
fn returning_to_a_capture_action_retriggers() {
    let mut flash = CameraFlash::default();
    let take = Some("(take-image r1 o1 w2 c)");
    flash.observe(take, ms(0), MARKER, FLASH);
    flash.observe(Some("(navigate r1 w2 w3)"), ms(2000), MARKER, FLASH);
    assert!(flash.observe(take, ms(3000), MARKER, FLASH));

    flash.reset();
    assert!(!flash.is_visible(ms(3000)));
}

#[test]
fn capture_waypoint_reads_fourth_token() {
    assert_eq!(
        capture_waypoint("(take-image rover0 objective1 waypoint3 camera0)"),
        Some("waypoint3")
    );
    assert_eq!(capture_waypoint("(take-image rover0 objective1)"), None);
}
