//! State machine tests for `TimerView`.

use chrono::{Duration, TimeZone, Utc};
use countdown_client::record::CountdownRecord;
use countdown_client::view::{TimerView, ViewPhase, DEFAULT_RATE_INPUT, DEFAULT_START_INPUT};
use countdown_core::types::Timestamp;

fn anchor() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn record(start_value: f64, rate: f64, is_running: bool) -> CountdownRecord {
    CountdownRecord {
        id: 1,
        start_value,
        rate_per_second: rate,
        started_at: anchor(),
        is_running,
        created_at: Some(anchor()),
        updated_at: Some(anchor()),
    }
}

#[test]
fn new_view_is_loading_with_default_inputs() {
    let view = TimerView::new();

    assert_eq!(view.phase(), ViewPhase::Loading);
    assert_eq!(view.start_input(), DEFAULT_START_INPUT);
    assert_eq!(view.rate_input(), DEFAULT_RATE_INPUT);
    assert!(!view.can_start());
    assert_eq!(view.status_line(), "Loading...");
}

#[test]
fn empty_load_shows_start_input() {
    let mut view = TimerView::new();
    view.set_start_input("42.5");
    view.on_loaded(None, anchor());

    assert_eq!(view.phase(), ViewPhase::Stopped);
    assert_eq!(view.current_value(), 42.5);
    assert!(view.can_start());
    assert!(!view.can_resume());
}

#[test]
fn first_load_seeds_inputs_from_record() {
    let mut view = TimerView::new();
    view.on_loaded(Some(record(12.25, 0.5, false)), anchor());

    assert_eq!(view.start_input(), "12.25");
    assert_eq!(view.rate_input(), "0.5");
    assert_eq!(view.display(), "12.25");
    assert!(view.can_resume());
}

#[test]
fn later_loads_do_not_reseed_inputs() {
    let mut view = TimerView::new();
    view.on_loaded(Some(record(10.0, 1.0, false)), anchor());
    assert!(view.set_start_input("77"));

    view.on_loaded(Some(record(20.0, 2.0, false)), anchor());

    assert_eq!(view.start_input(), "77");
    assert_eq!(view.current_value(), 20.0);
}

#[test]
fn running_record_projects_on_tick() {
    let mut view = TimerView::new();
    view.on_loaded(Some(record(100.0, 10.0, true)), anchor());
    assert_eq!(view.phase(), ViewPhase::Running);

    let reached_zero = view.on_tick(anchor() + Duration::seconds(5));

    assert!(!reached_zero);
    assert_eq!(view.current_value(), 50.0);
    assert_eq!(view.phase(), ViewPhase::Running);
}

#[test]
fn tick_stops_locally_at_zero() {
    let mut view = TimerView::new();
    view.on_loaded(Some(record(10.0, 1.0, true)), anchor());

    assert!(view.on_tick(anchor() + Duration::seconds(11)));

    assert_eq!(view.current_value(), 0.0);
    assert_eq!(view.phase(), ViewPhase::Stopped);
    // The server row is still running, so neither start nor resume applies.
    assert!(view.stopped_locally());
    assert!(!view.can_start());
    assert!(!view.can_resume());
}

#[test]
fn adopting_a_record_clears_the_local_stop() {
    let mut view = TimerView::new();
    view.on_loaded(Some(record(10.0, 1.0, true)), anchor());
    view.on_tick(anchor() + Duration::seconds(11));

    view.adopt(record(4.0, 1.0, false), anchor() + Duration::seconds(12));

    assert!(!view.stopped_locally());
    assert!(view.can_resume());
    assert!(view.can_start());
}

#[test]
fn tick_is_a_no_op_when_stopped() {
    let mut view = TimerView::new();
    view.on_loaded(Some(record(10.0, 1.0, false)), anchor());

    assert!(!view.on_tick(anchor() + Duration::seconds(3)));
    assert_eq!(view.current_value(), 10.0);
}

#[test]
fn inputs_are_locked_while_running() {
    let mut view = TimerView::new();
    view.on_loaded(Some(record(10.0, 1.0, true)), anchor());

    assert!(view.inputs_locked());
    assert!(!view.set_start_input("5"));
    assert!(!view.set_rate_input("2"));
    assert_eq!(view.start_input(), "10");
}

#[test]
fn invalid_input_is_rejected() {
    let mut view = TimerView::new();
    view.on_loaded(None, anchor());

    assert!(!view.set_start_input("1.2.3"));
    assert!(!view.set_rate_input("-1"));
    assert!(view.set_rate_input(""));
    assert_eq!(view.rate(), 0.0);
    assert!(!view.can_start(), "zero rate disables start");
}

#[test]
fn adopting_a_paused_record_shows_its_start_value() {
    let mut view = TimerView::new();
    view.on_loaded(Some(record(30.0, 1.0, true)), anchor());
    view.on_tick(anchor() + Duration::seconds(10));
    assert_eq!(view.current_value(), 20.0);

    view.adopt(record(30.0, 1.0, false), anchor() + Duration::seconds(10));

    assert_eq!(view.phase(), ViewPhase::Stopped);
    assert_eq!(view.current_value(), 30.0);
}

#[test]
fn display_precision_follows_inputs() {
    let mut view = TimerView::new();
    view.on_loaded(None, anchor());
    view.set_start_input("1.5");
    view.set_rate_input("0.125");
    view.on_loaded(None, anchor());

    assert_eq!(view.decimals(), 3);
    assert_eq!(view.display(), "1.500");
    assert_eq!(view.status_line(), "[stopped] 1.500   start=1.5 rate=0.125/s");
}

#[test]
fn failed_load_keeps_view_usable() {
    let mut view = TimerView::new();
    view.on_load_failed();

    assert_eq!(view.phase(), ViewPhase::Stopped);
    assert_eq!(view.current_value(), 100.0);
    assert!(view.can_start());
}
