use super::*;
use crate::indicator::loader::IndicatorState;

fn view() -> LoadingImageView {
    LoadingImageView::new(Rect::new(0.0, 0.0, 100.0, 100.0), IndicatorConfig::default()).unwrap()
}

#[test]
fn progress_events_reach_the_indicator() {
    let mut v = view();
    v.handle(FetchEvent::Progress {
        received: 512,
        expected: 1024,
    })
    .unwrap();
    assert_eq!(v.indicator().progress(), 0.5);

    v.handle(FetchEvent::Progress {
        received: 700,
        expected: -1,
    })
    .unwrap();
    assert_eq!(v.indicator().progress(), 0.5);
}

#[test]
fn success_reveals_and_failure_does_not() {
    let mut ok = view();
    ok.handle(FetchEvent::Complete { success: true }).unwrap();
    assert_eq!(ok.indicator().state(), IndicatorState::Revealing);
    assert!(ok.host().borrow().is_masked());

    let mut bad = view();
    bad.handle(FetchEvent::Progress {
        received: 3,
        expected: 10,
    })
    .unwrap();
    bad.handle(FetchEvent::Complete { success: false }).unwrap();
    assert!(bad.failed());
    assert_eq!(bad.indicator().state(), IndicatorState::Loading);
    assert!((bad.indicator().progress() - 0.3).abs() < 1e-9);
    assert!(!bad.host().borrow().is_masked());
}

#[test]
fn second_success_is_reported_as_misuse() {
    let mut v = view();
    v.handle(FetchEvent::Complete { success: true }).unwrap();
    let err = v
        .handle(FetchEvent::Complete { success: true })
        .unwrap_err();
    assert!(err.is_invalid_state());
}

#[test]
fn resize_recenters_the_ring_before_reveal() {
    let mut v = view();
    v.resize(Rect::new(0.0, 0.0, 200.0, 80.0));
    assert_eq!(
        v.indicator().ring_path().center,
        crate::foundation::core::Point::new(100.0, 40.0)
    );
}

#[test]
fn advance_runs_the_reveal_to_an_unmasked_host() {
    let mut v = view();
    v.handle(FetchEvent::Complete { success: true }).unwrap();
    assert_eq!(v.advance(Duration::from_millis(400)), None);
    assert!(v.host().borrow().is_masked());
    assert_eq!(
        v.advance(Duration::from_millis(600)),
        Some(AnimationStop { finished: true })
    );
    assert!(!v.host().borrow().is_masked());
    assert_eq!(v.indicator().state(), IndicatorState::Revealed);
}

#[test]
fn dropping_the_view_mid_reveal_is_clean() {
    let mut v = view();
    v.handle(FetchEvent::Complete { success: true }).unwrap();
    v.advance(Duration::from_millis(100));
    let host = v.host().clone();
    drop(v);
    assert!(!host.borrow().is_masked());
}
