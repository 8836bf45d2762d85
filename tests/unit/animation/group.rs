use super::*;
use crate::foundation::core::Point;

fn group(ease: Ease) -> AnimationGroup {
    let c = Point::new(50.0, 50.0);
    AnimationGroup::new(
        PropertyAnimation::new("path", RingPath::new(c, 20.0), RingPath::new(c, 70.0)),
        PropertyAnimation::new("lineWidth", 2.0, 140.0),
        Duration::from_secs(1),
        ease,
    )
    .unwrap()
}

#[test]
fn zero_duration_is_rejected() {
    let c = Point::ZERO;
    let res = AnimationGroup::new(
        PropertyAnimation::new("path", RingPath::new(c, 1.0), RingPath::new(c, 2.0)),
        PropertyAnimation::new("lineWidth", 1.0, 2.0),
        Duration::ZERO,
        Ease::Linear,
    );
    assert!(res.is_err());
}

#[test]
fn starts_at_from_values() {
    let g = group(Ease::EaseInEaseOut);
    let s = g.sample();
    assert_eq!(s.path.radius, 20.0);
    assert_eq!(s.line_width, 2.0);
    assert!(g.is_running());
    assert_eq!(g.stop(), None);
}

#[test]
fn both_properties_share_progress() {
    let mut g = group(Ease::EaseInEaseOut);
    for _ in 0..9 {
        assert_eq!(g.advance(Duration::from_millis(100)), None);
        let s = g.sample();
        let path_t = (s.path.radius - 20.0) / 50.0;
        let width_t = (s.line_width - 2.0) / 138.0;
        assert!((path_t - width_t).abs() < 1e-9);
    }
}

#[test]
fn linear_midpoint() {
    let mut g = group(Ease::Linear);
    g.advance(Duration::from_millis(500));
    let s = g.sample();
    assert!((s.path.radius - 45.0).abs() < 1e-9);
    assert!((s.line_width - 71.0).abs() < 1e-9);
    assert!((g.linear_progress() - 0.5).abs() < 1e-9);
}

#[test]
fn stop_is_reported_exactly_once() {
    let mut g = group(Ease::Linear);
    assert_eq!(g.advance(Duration::from_millis(999)), None);
    assert_eq!(
        g.advance(Duration::from_millis(1)),
        Some(AnimationStop { finished: true })
    );
    assert_eq!(g.advance(Duration::from_secs(5)), None);
    assert_eq!(g.cancel(), None);
    assert_eq!(g.elapsed(), Duration::from_secs(1));
    assert!(!g.is_running());

    let s = g.sample();
    assert_eq!(s.path.radius, 70.0);
    assert_eq!(s.line_width, 140.0);
}

#[test]
fn overshooting_dt_finishes_in_one_step() {
    let mut g = group(Ease::EaseInEaseOut);
    assert_eq!(
        g.advance(Duration::from_secs(10)),
        Some(AnimationStop { finished: true })
    );
}

#[test]
fn cancel_reports_unfinished_once_and_settles_on_targets() {
    let mut g = group(Ease::Linear);
    g.advance(Duration::from_millis(200));
    assert_eq!(g.cancel(), Some(AnimationStop { finished: false }));
    assert_eq!(g.cancel(), None);
    assert_eq!(g.advance(Duration::from_secs(1)), None);
    assert_eq!(g.stop(), Some(AnimationStop { finished: false }));
    assert_eq!(g.sample().line_width, 140.0);
}
