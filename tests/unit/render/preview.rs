use std::time::Duration;

use super::*;
use crate::image_view::FetchEvent;
use crate::indicator::config::IndicatorConfig;

const BLUE: Rgba8 = Rgba8::rgba(0, 0, 255, 255);

fn view() -> LoadingImageView {
    LoadingImageView::new(
        kurbo::Rect::new(0.0, 0.0, 100.0, 100.0),
        IndicatorConfig::default(),
    )
    .unwrap()
}

#[test]
fn over_with_zero_coverage_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 200, 200, 255], 0.0), dst);
}

#[test]
fn over_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn loading_frame_shows_placeholder_and_partial_ring() {
    let mut v = view();
    v.handle(FetchEvent::Progress {
        received: 1,
        expected: 4,
    })
    .unwrap();
    let img = solid(100, 100, BLUE);
    let frame = render_view(&v, &img);
    assert_eq!(frame.dimensions(), (100, 100));

    // Placeholder hides the image.
    assert_eq!(frame.get_pixel(5, 5).0, [255, 255, 255, 255]);
    // Top of the ring (start point) is drawn.
    assert_eq!(frame.get_pixel(50, 30).0, [255, 0, 0, 255]);
    // Bottom of the ring is past 25% and not drawn.
    assert_eq!(frame.get_pixel(50, 69).0, [255, 255, 255, 255]);
}

#[test]
fn revealing_frame_shows_image_only_under_the_mask() {
    let mut v = view();
    v.handle(FetchEvent::Complete { success: true }).unwrap();
    let img = solid(100, 100, BLUE);
    let frame = render_view(&v, &img);

    // On the ring: image visible.
    assert_eq!(frame.get_pixel(50, 30).0, [0, 0, 255, 255]);
    // Corner and center: hidden.
    assert_eq!(frame.get_pixel(0, 0).0[3], 0);
    assert_eq!(frame.get_pixel(50, 50).0[3], 0);
}

#[test]
fn revealed_frame_is_the_plain_image() {
    let mut v = view();
    v.handle(FetchEvent::Complete { success: true }).unwrap();
    v.advance(Duration::from_secs(1));
    let img = solid(100, 100, BLUE);
    let frame = render_view(&v, &img);
    assert_eq!(frame, img);
}

#[test]
fn image_is_resized_to_host_bounds() {
    let mut v = view();
    v.handle(FetchEvent::Complete { success: true }).unwrap();
    v.advance(Duration::from_secs(1));
    let frame = render_view(&v, &solid(10, 20, BLUE));
    assert_eq!(frame.dimensions(), (100, 100));
    assert_eq!(frame.get_pixel(42, 17).0, [0, 0, 255, 255]);
}
