use image::{Rgba, RgbaImage, imageops::FilterType};

use crate::{
    foundation::core::{Point, Rgba8},
    geometry::ring::RingShape,
    host::view::HostView,
    image_view::LoadingImageView,
    indicator::loader::Overlay,
};

/// Subsamples per axis used to estimate shape coverage.
const SUPERSAMPLE: u32 = 2;

fn coverage(shape: &RingShape, x0: f64, y0: f64) -> f64 {
    let step = 1.0 / f64::from(SUPERSAMPLE);
    let mut hits = 0u32;
    for sy in 0..SUPERSAMPLE {
        for sx in 0..SUPERSAMPLE {
            let p = Point::new(
                x0 + (f64::from(sx) + 0.5) * step,
                y0 + (f64::from(sy) + 0.5) * step,
            );
            if shape.covers(p) {
                hits += 1;
            }
        }
    }
    f64::from(hits) / f64::from(SUPERSAMPLE * SUPERSAMPLE)
}

/// Straight-alpha source-over, with the source alpha scaled by `cov`.
fn over(dst: [u8; 4], src: [u8; 4], cov: f64) -> [u8; 4] {
    let sa = f64::from(src[3]) / 255.0 * cov.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }
    let da = f64::from(dst[3]) / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (f64::from(src[i]) * sa + f64::from(dst[i]) * da * (1.0 - sa)) / oa;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (oa * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

fn scale_alpha(px: [u8; 4], cov: f64) -> [u8; 4] {
    let a = (f64::from(px[3]) * cov.clamp(0.0, 1.0)).round() as u8;
    [px[0], px[1], px[2], a]
}

/// Compose what the host shows: the image, the indicator's overlay on top of it, and the
/// host mask limiting both.
///
/// The output covers the host bounds; `image` is resized to fit when its size differs.
pub fn render_preview(host: &HostView, overlay: Option<&Overlay>, image: &RgbaImage) -> RgbaImage {
    let bounds = host.bounds();
    let w = bounds.width().abs().ceil().max(0.0) as u32;
    let h = bounds.height().abs().ceil().max(0.0) as u32;
    if w == 0 || h == 0 {
        return RgbaImage::new(w, h);
    }

    let resized;
    let src = if image.dimensions() == (w, h) {
        image
    } else {
        resized = image::imageops::resize(image, w, h, FilterType::Triangle);
        &resized
    };

    let mask = host.mask().get().map(|m| &m.shape);
    let background = overlay.map(|o| o.background.to_array());
    let stroke: Option<([u8; 4], &RingShape)> =
        overlay.map(|o| (o.stroke_color.to_array(), &o.ring));

    let mut out = RgbaImage::new(w, h);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let x0 = bounds.x0 + f64::from(x);
        let y0 = bounds.y0 + f64::from(y);

        let mut c = src.get_pixel(x, y).0;
        if let Some(bg) = background {
            c = over(c, bg, 1.0);
        }
        if let Some((color, ring)) = stroke {
            let cov = coverage(ring, x0, y0);
            if cov > 0.0 {
                c = over(c, color, cov);
            }
        }
        if let Some(shape) = mask {
            c = scale_alpha(c, coverage(shape, x0, y0));
        }
        *px = Rgba(c);
    }
    out
}

/// [`render_preview`] for a [`LoadingImageView`].
pub fn render_view(view: &LoadingImageView, image: &RgbaImage) -> RgbaImage {
    let overlay = view.indicator().overlay();
    let host = view.host().borrow();
    render_preview(&host, overlay.as_ref(), image)
}

/// Solid-color image, handy as a stand-in for a decoded photo.
pub fn solid(width: u32, height: u32, color: Rgba8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color.to_array()))
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
