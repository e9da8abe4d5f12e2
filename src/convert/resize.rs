//! Long-edge resampling

use image::imageops::FilterType;
use image::RgbImage;

/// Scale both edges by `max(width, height) / max_dim` with integer
/// truncation, so the longest edge lands exactly on `max_dim`. Small
/// images are scaled up by the same rule.
pub fn fit_long_edge(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    let longest = width.max(height) as u64;
    let new_w = (width as u64 * max_dim as u64 / longest) as u32;
    let new_h = (height as u64 * max_dim as u64 / longest) as u32;

    // Guarantee at least 1px for extreme aspect ratios
    (new_w.max(1), new_h.max(1))
}

pub fn resample(img: &RgbImage, width: u32, height: u32) -> RgbImage {
    image::imageops::resize(img, width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portrait_long_edge_hits_target() {
        let (w, h) = fit_long_edge(100, 200, 640);
        assert_eq!(w, 320);
        assert_eq!(h, 640);
    }

    #[test]
    fn test_landscape_long_edge_hits_target() {
        let (w, h) = fit_long_edge(1920, 1080, 640);
        assert_eq!(w, 640);
        assert_eq!(h, 360);
    }

    #[test]
    fn test_square_image() {
        let (w, h) = fit_long_edge(1000, 1000, 640);
        assert_eq!(w, 640);
        assert_eq!(h, 640);
    }

    #[test]
    fn test_small_image_is_upscaled() {
        let (w, h) = fit_long_edge(100, 50, 640);
        assert_eq!(w, 640);
        assert_eq!(h, 320);
    }

    #[test]
    fn test_short_edge_truncates() {
        // 333 * 640 / 1000 = 213.12, truncated
        let (w, h) = fit_long_edge(1000, 333, 640);
        assert_eq!(w, 640);
        assert_eq!(h, 213);
    }

    #[test]
    fn test_extreme_aspect_keeps_one_pixel() {
        let (w, h) = fit_long_edge(1, 10000, 640);
        assert_eq!(w, 1);
        assert_eq!(h, 640);
    }

    #[test]
    fn test_resample_produces_requested_dimensions() {
        let img = RgbImage::new(100, 200);
        let resized = resample(&img, 320, 640);
        assert_eq!(resized.dimensions(), (320, 640));
    }
}
