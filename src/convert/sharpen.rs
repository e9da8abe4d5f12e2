//! Unsharp-mask sharpening

use image::imageops;
use image::RgbImage;

/// Unsharp-mask parameters: gaussian blur radius, strength as a percentage,
/// and the minimum per-channel difference that gets amplified.
#[derive(Debug, Clone, Copy)]
pub struct UnsharpParams {
    pub radius: f32,
    pub percent: u32,
    pub threshold: u8,
}

/// Increase local contrast at edges by adding back a scaled difference
/// between the image and a gaussian-blurred copy of it.
pub fn unsharp_mask(img: &RgbImage, params: UnsharpParams) -> RgbImage {
    let blurred = imageops::blur(img, params.radius);
    let amount = params.percent as f32 / 100.0;
    let threshold = params.threshold as f32;

    let mut out = img.clone();
    for (dst, blur) in out.pixels_mut().zip(blurred.pixels()) {
        for c in 0..3 {
            let orig = dst.0[c] as f32;
            let diff = orig - blur.0[c] as f32;
            if diff.abs() >= threshold {
                dst.0[c] = (orig + diff * amount).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}
