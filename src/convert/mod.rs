//! Image conversion pipeline: decode, resize, sharpen, soft-proof, encode

pub mod encode;
pub mod profile;
pub mod resize;
pub mod sharpen;

use image::RgbImage;
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, PipelineConfig};
use profile::ProofTransform;
use sharpen::UnsharpParams;

/// Pipeline failures. The HTTP layer collapses all of these into a single
/// invalid-image response; the distinction only matters for logs.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("decode failed: {0}")]
    Decode(#[source] image::ImageError),

    #[error("encode failed: {0}")]
    Encode(#[source] image::ImageError),
}

/// Stateless-per-request conversion pipeline. Holds the one long-lived
/// resource, the precomputed ICC transform, and is shared read-only across
/// all requests; it is never rebuilt or mutated after startup.
pub struct Converter {
    max_dim: u32,
    quality: u8,
    unsharp: UnsharpParams,
    proof: ProofTransform,
}

impl Converter {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let proof =
            ProofTransform::from_files(&config.profiles.device, &config.profiles.working)?;
        Ok(Self::new(proof, &config.pipeline))
    }

    pub fn new(proof: ProofTransform, pipeline: &PipelineConfig) -> Self {
        Self {
            max_dim: pipeline.max_dim,
            quality: pipeline.jpeg_quality,
            unsharp: UnsharpParams {
                radius: pipeline.unsharp_radius,
                percent: pipeline.unsharp_percent,
                threshold: pipeline.unsharp_threshold,
            },
            proof,
        }
    }

    /// Run the full pipeline on raw encoded bytes, producing JPEG bytes.
    pub fn convert(&self, data: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let decoded = image::load_from_memory(data).map_err(ConvertError::Decode)?;
        let rgb = decoded.into_rgb8();

        let (new_w, new_h) = resize::fit_long_edge(rgb.width(), rgb.height(), self.max_dim);
        debug!(
            from_w = rgb.width(),
            from_h = rgb.height(),
            new_w,
            new_h,
            "resampling"
        );
        let resized = resize::resample(&rgb, new_w, new_h);
        // The full-size bitmap can be large; free it before filtering
        drop(rgb);

        let mut sharpened = sharpen::unsharp_mask(&resized, self.unsharp);
        drop(resized);

        self.apply_proof(&mut sharpened);

        encode::encode_jpeg(&sharpened, self.quality)
    }

    /// Remap colors in place through the device-emulation transform.
    fn apply_proof(&self, img: &mut RgbImage) {
        let mut pixels: Vec<[u8; 3]> = img.pixels().map(|p| p.0).collect();
        self.proof.apply(&mut pixels);
        for (dst, src) in img.pixels_mut().zip(pixels) {
            dst.0 = src;
        }
    }
}
