//! ICC soft-proof transform built on LittleCMS

use std::path::Path;

use anyhow::{Context, Result};
use lcms2::{DisallowCache, Flags, GlobalContext, Intent, PixelFormat, Profile, Transform};

/// Cache-disabled RGB8 transform; `Sync`, so it can be shared read-only
/// across request handlers without locking.
type Rgb8Transform = Transform<[u8; 3], [u8; 3], GlobalContext, DisallowCache>;

/// Precomputed color transform mapping device-gamut RGB back into the
/// working space, previewing how the image will look once printed.
pub struct ProofTransform {
    transform: Rgb8Transform,
}

impl ProofTransform {
    /// Build from an ICC profile pair loaded from disk. Called once at startup.
    pub fn from_files(device: &Path, working: &Path) -> Result<Self> {
        let device_profile = Profile::new_file(device)
            .with_context(|| format!("failed to load device profile {}", device.display()))?;
        let working_profile = Profile::new_file(working)
            .with_context(|| format!("failed to load working profile {}", working.display()))?;
        Self::new(&device_profile, &working_profile)
    }

    pub fn new(device: &Profile, working: &Profile) -> Result<Self> {
        let transform = Transform::new_flags_context(
            GlobalContext::new(),
            device,
            PixelFormat::RGB_8,
            working,
            PixelFormat::RGB_8,
            Intent::Perceptual,
            Flags::NO_CACHE,
        )
        .context("failed to build proof transform")?;

        Ok(Self { transform })
    }

    /// Remap pixels in place.
    pub fn apply(&self, pixels: &mut [[u8; 3]]) {
        self.transform.transform_in_place(pixels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_srgb_to_srgb_is_near_identity() {
        let srgb = Profile::new_srgb();
        let proof = ProofTransform::new(&srgb, &srgb).unwrap();

        let mut pixels = [[0u8, 0, 0], [255, 255, 255], [200, 100, 50]];
        let original = pixels;
        proof.apply(&mut pixels);

        for (got, want) in pixels.iter().zip(original.iter()) {
            for c in 0..3 {
                assert!((got[c] as i16 - want[c] as i16).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_missing_profile_file_fails() {
        let result = ProofTransform::from_files(
            Path::new("no/such/profile.icc"),
            Path::new("no/such/other.icm"),
        );
        assert!(result.is_err());
    }
}
