//! Conversion service configuration

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: Option<AuthConfig>,
    pub profiles: ProfilesConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Single shared-secret credential for HTTP Basic Auth.
/// When the section is absent, the service runs unauthenticated.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// ICC profile pair: the working space the pipeline operates in and the
/// device profile whose output gamut the conversion emulates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
    pub working: PathBuf,
    pub device: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub max_dim: u32,
    pub jpeg_quality: u8,
    pub unsharp_radius: f32,
    pub unsharp_percent: u32,
    pub unsharp_threshold: u8,
    pub max_payload_size: usize,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_path() -> &'static str {
        "config.toml"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: None,
            profiles: ProfilesConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8443,
            tls: None,
        }
    }
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            working: PathBuf::from("calibration/sRGB.icm"),
            device: PathBuf::from("calibration/instax-sp1_00.icc"),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dim: 640,
            jpeg_quality: 100,
            // Best visually from experimentation
            unsharp_radius: 0.6,
            unsharp_percent: 200,
            unsharp_threshold: 0,
            max_payload_size: 15 * 1024 * 1024,
        }
    }
}
