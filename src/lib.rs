//! Instant-Film Soft-Proof Conversion Service Library

pub mod api;
pub mod config;
pub mod convert;

pub use config::Config;
