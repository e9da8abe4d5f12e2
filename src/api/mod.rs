//! HTTP API - routing, handlers, auth

pub mod auth;
pub mod html;
pub mod rest;

pub use rest::create_router;
