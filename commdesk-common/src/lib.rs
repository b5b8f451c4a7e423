//! # CommDesk Common Library
//!
//! Shared code for the CommDesk web application:
//! - Error types
//! - Configuration loading
//! - Data models (contacts, messages, profiles)
//! - Hosted-platform REST client

pub mod config;
pub mod error;
pub mod models;
pub mod platform;

pub use error::{Error, Result};
pub use platform::PlatformClient;
