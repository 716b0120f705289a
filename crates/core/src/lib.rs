//! Searchlight Core Library
//!
//! This crate provides the foundational utilities for the Searchlight CLI:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration for the hosted search and embedding services

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
