//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the SDK request core:
//! - Logging and tracing infrastructure
//! - Configuration management and execution mode detection
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the other crates depend on. It
//! establishes the logging conventions and the validated configuration the
//! HTTP client factory is built from.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ExecutionMode, FetchConfig, FetchConfigBuilder};
pub use error::{Error, Result};
