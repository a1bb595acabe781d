//! # capkit core
//!
//! Error handling and configuration shared by the capkit tools.
//!
//! - **Errors**: an application error taxonomy built with `thiserror`, with
//!   serializable payloads so failures can be reported as JSON.
//! - **Configuration**: YAML files via `serde_yaml`, or layered sources with
//!   `CAPKIT__*` environment overrides via the `config` crate.
//!
//! ## Example
//!
//! ```
//! use capkit_core::config::{AppConfig, OutputFormat};
//!
//! let config = AppConfig::from_yaml("output:\n  format: json\n").unwrap();
//! assert_eq!(config.output.format, OutputFormat::Json);
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod error;

pub use config::AppConfig;
pub use error::{CapkitError, Result};
