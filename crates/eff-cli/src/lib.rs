//! EFF Dashboard CLI
//!
//! The caller side of the adapter: loads example fixtures or user JSON,
//! routes it through detection and adaptation, and prints either canonical
//! JSON or a plain-text dashboard.
//!
//! Parse failures (input is not JSON) and render failures (input cannot be
//! adapted) are reported separately; nothing is partially rendered.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;

pub use config::DashboardConfig;
pub use error::{CliError, CliResult};
pub use loader::{list_fixtures, InputSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
