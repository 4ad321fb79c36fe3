//! Manage TXT records in ISPConfig-hosted zones through its remote JSON API.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod providers;

pub use crate::core::provider::DNSProvider;
pub use crate::core::record::DNSRecord;
pub use crate::error::Error;
pub use crate::providers::ispconfig::{ISPConfigConfig, ISPConfigProvider};
