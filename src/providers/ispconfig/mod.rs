//! ISPConfig remote API provider (TXT records only)

pub mod client;
pub mod error;
mod session;
pub mod types;


pub use client::{ISPConfigConfig, ISPConfigProvider};
pub use error::{ISPConfigProviderError, map_error};
pub use types::{ISPConfigRecord, Method, Payload};

// --- DNSProvider trait implementation for ISPConfigProvider ---
use crate::core::provider::DNSProvider;
use crate::core::record::DNSRecord;
use crate::error::Error;
use async_trait::async_trait;

#[async_trait]
impl DNSProvider for ISPConfigProvider {
    fn name(&self) -> &str {
        "ispconfig"
    }

    async fn get_records(&self, zone: &str) -> Result<Vec<DNSRecord>, Error> {
        ISPConfigProvider::get_records(self, zone)
            .await
            .map_err(map_error)
    }

    async fn append_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        ISPConfigProvider::append_records(self, zone, records)
            .await
            .map_err(map_error)
    }

    async fn set_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        ISPConfigProvider::set_records(self, zone, records)
            .await
            .map_err(map_error)
    }

    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        ISPConfigProvider::delete_records(self, zone, records)
            .await
            .map_err(map_error)
    }
}
