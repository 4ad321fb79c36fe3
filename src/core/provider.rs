use crate::core::record::DNSRecord;
use crate::error::Error;
use async_trait::async_trait;

/// Batch record management against one zone.
///
/// Every mutating call returns only the records it actually processed;
/// records the provider cannot handle are dropped from the result without an
/// error.
#[async_trait]
pub trait DNSProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn get_records(&self, zone: &str) -> Result<Vec<DNSRecord>, Error>;
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
}
