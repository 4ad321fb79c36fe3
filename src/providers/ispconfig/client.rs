use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::auth::credentials::{CredentialManager, PASSWORD_KEY, USERNAME_KEY};
use crate::core::record::DNSRecord;
use crate::providers::ispconfig::error::ISPConfigProviderError;
use crate::providers::ispconfig::session::SessionCache;
use crate::providers::ispconfig::types::*;

#[derive(Debug, Clone, Deserialize)]
pub struct ISPConfigConfig {
    /// Remote API URL, e.g. `https://panel.example.com:8080/remote/json.php`.
    pub endpoint: String,
}

pub struct ISPConfigProvider {
    config: ISPConfigConfig,
    client: Client,
    credentials: Arc<dyn CredentialManager>,
    session: SessionCache,
}

impl fmt::Debug for ISPConfigProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ISPConfigProvider")
            .field("endpoint", &self.config.endpoint)
            .field("logged_in", &self.session.get().is_some())
            .finish()
    }
}

impl ISPConfigProvider {
    /// Builds the provider without contacting the server; login happens on
    /// first use.
    pub fn new(
        config: ISPConfigConfig,
        credentials: Arc<dyn CredentialManager>,
    ) -> Result<Self, ISPConfigProviderError> {
        let client = Client::builder().build()?;

        Ok(Self {
            config,
            client,
            credentials,
            session: SessionCache::default(),
        })
    }

    pub(crate) async fn api_request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        data: &T,
    ) -> Result<Payload, ISPConfigProviderError> {
        let url = format!("{}?{}", self.config.endpoint, method);
        debug!(%method, "calling remote API");

        let response = self.client.post(url).json(data).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                return Err(ISPConfigProviderError::Status {
                    method,
                    status,
                    body,
                });
            }
            Err(e) => return Err(e.into()),
        };

        // Only a literal `false` is a remote failure; `null` is left to the
        // per-method decoding.
        match envelope.response.unwrap_or(Value::Null) {
            Value::Bool(false) => {
                debug!(%method, code = %envelope.code, "remote API reported failure");
                Err(ISPConfigProviderError::Remote {
                    method,
                    code: envelope.code,
                    message: envelope.message,
                })
            }
            Value::Null if !status.is_success() => Err(ISPConfigProviderError::Status {
                method,
                status,
                body,
            }),
            response => Payload::decode(method, response),
        }
    }

    pub(crate) async fn authenticate(&self) -> Result<&str, ISPConfigProviderError> {
        self.session.get_or_login(|| self.login()).await
    }

    async fn login(&self) -> Result<String, ISPConfigProviderError> {
        let username = self
            .credentials
            .get(USERNAME_KEY)
            .map_err(|e| ISPConfigProviderError::Credential(e.to_string()))?;
        let password = self
            .credentials
            .get(PASSWORD_KEY)
            .map_err(|e| ISPConfigProviderError::Credential(e.to_string()))?;

        info!(endpoint = %self.config.endpoint, %username, "logging in");
        let login = LoginRequest {
            username: &username,
            password: &password,
        };
        match self.api_request(Method::Login, &login).await? {
            Payload::SessionId(id) => Ok(id),
            other => Err(other.unexpected(Method::Login)),
        }
    }

    fn session_id(&self) -> Result<&str, ISPConfigProviderError> {
        self.session
            .get()
            .ok_or(ISPConfigProviderError::NotAuthenticated)
    }

    /// Resolves the zone id for `origin`. Exactly one trailing dot is
    /// stripped before the lookup.
    pub async fn zone_id(&self, origin: &str) -> Result<i64, ISPConfigProviderError> {
        let session_id = self.session_id()?;
        let origin = origin.strip_suffix('.').unwrap_or(origin);

        let req = ZoneIdRequest { session_id, origin };
        match self.api_request(Method::ZoneGetId, &req).await? {
            Payload::ZoneId(id) => {
                debug!(origin, zone_id = id, "resolved zone");
                Ok(id)
            }
            other => Err(other.unexpected(Method::ZoneGetId)),
        }
    }

    pub async fn server_id(&self, zone_id: i64) -> Result<i64, ISPConfigProviderError> {
        let session_id = self.session_id()?;

        let req = ZoneRequest {
            session_id,
            primary_id: zone_id,
        };
        match self.api_request(Method::ZoneGet, &req).await? {
            Payload::Zone { server_id } => Ok(server_id),
            other => Err(other.unexpected(Method::ZoneGet)),
        }
    }

    pub async fn get_records(&self, zone: &str) -> Result<Vec<DNSRecord>, ISPConfigProviderError> {
        let session_id = self.authenticate().await?;
        let zone_id = self.zone_id(zone).await?;

        let req = ZoneRecordsRequest {
            session_id,
            zone_id,
        };
        match self.api_request(Method::RecordsByZone, &req).await? {
            Payload::Records(records) => Ok(records.into_iter().map(to_dns_record).collect()),
            other => Err(other.unexpected(Method::RecordsByZone)),
        }
    }

    pub async fn append_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, ISPConfigProviderError> {
        let session_id = self.authenticate().await?;
        let zone_id = self.zone_id(zone).await?;
        let server_id = self.server_id(zone_id).await?;

        let mut added = Vec::new();
        for mut record in records {
            if !record.is_txt() {
                debug!(name = %record.name, record_type = %record.record_type, "skipping non-TXT record");
                continue;
            }

            let params = to_change_params(&record, zone_id, server_id, &stamp_now());
            let req = ChangeRequest::new(session_id, None, params);
            match self.api_request(Method::TxtAdd, &req).await? {
                Payload::RecordId(id) => record.id = id,
                other => return Err(other.unexpected(Method::TxtAdd)),
            }

            info!(zone, name = %record.name, id = %record.id, "added TXT record");
            added.push(record);
        }

        Ok(added)
    }

    /// Sends every TXT record through `dns_txt_update`. `primary_id` is only
    /// present when the record carries an id.
    pub async fn set_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, ISPConfigProviderError> {
        let session_id = self.authenticate().await?;
        let zone_id = self.zone_id(zone).await?;
        let server_id = self.server_id(zone_id).await?;

        let mut updated = Vec::new();
        for record in records {
            if !record.is_txt() {
                debug!(name = %record.name, record_type = %record.record_type, "skipping non-TXT record");
                continue;
            }

            let params = to_change_params(&record, zone_id, server_id, &stamp_now());
            let primary_id = record.has_id().then_some(record.id.as_str());
            let req = ChangeRequest::new(session_id, primary_id, params);
            self.api_request(Method::TxtUpdate, &req).await?;

            info!(zone, name = %record.name, id = %record.id, "updated TXT record");
            updated.push(record);
        }

        Ok(updated)
    }

    /// Deletes TXT records by id. The zone is not looked up since record ids
    /// are unique server-wide.
    pub async fn delete_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, ISPConfigProviderError> {
        let session_id = self.authenticate().await?;

        let mut removed = Vec::new();
        for record in records {
            if !record.is_txt() || !record.has_id() {
                debug!(name = %record.name, record_type = %record.record_type, "skipping record without TXT id");
                continue;
            }

            let req = DeleteRequest {
                session_id,
                primary_id: &record.id,
            };
            self.api_request(Method::TxtDelete, &req).await?;

            info!(zone, name = %record.name, id = %record.id, "deleted TXT record");
            removed.push(record);
        }

        Ok(removed)
    }
}
