use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

use crate::core::record::{DNSRecord, TXT};
use crate::providers::ispconfig::error::ISPConfigProviderError;

pub const DEFAULT_TTL: u64 = 60;
pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Remote API functions, selected by the query string of the endpoint URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Login,
    ZoneGetId,
    ZoneGet,
    RecordsByZone,
    TxtAdd,
    TxtUpdate,
    TxtDelete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Login => "login",
            Method::ZoneGetId => "dns_zone_get_id",
            Method::ZoneGet => "dns_zone_get",
            Method::RecordsByZone => "dns_rr_get_all_by_zone",
            Method::TxtAdd => "dns_txt_add",
            Method::TxtUpdate => "dns_txt_update",
            Method::TxtDelete => "dns_txt_delete",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct ZoneIdRequest<'a> {
    pub session_id: &'a str,
    pub origin: &'a str,
}

#[derive(Serialize)]
pub struct ZoneRequest<'a> {
    pub session_id: &'a str,
    pub primary_id: i64,
}

#[derive(Serialize)]
pub struct ZoneRecordsRequest<'a> {
    pub session_id: &'a str,
    pub zone_id: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChangeParams {
    pub server_id: i64,
    pub name: String,
    pub active: &'static str,
    #[serde(rename = "type")]
    pub record_type: &'static str,
    pub data: String,
    pub zone: i64,
    pub ttl: u64,
    pub update_serial: bool,
    pub stamp: String,
}

#[derive(Serialize)]
pub struct ChangeRequest<'a> {
    pub session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_id: Option<&'a str>,
    pub client_id: Option<i64>,
    pub rr_type: &'static str,
    pub params: ChangeParams,
}

impl<'a> ChangeRequest<'a> {
    pub fn new(session_id: &'a str, primary_id: Option<&'a str>, params: ChangeParams) -> Self {
        Self {
            session_id,
            primary_id,
            client_id: None,
            rr_type: TXT,
            params,
        }
    }
}

#[derive(Serialize)]
pub struct DeleteRequest<'a> {
    pub session_id: &'a str,
    pub primary_id: &'a str,
}

/// Wrapper around every remote API result.
#[derive(Deserialize, Debug)]
pub struct Envelope {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    pub response: Option<Value>,
}

/// One row of `dns_rr_get_all_by_zone`. The remote side encodes numbers as
/// strings; unparsable `ttl`/`aux` values read as zero.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ISPConfigRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub ttl: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub aux: u32,
}

#[derive(Deserialize, Debug)]
struct ZoneInfo {
    #[serde(deserialize_with = "strict_i64")]
    server_id: i64,
}

/// Decoded `response` field. Each [`Method`] yields exactly one variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    SessionId(String),
    ZoneId(i64),
    Zone { server_id: i64 },
    Records(Vec<ISPConfigRecord>),
    RecordId(String),
    Ack(Value),
}

impl Payload {
    pub fn decode(method: Method, response: Value) -> Result<Self, ISPConfigProviderError> {
        let malformed = |reason: String| ISPConfigProviderError::MalformedResponse { method, reason };
        match method {
            Method::Login => match response {
                Value::String(id) if !id.is_empty() => Ok(Payload::SessionId(id)),
                other => Err(malformed(format!(
                    "expected session id string, got {}",
                    json_kind(&other)
                ))),
            },
            Method::ZoneGetId => as_integer(&response).map(Payload::ZoneId).ok_or_else(|| {
                malformed(format!("expected zone id, got {}", json_kind(&response)))
            }),
            Method::ZoneGet => serde_json::from_value::<ZoneInfo>(response)
                .map(|zone| Payload::Zone {
                    server_id: zone.server_id,
                })
                .map_err(|e| malformed(e.to_string())),
            Method::RecordsByZone => serde_json::from_value::<Vec<ISPConfigRecord>>(response)
                .map(Payload::Records)
                .map_err(|e| malformed(e.to_string())),
            Method::TxtAdd => match response {
                Value::String(id) => Ok(Payload::RecordId(id)),
                Value::Number(id) => Ok(Payload::RecordId(id.to_string())),
                other => Err(malformed(format!(
                    "expected record id, got {}",
                    json_kind(&other)
                ))),
            },
            Method::TxtUpdate | Method::TxtDelete => Ok(Payload::Ack(response)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Payload::SessionId(_) => "session id",
            Payload::ZoneId(_) => "zone id",
            Payload::Zone { .. } => "zone",
            Payload::Records(_) => "record list",
            Payload::RecordId(_) => "record id",
            Payload::Ack(_) => "acknowledgement",
        }
    }

    pub fn unexpected(&self, method: Method) -> ISPConfigProviderError {
        ISPConfigProviderError::MalformedResponse {
            method,
            reason: format!("unexpected {} payload", self.kind()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn strict_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(d)?;
    as_integer(&value)
        .ok_or_else(|| D::Error::custom(format!("expected integer, got {}", json_kind(&value))))
}

fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(as_integer(&value)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0))
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string, got {}",
            json_kind(&other)
        ))),
    }
}

pub fn to_dns_record(rec: ISPConfigRecord) -> DNSRecord {
    DNSRecord {
        id: rec.id,
        record_type: rec.record_type,
        name: rec.name,
        value: rec.data,
        ttl: Duration::from_secs(u64::from(rec.ttl)),
        priority: rec.aux,
    }
}

pub fn to_change_params(rec: &DNSRecord, zone_id: i64, server_id: i64, stamp: &str) -> ChangeParams {
    let ttl = match rec.ttl.as_secs() {
        0 => DEFAULT_TTL,
        secs => secs,
    };
    ChangeParams {
        server_id,
        name: rec.name.clone(),
        active: "Y",
        record_type: TXT,
        data: rec.value.clone(),
        zone: zone_id,
        ttl,
        update_serial: true,
        stamp: stamp.to_string(),
    }
}

pub fn stamp_now() -> String {
    chrono::Local::now().format(STAMP_FORMAT).to_string()
}
