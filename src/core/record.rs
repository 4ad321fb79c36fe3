use serde::Serialize;
use std::time::Duration;

pub const TXT: &str = "TXT";

/// A DNS resource record as seen by callers of a [`DNSProvider`].
///
/// `id` stays empty until the remote system assigns one.
///
/// [`DNSProvider`]: crate::core::provider::DNSProvider
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DNSRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub value: String,
    #[serde(serialize_with = "serialize_secs")]
    pub ttl: Duration,
    pub priority: u32,
}

impl DNSRecord {
    pub fn txt(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            record_type: TXT.to_string(),
            name: name.into(),
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn is_txt(&self) -> bool {
        self.record_type.eq_ignore_ascii_case(TXT)
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }
}

fn serialize_secs<S: serde::Serializer>(ttl: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(ttl.as_secs())
}
