//! Employee Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, server-assigned employee identifier.
///
/// Only ever compared and echoed back to the server; never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EmployeeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Employee as listed by `GET /admin/employees`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub uuid: EmployeeId,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    /// Access expiry; older servers omit the field entirely
    #[serde(default, with = "timestamp")]
    pub expires_at: Option<NaiveDateTime>,
}

impl EmployeeRecord {
    pub fn new(
        uuid: impl Into<EmployeeId>,
        name: impl Into<String>,
        email: impl Into<String>,
        is_active: bool,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            email: email.into(),
            is_active,
            expires_at: None,
        }
    }

    pub fn with_expires_at(mut self, expires_at: NaiveDateTime) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}

/// Status change payload for `PATCH /admin/employees/{uuid}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub employee_uuid: EmployeeId,
    pub is_active: bool,
}

/// Timestamps arrive either naive (`2025-06-01T12:00:00.123456`) or with
/// an offset (`2025-06-01T12:00:00+02:00`); offsets are normalized to UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, ParseError};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Form written on the wire, without fraction or offset
    pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn parse(raw: &str) -> Result<NaiveDateTime, ParseError> {
        let raw = raw.trim();
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Ok(with_offset.naive_utc());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
    }

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.format(WIRE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(D::Error::custom))
            .transpose()
    }
}
