// src/models.rs
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Text layout of `created_at` in storage and JSON output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One stored generation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRecord {
    pub id: i64,
    pub value: String,
    pub base: Option<String>,
    pub label: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    pub owner: Option<String>,
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPasswordRecord {
    pub value: String,
    pub base: Option<String>,
    pub label: Option<String>,
    pub created_at: NaiveDateTime,
    pub owner: Option<String>,
}

impl NewPasswordRecord {
    /// Stamps the record with the current local time, whole seconds only.
    pub fn new(value: String, base: Option<String>) -> Self {
        Self {
            value,
            base,
            label: None,
            created_at: now_truncated(),
            owner: None,
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    pub fn into_record(self, id: i64) -> PasswordRecord {
        PasswordRecord {
            id,
            value: self.value,
            base: self.base,
            label: self.label,
            created_at: self.created_at,
            owner: self.owner,
        }
    }
}

// Input to the generation facade. Either `base` or `length` drives the result.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub base: Option<String>,
    pub length: Option<i64>,
    pub label: Option<String>,
    pub owner: Option<String>,
}

impl GenerationRequest {
    pub fn from_base(base: impl Into<String>) -> Self {
        Self {
            base: Some(base.into()),
            ..Default::default()
        }
    }

    pub fn random(length: i64) -> Self {
        Self {
            length: Some(length),
            ..Default::default()
        }
    }
}

pub fn now_truncated() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
}

mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_timestamp(&text).map_err(serde::de::Error::custom)
    }
}
