//! Shared scalar types and identifier minting.

use uuid::Uuid;

/// All timestamps are UTC. On the wire they carry millisecond precision
/// (see [`iso_millis`]).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Entity schema version for every record this service produces.
pub const SCHEMA_VERSION: i32 = 1;

/// Drop sub-millisecond precision so stored and re-parsed instants compare
/// equal to freshly minted ones.
pub fn truncate_to_millis(t: Timestamp) -> Timestamp {
    chrono::DateTime::from_timestamp_millis(t.timestamp_millis()).unwrap_or(t)
}

fn prefixed_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// Mint a draft identifier (`drf_` prefix).
pub fn new_draft_id() -> String {
    prefixed_id("drf")
}

/// Mint a project identifier (`prj_` prefix).
pub fn new_project_id() -> String {
    prefixed_id("prj")
}

/// Serde adapter serializing a [`Timestamp`] as ISO-8601 UTC with exactly
/// millisecond precision (`2024-01-02T03:04:05.678Z`).
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// [`iso_millis`] for optional fields. Combine with
/// `#[serde(default, skip_serializing_if = "Option::is_none")]` so absent
/// optionals are elided from the canonical form.
pub mod iso_millis_opt {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        t: &Option<DateTime<Utc>>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_str(&t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        raw.map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|t| t.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}
