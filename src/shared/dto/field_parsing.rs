//! Lenient decoding for form-driven clients: blank strings mean "unset",
//! and a user reference may arrive as an id or as an embedded summary.

use chrono::{DateTime, Utc};
use serde::{de::Error, Deserialize, Deserializer};
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(untagged)]
enum UserRef {
    Id(String),
    Summary { id: Uuid },
}

/// `null`, `""`, `"<uuid>"` or `{ "id": "<uuid>", ... }`.
pub fn user_ref<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<UserRef>::deserialize(deserializer)? {
        None => Ok(None),
        Some(UserRef::Summary { id }) => Ok(Some(id)),
        Some(UserRef::Id(raw)) if raw.trim().is_empty() => Ok(None),
        Some(UserRef::Id(raw)) => Uuid::parse_str(raw.trim())
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid user id `{raw}`"))),
    }
}

/// `null`, `""` or an RFC 3339 timestamp.
pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw.trim())
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| D::Error::custom(format!("invalid timestamp `{raw}`"))),
    }
}

/// For patches: absent stays `None` (via `#[serde(default)]`), while a
/// present `null`/`""` becomes `Some(None)` and clears the field.
pub fn patch_timestamp<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_timestamp(deserializer).map(Some)
}
