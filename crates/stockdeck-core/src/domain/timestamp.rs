use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::ValidationError;

/// Timestamp normalized to UTC.
///
/// The backend serializes record times with Python's `isoformat()`, which
/// omits the offset for naive values. Those are read as UTC; values that do
/// carry an offset are converted to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();

        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self::from_offset_datetime(parsed));
        }

        let naive = format_description!(
            version = 2,
            "[year]-[month]-[day][first [T] [ ]][hour]:[minute]:[second][optional [.[subsecond]]]"
        );
        PrimitiveDateTime::parse(trimmed, naive)
            .map(|parsed| Self(parsed.assume_utc()))
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    pub fn from_offset_datetime(value: OffsetDateTime) -> Self {
        Self(value.to_offset(UtcOffset::UTC))
    }

    pub fn from_unix_timestamp(seconds: i64) -> Result<Self, ValidationError> {
        OffsetDateTime::from_unix_timestamp(seconds)
            .map(Self)
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: seconds.to_string(),
            })
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_rfc3339(self) -> String {
        // UTC values inside the RFC3339 year range always format.
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
