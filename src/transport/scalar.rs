use chrono::DateTime;
use serde::Deserialize;
use serde::de::Error as DeError;

use crate::domain::Timestamp;

/// Text field that Comtele may send as a JSON string, number or boolean.
///
/// Numbers keep their raw JSON token so `3` stays `"3"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportText(String);

impl TransportText {
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            Some(b't' | b'f') if token == "true" || token == "false" => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom(
                "expected text field to be JSON string, number or boolean",
            )),
        }
    }
}

/// Date-time sent by Comtele as a string, with or without an offset.
///
/// Offsets are dropped; the local wall-clock part is kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTimestamp(Timestamp);

impl TransportTimestamp {
    pub fn into_timestamp(self) -> Timestamp {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(value.trim()) {
            return Ok(Self(Timestamp::new(parsed.naive_local())));
        }
        Timestamp::parse("timestamp", &value)
            .map(Self)
            .map_err(D::Error::custom)
    }
}
