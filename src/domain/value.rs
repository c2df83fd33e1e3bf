use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Comtele API key.
///
/// Invariant: non-empty after trimming. `Debug` output is redacted.
pub struct ApiKey(String);

impl ApiKey {
    /// HTTP header carrying the key on every request.
    pub const HEADER: &'static str = "auth-key";

    /// Name used in validation errors.
    pub const FIELD: &'static str = "api key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender identifier shown to the receiver (`Sender`).
///
/// Invariant: non-empty after trimming.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used by Comtele (`Sender`).
    pub const FIELD: &'static str = "Sender";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Free message text (`Content`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by Comtele (`Content`).
    pub const FIELD: &'static str = "Content";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Name of a context rule configured on the Comtele account (`ContextRuleName`).
///
/// Invariant: non-empty after trimming.
pub struct ContextName(String);

impl ContextName {
    /// JSON field name used by Comtele (`ContextRuleName`).
    pub const FIELD: &'static str = "ContextRuleName";

    /// Create a validated [`ContextName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated context name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Receiver phone number, sent as-is (`Receivers`).
///
/// Invariant: non-empty after trimming. No normalization is performed.
pub struct Receiver(String);

impl Receiver {
    /// JSON field name used by Comtele (`Receivers`).
    pub const FIELD: &'static str = "Receivers";

    /// Create a validated (non-empty) receiver.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Split a comma-separated list into receivers, skipping blank entries.
    ///
    /// Fails with [`ValidationError::Empty`] if no receiver remains.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ValidationError> {
        let receivers = input
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Self::new)
            .collect::<Result<Vec<_>, _>>()?;
        if receivers.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(receivers)
    }

    /// Raw (trimmed) value as sent to Comtele.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Wall-clock timestamp as exchanged with Comtele.
///
/// Comtele does not carry offsets; values are naive local times of the account.
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Format used on the wire and in CSV reports.
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    const DATE_TIME_FORMATS: [&'static str; 6] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];

    const DATE_FORMATS: [&'static str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

    /// Wrap an already-parsed date-time.
    pub fn new(value: NaiveDateTime) -> Self {
        Self(value)
    }

    /// Parse user input. A bare date means midnight of that day.
    ///
    /// `field` names the input in the returned [`ValidationError::InvalidDate`].
    pub fn parse(field: &'static str, input: &str) -> Result<Self, ValidationError> {
        Self::parse_with_default_time(field, input, NaiveTime::MIN)
    }

    /// Parse the last bound of an inclusive range. A bare date means the last
    /// second of that day.
    pub fn parse_end_of_day(field: &'static str, input: &str) -> Result<Self, ValidationError> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Self::parse_with_default_time(field, input, end_of_day)
    }

    fn parse_with_default_time(
        field: &'static str,
        input: &str,
        time: NaiveTime,
    ) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidDate {
            field,
            input: input.to_owned(),
        };
        if trimmed.is_empty() {
            return Err(invalid());
        }

        for format in Self::DATE_TIME_FORMATS {
            if let Ok(value) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Self(value));
            }
        }
        for format in Self::DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(Self(date.and_time(time)));
            }
        }
        Err(invalid())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}
