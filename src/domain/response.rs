use crate::domain::value::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome reported by Comtele for a single operation.
///
/// Invariant: `payload` is `None` whenever `success` is `false`.
pub struct OperationResult<T> {
    pub success: bool,
    pub message: String,
    pub payload: Option<T>,
}

impl<T> OperationResult<T> {
    pub fn succeeded(message: impl Into<String>, payload: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            payload,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            payload: None,
        }
    }

    /// Convert a failed result into [`ProviderFailure`], keeping the message verbatim.
    pub fn into_result(self) -> Result<(String, Option<T>), ProviderFailure> {
        if self.success {
            Ok((self.message, self.payload))
        } else {
            Err(ProviderFailure {
                message: self.message,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
/// Comtele answered the request but reported a failure.
pub struct ProviderFailure {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Inbound reply to a previously sent message.
pub struct ReplyRecord {
    pub sender: String,
    pub sender_name: String,
    pub received_date: Timestamp,
    pub received_content: String,
    pub sent_content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One line of the detailed delivery report.
pub struct DeliveryRecord {
    pub sender: String,
    pub receiver: String,
    pub content: String,
    pub system_message: String,
    pub status: String,
    pub request_date: Timestamp,
    pub schedule_date: Option<Timestamp>,
}
