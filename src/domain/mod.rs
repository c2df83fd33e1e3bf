//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    ContextMessage, ContextSchedule, DeliveryStatus, DetailedReportQuery, MAX_RECEIVERS,
    ReportQuery, ScheduleMessage, SendMessage,
};
pub use response::{DeliveryRecord, OperationResult, ProviderFailure, ReplyRecord};
pub use validation::ValidationError;
pub use value::{ApiKey, ContextName, MessageText, Receiver, SenderId, Timestamp};
