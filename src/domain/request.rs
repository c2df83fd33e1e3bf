use crate::domain::validation::ValidationError;
use crate::domain::value::{ContextName, MessageText, Receiver, SenderId, Timestamp};

pub const MAX_RECEIVERS: usize = 100;

#[derive(Debug, Clone)]
pub struct SendMessage {
    sender: SenderId,
    content: MessageText,
    receivers: Vec<Receiver>,
}

#[derive(Debug, Clone)]
pub struct ScheduleMessage {
    message: SendMessage,
    schedule_date: Timestamp,
}

#[derive(Debug, Clone)]
pub struct ContextMessage {
    sender: SenderId,
    context: ContextName,
    receivers: Vec<Receiver>,
}

#[derive(Debug, Clone)]
pub struct ContextSchedule {
    message: ContextMessage,
    schedule_date: Timestamp,
}

fn check_receivers(receivers: &[Receiver]) -> Result<(), ValidationError> {
    if receivers.is_empty() {
        return Err(ValidationError::Empty {
            field: Receiver::FIELD,
        });
    }
    if receivers.len() > MAX_RECEIVERS {
        return Err(ValidationError::TooManyReceivers {
            max: MAX_RECEIVERS,
            actual: receivers.len(),
        });
    }
    Ok(())
}

impl SendMessage {
    pub fn new(
        sender: SenderId,
        content: MessageText,
        receivers: Vec<Receiver>,
    ) -> Result<Self, ValidationError> {
        check_receivers(&receivers)?;
        Ok(Self {
            sender,
            content,
            receivers,
        })
    }

    pub fn sender(&self) -> &SenderId {
        &self.sender
    }

    pub fn content(&self) -> &MessageText {
        &self.content
    }

    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }
}

impl ScheduleMessage {
    pub fn new(
        sender: SenderId,
        content: MessageText,
        schedule_date: Timestamp,
        receivers: Vec<Receiver>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            message: SendMessage::new(sender, content, receivers)?,
            schedule_date,
        })
    }

    pub fn message(&self) -> &SendMessage {
        &self.message
    }

    pub fn schedule_date(&self) -> Timestamp {
        self.schedule_date
    }
}

impl ContextMessage {
    pub fn new(
        sender: SenderId,
        context: ContextName,
        receivers: Vec<Receiver>,
    ) -> Result<Self, ValidationError> {
        check_receivers(&receivers)?;
        Ok(Self {
            sender,
            context,
            receivers,
        })
    }

    pub fn sender(&self) -> &SenderId {
        &self.sender
    }

    pub fn context(&self) -> &ContextName {
        &self.context
    }

    pub fn receivers(&self) -> &[Receiver] {
        &self.receivers
    }
}

impl ContextSchedule {
    pub fn new(
        sender: SenderId,
        context: ContextName,
        schedule_date: Timestamp,
        receivers: Vec<Receiver>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            message: ContextMessage::new(sender, context, receivers)?,
            schedule_date,
        })
    }

    pub fn message(&self) -> &ContextMessage {
        &self.message
    }

    pub fn schedule_date(&self) -> Timestamp {
        self.schedule_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Delivery state used to filter the detailed report.
pub enum DeliveryStatus {
    #[default]
    All,
    Delivered,
    Pending,
    Failed,
}

impl DeliveryStatus {
    /// Query parameter name used by Comtele (`delivered`).
    pub const FIELD: &'static str = "delivered";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Delivered => "delivered",
            Self::Pending => "pending",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inclusive date range for report queries.
///
/// Invariant: `start <= end`.
pub struct ReportQuery {
    start: Timestamp,
    end: Timestamp,
}

impl ReportQuery {
    pub const START_FIELD: &'static str = "startDate";
    pub const END_FIELD: &'static str = "endDate";

    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailedReportQuery {
    range: ReportQuery,
    status: DeliveryStatus,
}

impl DetailedReportQuery {
    pub fn new(range: ReportQuery, status: DeliveryStatus) -> Self {
        Self { range, status }
    }

    pub fn range(&self) -> &ReportQuery {
        &self.range
    }

    pub fn status(&self) -> DeliveryStatus {
        self.status
    }
}
