//! Semicolon-delimited CSV rendering of report records.
//!
//! Fields are written as-is: no quoting, no escaping. Comtele report data does
//! not contain the delimiter.

use crate::domain::{DeliveryRecord, ReplyRecord, Timestamp};

pub const DELIMITER: &str = ";";

/// Placeholder for a delivery that was not scheduled.
pub const NO_SCHEDULE: &str = "no schedule";

/// A record that renders as one CSV line under a fixed header.
pub trait CsvRecord {
    const HEADER: &'static [&'static str];

    /// Field values in `HEADER` order.
    fn fields(&self) -> Vec<String>;
}

impl CsvRecord for ReplyRecord {
    const HEADER: &'static [&'static str] = &[
        "SENDER",
        "SENDER NAME",
        "RECEIVED DATE",
        "RECEIVED CONTENT",
        "SENT CONTENT",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.sender.clone(),
            self.sender_name.clone(),
            self.received_date.to_string(),
            self.received_content.clone(),
            self.sent_content.clone(),
        ]
    }
}

impl CsvRecord for DeliveryRecord {
    const HEADER: &'static [&'static str] = &[
        "SENDER",
        "RECEIVER",
        "CONTENT",
        "SYSTEM MESSAGE",
        "STATUS",
        "REQUEST DATE",
        "SCHEDULE DATE",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.sender.clone(),
            self.receiver.clone(),
            self.content.clone(),
            self.system_message.clone(),
            self.status.clone(),
            self.request_date.to_string(),
            self.schedule_date
                .as_ref()
                .map_or_else(|| NO_SCHEDULE.to_owned(), Timestamp::to_string),
        ]
    }
}

/// Render the header line followed by one line per record, in input order.
///
/// Every line, including the last, ends with `\n`.
pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
    let mut out = R::HEADER.join(DELIMITER);
    out.push('\n');
    for record in records {
        out.push_str(&record.fields().join(DELIMITER));
        out.push('\n');
    }
    out
}
