//! Command-line client for the Comtele SMS HTTP API.
//!
//! The crate is layered like a typical API binding: a domain layer of strong
//! types, a transport layer for wire-format details, and a small client layer
//! orchestrating requests. On top sit the CSV report formatter and the `cli`
//! module backing the `comtele` binary.
//!
//! ```rust,no_run
//! use comtele::{ApiKey, ComteleClient, MessageText, Receiver, SendMessage, SenderId};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ComteleClient::new(ApiKey::new("...")?);
//!     let request = SendMessage::new(
//!         SenderId::new("acme")?,
//!         MessageText::new("hello")?,
//!         Receiver::parse_list("5511999990000")?,
//!     )?;
//!     let result = client.send(request).await?;
//!     println!("{}", result.message);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod cli;
pub mod client;
pub mod domain;
pub mod report;
pub mod telemetry;
mod transport;

pub use client::{ComteleClient, ComteleClientBuilder, ComteleError};
pub use domain::{
    ApiKey, ContextMessage, ContextName, ContextSchedule, DeliveryRecord, DeliveryStatus,
    DetailedReportQuery, MessageText, OperationResult, Receiver, ReplyRecord, ReportQuery,
    ScheduleMessage, SendMessage, SenderId, Timestamp, ValidationError,
};
