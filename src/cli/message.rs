//! Arguments for the send/schedule command family.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use super::Outcome;
use crate::domain::{
    ContextMessage, ContextName, ContextSchedule, MessageText, OperationResult, Receiver,
    ScheduleMessage, SendMessage, SenderId, Timestamp, ValidationError,
};

const SCHEDULE_DATE: &str = "schedule date";

#[derive(Args, Debug)]
pub struct SendArgs {
    /// API key
    #[arg(short = 'k', long = "key", env = "COMTELE_API_KEY", hide_env_values = true)]
    pub key: String,
    /// Sender of the message
    #[arg(short = 's', long = "sender")]
    pub sender: String,
    /// Message text
    #[arg(short = 'c', long = "content")]
    pub content: String,
    /// Receiver number (comma-separated for several)
    #[arg(short = 'r', long = "receiver")]
    pub receiver: String,
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub message: SendArgs,
    /// Delivery date, e.g. "2024-01-31 14:00"
    #[arg(short = 'd', long = "date")]
    pub date: String,
}

#[derive(Args, Debug)]
pub struct ContextSendArgs {
    /// API key
    #[arg(short = 'k', long = "key", env = "COMTELE_API_KEY", hide_env_values = true)]
    pub key: String,
    /// Sender of the message
    #[arg(short = 's', long = "sender")]
    pub sender: String,
    /// Name of the context rule that builds the message
    #[arg(short = 'c', long = "context")]
    pub context: String,
    /// Receiver number (comma-separated for several)
    #[arg(short = 'r', long = "receiver")]
    pub receiver: String,
    /// Accepted for compatibility; contextsend always sends immediately
    #[arg(short = 'd', long = "date")]
    pub date: Option<String>,
}

#[derive(Args, Debug)]
pub struct ContextScheduleArgs {
    /// API key
    #[arg(short = 'k', long = "key", env = "COMTELE_API_KEY", hide_env_values = true)]
    pub key: String,
    /// Sender of the message
    #[arg(short = 's', long = "sender")]
    pub sender: String,
    /// Name of the context rule that builds the message
    #[arg(short = 'c', long = "context")]
    pub context: String,
    /// Receiver number (comma-separated for several)
    #[arg(short = 'r', long = "receiver")]
    pub receiver: String,
    /// Delivery date, e.g. "2024-01-31 14:00"
    #[arg(short = 'd', long = "date")]
    pub date: String,
}

impl TryFrom<SendArgs> for SendMessage {
    type Error = ValidationError;

    fn try_from(args: SendArgs) -> Result<Self, Self::Error> {
        SendMessage::new(
            SenderId::new(args.sender)?,
            MessageText::new(args.content)?,
            Receiver::parse_list(&args.receiver)?,
        )
    }
}

impl TryFrom<ScheduleArgs> for ScheduleMessage {
    type Error = ValidationError;

    fn try_from(args: ScheduleArgs) -> Result<Self, Self::Error> {
        let date = Timestamp::parse(SCHEDULE_DATE, &args.date)?;
        let message = args.message;
        ScheduleMessage::new(
            SenderId::new(message.sender)?,
            MessageText::new(message.content)?,
            date,
            Receiver::parse_list(&message.receiver)?,
        )
    }
}

impl TryFrom<ContextSendArgs> for ContextMessage {
    type Error = ValidationError;

    fn try_from(args: ContextSendArgs) -> Result<Self, Self::Error> {
        if let Some(date) = args.date.as_deref() {
            tracing::warn!(date, "contextsend ignores --date; sending immediately");
        }
        ContextMessage::new(
            SenderId::new(args.sender)?,
            ContextName::new(args.context)?,
            Receiver::parse_list(&args.receiver)?,
        )
    }
}

impl TryFrom<ContextScheduleArgs> for ContextSchedule {
    type Error = ValidationError;

    fn try_from(args: ContextScheduleArgs) -> Result<Self, Self::Error> {
        let date = Timestamp::parse(SCHEDULE_DATE, &args.date)?;
        ContextSchedule::new(
            SenderId::new(args.sender)?,
            ContextName::new(args.context)?,
            date,
            Receiver::parse_list(&args.receiver)?,
        )
    }
}

/// Print the provider's message as-is, whatever the outcome.
pub fn print_result<W: Write>(result: OperationResult<()>, out: &mut W) -> Result<Outcome> {
    writeln!(out, "{}", result.message)?;
    Ok(Outcome::from_success(result.success))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn send_args(receiver: &str) -> SendArgs {
        SendArgs {
            key: "key".to_owned(),
            sender: "acme".to_owned(),
            content: "hello".to_owned(),
            receiver: receiver.to_owned(),
        }
    }

    #[test]
    fn send_args_split_receivers() {
        let message = SendMessage::try_from(send_args("1, 2,3")).unwrap();
        let raw = message
            .receivers()
            .iter()
            .map(Receiver::raw)
            .collect::<Vec<_>>();
        assert_eq!(raw, vec!["1", "2", "3"]);
    }

    #[test]
    fn schedule_args_report_invalid_date_field() {
        let err = ScheduleMessage::try_from(ScheduleArgs {
            message: send_args("1"),
            date: "31/02/2024".to_owned(),
        })
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDate {
                field: SCHEDULE_DATE,
                input: "31/02/2024".to_owned(),
            }
        );
    }

    #[test]
    fn print_result_maps_success_flag() {
        let mut out = Vec::new();
        let outcome = print_result(OperationResult::succeeded("ok", None), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Succeeded);

        let outcome = print_result(OperationResult::failed("nope"), &mut out).unwrap();
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(String::from_utf8(out).unwrap(), "ok\nnope\n");
    }
}
