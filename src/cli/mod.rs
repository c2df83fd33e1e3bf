//! Command-line interface wiring for the `comtele` binary.
//!
//! clap parses raw options into [`Command`]; each command is then validated into
//! an [`Invocation`] carrying typed requests, and [`dispatch`] runs the single
//! matching client operation.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::client::{ComteleClient, ComteleError, DEFAULT_ENDPOINT};
use crate::domain::{ApiKey, ValidationError};

pub mod message;
pub mod report;

/// Parsed CLI entrypoint for the `comtele` binary.
#[derive(Parser, Debug)]
#[command(name = "comtele", version, about = "Send SMS and fetch reports through the Comtele API")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Connection and logging options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Comtele API root URL
    #[arg(long, global = true, env = "COMTELE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "COMTELE_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send a message immediately
    Send(message::SendArgs),
    /// Schedule a message for later delivery
    Schedule(message::ScheduleArgs),
    /// Send a message built from a context rule
    #[command(name = "contextsend")]
    ContextSend(message::ContextSendArgs),
    /// Schedule a message built from a context rule
    #[command(name = "contextschedule")]
    ContextSchedule(message::ContextScheduleArgs),
    /// Save the inbound replies report as CSV
    Replies(report::ReportArgs),
    /// Save the detailed delivery report as CSV
    Report(report::ReportArgs),
}

/// A validated command: credentials plus the typed operation to run.
#[derive(Debug)]
pub struct Invocation {
    pub api_key: ApiKey,
    pub action: Action,
}

#[derive(Debug)]
pub enum Action {
    Send(crate::domain::SendMessage),
    Schedule(crate::domain::ScheduleMessage),
    ContextSend(crate::domain::ContextMessage),
    ContextSchedule(crate::domain::ContextSchedule),
    Replies(report::ReplyReportConfig),
    Report(report::DetailedReportConfig),
}

/// Whether Comtele accepted the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Rejected,
}

impl Outcome {
    fn from_success(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Rejected
        }
    }
}

impl TryFrom<Command> for Invocation {
    type Error = ValidationError;

    fn try_from(command: Command) -> Result<Self, Self::Error> {
        Ok(match command {
            Command::Send(args) => Self {
                api_key: ApiKey::new(&args.key)?,
                action: Action::Send(args.try_into()?),
            },
            Command::Schedule(args) => Self {
                api_key: ApiKey::new(&args.message.key)?,
                action: Action::Schedule(args.try_into()?),
            },
            Command::ContextSend(args) => Self {
                api_key: ApiKey::new(&args.key)?,
                action: Action::ContextSend(args.try_into()?),
            },
            Command::ContextSchedule(args) => Self {
                api_key: ApiKey::new(&args.key)?,
                action: Action::ContextSchedule(args.try_into()?),
            },
            Command::Replies(args) => Self {
                api_key: ApiKey::new(&args.key)?,
                action: Action::Replies(args.try_into()?),
            },
            Command::Report(args) => Self {
                api_key: ApiKey::new(&args.key)?,
                action: Action::Report(args.try_into()?),
            },
        })
    }
}

/// Build the HTTP client from global options.
pub fn build_client(global: &GlobalArgs, api_key: ApiKey) -> Result<ComteleClient, ComteleError> {
    ComteleClient::builder(api_key)
        .endpoint(&global.endpoint)
        .timeout(Duration::from_secs(global.timeout))
        .user_agent(concat!("comtele/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Validate, connect and dispatch the parsed command line.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> Result<Outcome> {
    let global = cli.global;
    run_with(cli.command, |api_key| build_client(&global, api_key), out).await
}

async fn run_with<W, F>(command: Command, connect: F, out: &mut W) -> Result<Outcome>
where
    W: Write,
    F: FnOnce(ApiKey) -> Result<ComteleClient, ComteleError>,
{
    let invocation = Invocation::try_from(command)?;
    let client = connect(invocation.api_key)?;
    dispatch(invocation.action, &client, out).await
}

/// Run one validated action against Comtele, writing user-facing lines to `out`.
pub async fn dispatch<W: Write>(
    action: Action,
    client: &ComteleClient,
    out: &mut W,
) -> Result<Outcome> {
    tracing::info!(action = action.name(), "dispatching");
    match action {
        Action::Send(request) => {
            let result = client.send(request).await?;
            message::print_result(result, out)
        }
        Action::Schedule(request) => {
            let result = client.schedule(request).await?;
            message::print_result(result, out)
        }
        Action::ContextSend(request) => {
            let result = client.context_send(request).await?;
            message::print_result(result, out)
        }
        Action::ContextSchedule(request) => {
            let result = client.context_schedule(request).await?;
            message::print_result(result, out)
        }
        Action::Replies(config) => {
            report::save(
                &report::REPLIES,
                client.reply_report(config.query),
                &config.file,
                out,
            )
            .await
        }
        Action::Report(config) => {
            report::save(
                &report::DETAILED,
                client.detailed_report(config.query),
                &config.file,
                out,
            )
            .await
        }
    }
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::Send(_) => "send",
            Self::Schedule(_) => "schedule",
            Self::ContextSend(_) => "contextsend",
            Self::ContextSchedule(_) => "contextschedule",
            Self::Replies(_) => "replies",
            Self::Report(_) => "report",
        }
    }
}
