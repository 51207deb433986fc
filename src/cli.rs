use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::input::{parse_date, parse_time};
use crate::limits::MAX_HORIZON_DAYS;

#[derive(Parser)]
#[command(name = "datebook")]
#[command(about = "A personal appointment manager")]
#[command(version)]
pub struct Cli {
    /// JSON file the appointments are kept in
    #[arg(
        long,
        short = 'f',
        env = "DATEBOOK_FILE",
        default_value = "appointments.json",
        global = true
    )]
    pub file: PathBuf,

    /// Default number of days shown by `upcoming`
    #[arg(
        long,
        env = "DATEBOOK_HORIZON_DAYS",
        default_value_t = 7,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_HORIZON_DAYS)),
        global = true
    )]
    pub horizon: u32,

    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(
        long,
        env = "DATEBOOK_LOG",
        default_value_t = tracing::Level::WARN,
        global = true
    )]
    pub log_level: tracing::Level,

    /// Shorthand for more logging; repeat for more detail
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Run one command and exit. Without one, start the interactive prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add an appointment
    Add(AddArgs),

    /// Show today's schedule
    Today(ListArgs),

    /// Show the schedule for a date
    Date(DateArgs),

    /// Show appointments in the next few days
    Upcoming(UpcomingArgs),

    /// Remove an appointment by id or unique id prefix
    Remove(RemoveArgs),

    /// Start the interactive prompt (the default)
    Shell,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,

    /// YYYY-MM-DD (MM/DD/YYYY and DD/MM/YYYY also accepted)
    #[arg(long, value_parser = parse_date)]
    pub date: NaiveDate,

    /// HH:MM
    #[arg(long, value_parser = parse_time)]
    pub start: NaiveTime,

    /// HH:MM, or a duration after the start such as 45m or 1h30m
    #[arg(long)]
    pub end: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub location: String,

    /// Add even if the appointment overlaps existing ones
    #[arg(long, default_value_t = false)]
    pub force: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args)]
pub struct DateArgs {
    /// YYYY-MM-DD
    #[arg(value_parser = parse_date)]
    pub date: NaiveDate,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args)]
pub struct UpcomingArgs {
    /// Days to look ahead (defaults to --horizon)
    #[arg(long)]
    pub days: Option<u32>,

    #[command(flatten)]
    pub list: ListArgs,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub id: String,
}
