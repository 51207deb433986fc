//! One-shot subcommands: load, do one thing, save, exit.

use std::error::Error;
use std::io::Write;

use chrono::NaiveDate;

use crate::cli::{AddArgs, Command, ListArgs};
use crate::config::Config;
use crate::engine::{Agenda, AgendaError, Applied};
use crate::input;
use crate::model::{Appointment, AppointmentDraft};
use crate::render;

fn list(
    out: &mut impl Write,
    args: &ListArgs,
    appointments: &[&Appointment],
) -> std::io::Result<()> {
    if args.json {
        render::write_json(out, appointments)
    } else {
        for appointment in appointments {
            render::write_entry(out, appointment)?;
        }
        Ok(())
    }
}

fn add(agenda: &mut Agenda, args: AddArgs, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let end = input::parse_end_time(args.start, &args.end)?;
    let draft = AppointmentDraft::new(args.title, args.date, args.start, end)
        .with_description(args.description)
        .with_location(args.location);
    let proposal = agenda.prepare(draft)?;

    if proposal.has_conflicts() {
        render::write_conflicts(out, &proposal.conflicts)?;
        if !args.force {
            let ids = proposal.conflicts.iter().map(|c| c.id).collect();
            return Err(AgendaError::Conflict(ids).into());
        }
    }

    let applied = agenda.add(proposal)?;
    writeln!(out, "{}", applied.value)?;
    persisted(applied)?;
    Ok(())
}

/// A one-shot command has no later save to fall back on.
fn persisted<T>(applied: Applied<T>) -> Result<T, AgendaError> {
    applied.persisted?;
    Ok(applied.value)
}

/// Run a subcommand against the configured file. `today` is the local date.
pub fn run(
    command: Command,
    config: &Config,
    today: NaiveDate,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    if let Command::Shell = command {
        let msg = "the interactive shell is not a one-shot command";
        return Err(AgendaError::validation(msg).into());
    }
    let mut agenda = Agenda::open(&config.data_file)?;

    match command {
        Command::Add(args) => add(&mut agenda, args, out)?,
        Command::Today(args) => list(out, &args, &agenda.store().today(today))?,
        Command::Date(args) => list(out, &args.list, &agenda.store().on_date(args.date))?,
        Command::Upcoming(args) => {
            let days = args.days.unwrap_or(config.horizon_days);
            let window = agenda.store().upcoming(today, days)?;
            list(out, &args.list, &window)?;
        }
        Command::Remove(args) => {
            let id = agenda.store().resolve(&args.id)?;
            let removed = persisted(agenda.remove(&id)?)?;
            writeln!(out, "Removed appointment: {}", removed.title)?;
        }
        Command::Shell => {}
    }
    Ok(())
}
