//! The interactive command loop.

use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::engine::{Agenda, AgendaError, Applied};
use crate::input;
use crate::model::AppointmentDraft;
use crate::prompt::Prompter;
use crate::render;
use crate::storage;

/// Days shown by `remove` so the user can pick an id.
const REMOVE_LISTING_DAYS: u32 = 30;

const HELP: &str = "\
Available commands:
  add      - Add a new appointment
  remove   - Remove an appointment
  today    - Show today's schedule
  date     - Show the schedule for a specific date
  upcoming - Show upcoming appointments
  help     - Show this help message
  quit     - Exit the application";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Add,
    Remove,
    Today,
    Date,
    Upcoming,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ShellCommand {
    fn parse(line: &str) -> Self {
        let word = line.trim().to_ascii_lowercase();
        match word.as_str() {
            "add" => ShellCommand::Add,
            "remove" | "rm" => ShellCommand::Remove,
            "today" => ShellCommand::Today,
            "date" => ShellCommand::Date,
            "upcoming" => ShellCommand::Upcoming,
            "help" | "?" => ShellCommand::Help,
            "quit" | "q" | "exit" => ShellCommand::Quit,
            "" => ShellCommand::Empty,
            _ => ShellCommand::Unknown(word),
        }
    }
}

/// Why a command stopped early.
enum Abort {
    Cancelled,
    Invalid(AgendaError),
    Io(io::Error),
}

impl From<AgendaError> for Abort {
    fn from(e: AgendaError) -> Self {
        Abort::Invalid(e)
    }
}

impl From<io::Error> for Abort {
    fn from(e: io::Error) -> Self {
        Abort::Io(e)
    }
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Load the agenda for an interactive session.
///
/// An unreadable file is never discarded silently: the user either starts
/// fresh (the old file is moved aside first) or the session ends. `None`
/// means the session must not start.
pub fn open_agenda<P: Prompter, W: Write>(
    path: &Path,
    prompter: &mut P,
    out: &mut W,
) -> io::Result<Option<Agenda>> {
    match Agenda::open(path) {
        Ok(agenda) => Ok(Some(agenda)),
        Err(e @ AgendaError::CorruptData { .. }) => {
            writeln!(out, "Error: {e}")?;
            let fresh = prompter.confirm(
                "Start with an empty calendar? The damaged file will be kept under a new name.",
                false,
            )?;
            if fresh != Some(true) {
                return Ok(None);
            }
            match storage::quarantine(path) {
                Ok(moved) => {
                    writeln!(out, "Moved the damaged file to {}", moved.display())?;
                    Ok(Some(Agenda::empty(path)))
                }
                Err(e) => {
                    writeln!(out, "Error: {e}")?;
                    Ok(None)
                }
            }
        }
        Err(e) => {
            error!("cannot open {}: {e}", path.display());
            writeln!(out, "Error: {e}")?;
            Ok(None)
        }
    }
}

pub struct Shell<P, W> {
    agenda: Agenda,
    prompter: P,
    out: W,
    horizon_days: u32,
    clock: fn() -> NaiveDate,
}

impl<P: Prompter, W: Write> Shell<P, W> {
    pub fn new(agenda: Agenda, prompter: P, out: W, horizon_days: u32) -> Self {
        Self {
            agenda,
            prompter,
            out,
            horizon_days,
            clock: local_today,
        }
    }

    /// Replace the source of "today".
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn into_parts(self) -> (Agenda, P, W) {
        (self.agenda, self.prompter, self.out)
    }

    /// Run until `quit` or end of input, then write out anything unsaved.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "=== Personal Scheduling App ===")?;
        writeln!(
            self.out,
            "Commands: add, remove, today, date, upcoming, help, quit"
        )?;

        loop {
            let Some(line) = self.prompter.text("Enter command:")? else {
                break;
            };
            let command = ShellCommand::parse(&line);
            debug!(?command, "dispatch");
            let result = match command {
                ShellCommand::Quit => break,
                ShellCommand::Empty => continue,
                ShellCommand::Add => self.add(),
                ShellCommand::Remove => self.remove(),
                ShellCommand::Today => self.show_day((self.clock)()),
                ShellCommand::Date => self.date(),
                ShellCommand::Upcoming => self.upcoming(),
                ShellCommand::Help => writeln!(self.out, "{HELP}").map_err(Abort::from),
                ShellCommand::Unknown(word) => writeln!(
                    self.out,
                    "Unknown command '{word}'. Type 'help' for available commands."
                )
                .map_err(Abort::from),
            };
            match result {
                Ok(()) => {}
                Err(Abort::Cancelled) => writeln!(self.out, "Cancelled.")?,
                Err(Abort::Invalid(e)) => writeln!(self.out, "Error: {e}")?,
                Err(Abort::Io(e)) => return Err(e),
            }
        }

        if let Err(e) = self.agenda.flush() {
            writeln!(self.out, "Error: {e}")?;
            writeln!(self.out, "Your latest changes could not be saved.")?;
        }
        writeln!(self.out, "Goodbye!")
    }

    /// Prompt for a field; backing out cancels the whole command.
    fn ask(&mut self, message: &str) -> Result<String, Abort> {
        match self.prompter.text(message)? {
            Some(answer) => Ok(answer.trim().to_string()),
            None => Err(Abort::Cancelled),
        }
    }

    fn report_save<T>(&mut self, applied: &Applied<T>) -> io::Result<()> {
        if let Err(e) = &applied.persisted {
            writeln!(self.out, "Warning: {e}")?;
            writeln!(self.out, "The change is kept for this session.")?;
            writeln!(self.out, "It will be saved on the next change or at exit.")?;
        }
        Ok(())
    }

    fn add(&mut self) -> Result<(), Abort> {
        writeln!(self.out, "--- Add New Appointment ---")?;
        let title = self.ask("Title:")?;
        if title.is_empty() {
            return Err(AgendaError::validation("title cannot be empty").into());
        }
        let date = input::parse_date(&self.ask("Date (YYYY-MM-DD):")?)?;
        let start = input::parse_time(&self.ask("Start time (HH:MM):")?)?;
        let end = self.ask("End time (HH:MM or duration, e.g. 45m):")?;
        let end = input::parse_end_time(start, &end)?;
        let description = self.ask("Description (optional):")?;
        let location = self.ask("Location (optional):")?;

        let draft = AppointmentDraft::new(title, date, start, end)
            .with_description(description)
            .with_location(location);
        let proposal = self.agenda.prepare(draft)?;

        if proposal.has_conflicts() {
            render::write_conflicts(&mut self.out, &proposal.conflicts)?;
            let question = "Do you want to add it anyway?";
            match self.prompter.confirm(question, false)? {
                Some(true) => {}
                Some(false) => {
                    writeln!(self.out, "Appointment not added.")?;
                    return Ok(());
                }
                None => return Err(Abort::Cancelled),
            }
        }

        let title = proposal.appointment.title.clone();
        let applied = self.agenda.add(proposal)?;
        let id = applied.value;
        writeln!(self.out, "Appointment '{title}' added with id {id}.")?;
        self.report_save(&applied)?;
        Ok(())
    }

    fn remove(&mut self) -> Result<(), Abort> {
        writeln!(self.out, "--- Remove Appointment ---")?;
        let listing = self
            .agenda
            .store()
            .upcoming((self.clock)(), REMOVE_LISTING_DAYS)?;
        render::write_upcoming(&mut self.out, REMOVE_LISTING_DAYS, &listing)?;

        let token = self.ask("Appointment ID (or the first few characters):")?;
        let id = self.agenda.store().resolve(&token)?;
        let applied = self.agenda.remove(&id)?;
        writeln!(self.out, "Removed appointment: {}", applied.value.title)?;
        self.report_save(&applied)?;
        Ok(())
    }

    fn show_day(&mut self, date: NaiveDate) -> Result<(), Abort> {
        let day = self.agenda.store().on_date(date);
        render::write_schedule(&mut self.out, date, &day)?;
        Ok(())
    }

    fn date(&mut self) -> Result<(), Abort> {
        let date = input::parse_date(&self.ask("Enter date (YYYY-MM-DD):")?)?;
        self.show_day(date)
    }

    fn upcoming(&mut self) -> Result<(), Abort> {
        let default = self.horizon_days;
        let message = format!("Number of days to look ahead (default {default}):");
        let days = input::parse_horizon(&self.ask(&message)?, self.horizon_days)?;
        let window = self.agenda.store().upcoming((self.clock)(), days)?;
        render::write_upcoming(&mut self.out, days, &window)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(ShellCommand::parse(" ADD "), ShellCommand::Add);
        assert_eq!(ShellCommand::parse("q"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse("exit"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse(""), ShellCommand::Empty);
        assert_eq!(ShellCommand::parse("Upcoming"), ShellCommand::Upcoming);
        let unknown = ShellCommand::Unknown("delete".to_string());
        assert_eq!(ShellCommand::parse("delete"), unknown);
    }
}
