use std::io::{self, Write};

use chrono::NaiveDate;

use crate::model::{Appointment, hhmm};

const DAY_FORMAT: &str = "%Y-%m-%d (%A)";

/// `Title | YYYY-MM-DD HH:MM - HH:MM | Location`
pub fn summary(appointment: &Appointment) -> String {
    let mut line = format!(
        "{} | {} {} - {}",
        appointment.title,
        appointment.date.format("%Y-%m-%d"),
        appointment.start_time.format(hhmm::FORMAT),
        appointment.end_time.format(hhmm::FORMAT),
    );
    if !appointment.location.is_empty() {
        line.push_str(" | ");
        line.push_str(&appointment.location);
    }
    line
}

/// One listing entry: id + summary, then the description if there is one.
pub fn write_entry(out: &mut impl Write, appointment: &Appointment) -> io::Result<()> {
    writeln!(out, "[{}] {}", appointment.id, summary(appointment))?;
    if !appointment.description.is_empty() {
        writeln!(out, "    Description: {}", appointment.description)?;
    }
    Ok(())
}

pub fn write_schedule(
    out: &mut impl Write,
    date: NaiveDate,
    appointments: &[&Appointment],
) -> io::Result<()> {
    writeln!(out, "=== Schedule for {} ===", date.format(DAY_FORMAT))?;
    if appointments.is_empty() {
        return writeln!(out, "No appointments scheduled");
    }
    for appointment in appointments {
        write_entry(out, appointment)?;
    }
    Ok(())
}

/// Listing grouped under a header per date. Expects input sorted by date.
pub fn write_upcoming(
    out: &mut impl Write,
    horizon_days: u32,
    appointments: &[&Appointment],
) -> io::Result<()> {
    writeln!(
        out,
        "=== Upcoming Appointments (Next {horizon_days} days) ==="
    )?;
    if appointments.is_empty() {
        return writeln!(out, "No upcoming appointments");
    }
    let mut current: Option<NaiveDate> = None;
    for appointment in appointments {
        if current != Some(appointment.date) {
            current = Some(appointment.date);
            writeln!(out, "--- {} ---", appointment.date.format(DAY_FORMAT))?;
        }
        write_entry(out, appointment)?;
    }
    Ok(())
}

pub fn write_conflicts(out: &mut impl Write, conflicts: &[Appointment]) -> io::Result<()> {
    writeln!(out, "Warning: this appointment conflicts with:")?;
    for conflict in conflicts {
        writeln!(out, "  - [{}] {}", conflict.id, summary(conflict))?;
    }
    Ok(())
}

pub fn write_json(out: &mut impl Write, appointments: &[&Appointment]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, appointments)?;
    writeln!(out)
}
