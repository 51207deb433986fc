use crate::limits::*;
use crate::model::*;

use super::{AgendaError, AppointmentStore};

/// Field checks every stored appointment must pass, both at creation and
/// when records are read back from disk.
pub(crate) fn validate_appointment(appointment: &Appointment) -> Result<(), AgendaError> {
    let title = appointment.title.trim();
    if title.is_empty() {
        return Err(AgendaError::validation("title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AgendaError::LimitExceeded("title too long"));
    }
    if appointment.description.chars().count() > MAX_TEXT_LEN {
        return Err(AgendaError::LimitExceeded("description too long"));
    }
    if appointment.location.chars().count() > MAX_TEXT_LEN {
        return Err(AgendaError::LimitExceeded("location too long"));
    }
    if appointment.span().is_empty() {
        return Err(AgendaError::Validation(format!(
            "end time {} must be after start time {}",
            appointment.end_time.format(hhmm::FORMAT),
            appointment.start_time.format(hhmm::FORMAT),
        )));
    }
    Ok(())
}

/// Every appointment in `existing` that overlaps `candidate`, earliest first.
/// A record never conflicts with itself.
pub fn conflicts<'a, I>(candidate: &Appointment, existing: I) -> Vec<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    let mut found: Vec<&Appointment> = existing
        .into_iter()
        .filter(|a| a.id != candidate.id && candidate.overlaps(a))
        .collect();
    found.sort_by_key(|a| (a.start_time, a.id));
    found
}

impl AppointmentStore {
    pub fn conflicts_with(&self, candidate: &Appointment) -> Vec<&Appointment> {
        conflicts(candidate, self.all())
    }
}
