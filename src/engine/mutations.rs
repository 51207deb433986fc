use tracing::info;

use crate::model::*;

use super::conflict::validate_appointment;
use super::{Agenda, AgendaError};

/// A validated appointment with the stored appointments it would overlap.
/// Nothing is stored until it is passed to [`Agenda::add`].
#[derive(Debug, Clone)]
pub struct Proposal {
    pub appointment: Appointment,
    pub conflicts: Vec<Appointment>,
}

impl Proposal {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Result of a mutation that was applied in memory. `persisted` says whether
/// it also reached the file.
#[derive(Debug)]
pub struct Applied<T> {
    pub value: T,
    pub persisted: Result<(), AgendaError>,
}

impl Agenda {
    /// Validate a draft and look for overlaps, without changing anything.
    pub fn prepare(&self, draft: AppointmentDraft) -> Result<Proposal, AgendaError> {
        let mut appointment = Appointment::new(draft);
        appointment.title = appointment.title.trim().to_string();
        appointment.description = appointment.description.trim().to_string();
        appointment.location = appointment.location.trim().to_string();
        validate_appointment(&appointment)?;

        let conflicts = self
            .store
            .conflicts_with(&appointment)
            .into_iter()
            .cloned()
            .collect();
        Ok(Proposal {
            appointment,
            conflicts,
        })
    }

    /// Store a prepared appointment, overlaps or not, and save.
    pub fn add(&mut self, proposal: Proposal) -> Result<Applied<AppointmentId>, AgendaError> {
        validate_appointment(&proposal.appointment)?;
        let id = self.store.add(proposal.appointment)?;
        info!(%id, conflicts = proposal.conflicts.len(), "appointment added");
        let persisted = self.persist_after_change();
        Ok(Applied { value: id, persisted })
    }

    /// Remove by id and save. Returns the removed record.
    pub fn remove(&mut self, id: &AppointmentId) -> Result<Applied<Appointment>, AgendaError> {
        let removed = self
            .store
            .remove(id)
            .ok_or_else(|| AgendaError::NotFound(id.to_string()))?;
        info!(%id, "appointment removed");
        let persisted = self.persist_after_change();
        Ok(Applied {
            value: removed,
            persisted,
        })
    }
}
