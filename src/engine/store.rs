use std::collections::BTreeMap;

use crate::model::*;

use super::AgendaError;

/// The canonical in-memory collection, keyed by appointment id.
/// Iteration follows id order; callers that need time order sort themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentStore {
    appointments: BTreeMap<AppointmentId, Appointment>,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded records. Duplicate ids are rejected.
    pub fn from_appointments(
        appointments: impl IntoIterator<Item = Appointment>,
    ) -> Result<Self, AgendaError> {
        let mut store = Self::new();
        for appointment in appointments {
            store.add(appointment)?;
        }
        Ok(store)
    }

    // ── CRUD ─────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }

    pub fn contains(&self, id: &AppointmentId) -> bool {
        self.appointments.contains_key(id)
    }

    pub fn add(&mut self, appointment: Appointment) -> Result<AppointmentId, AgendaError> {
        let id = appointment.id;
        if self.appointments.contains_key(&id) {
            return Err(AgendaError::AlreadyExists(id));
        }
        self.appointments.insert(id, appointment);
        Ok(id)
    }

    /// Remove by id, returning the record if it was present.
    pub fn remove(&mut self, id: &AppointmentId) -> Option<Appointment> {
        self.appointments.remove(id)
    }

    pub fn get(&self, id: &AppointmentId) -> Option<&Appointment> {
        self.appointments.get(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &Appointment> {
        self.appointments.values()
    }

    // ── Id lookup ────────────────────────────────────────────

    /// Resolve user input to a stored id. Accepts a full id or any prefix that
    /// matches exactly one appointment, case-insensitively.
    pub fn resolve(&self, token: &str) -> Result<AppointmentId, AgendaError> {
        let token = token.trim().to_ascii_uppercase();
        if token.is_empty() {
            return Err(AgendaError::validation("appointment id cannot be empty"));
        }
        if let Ok(id) = AppointmentId::from_string(&token)
            && self.contains(&id)
        {
            return Ok(id);
        }

        let mut matches = self
            .appointments
            .keys()
            .filter(|id| id.to_string().starts_with(&token));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(*id),
            (None, _) => Err(AgendaError::NotFound(token)),
            (Some(_), Some(_)) => Err(AgendaError::Validation(format!(
                "'{token}' matches more than one appointment; type more of the id"
            ))),
        }
    }
}
