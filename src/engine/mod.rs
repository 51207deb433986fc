mod conflict;
mod error;
mod mutations;
mod queries;
mod store;

pub use conflict::conflicts;
pub(crate) use conflict::validate_appointment;
pub use error::AgendaError;
pub use mutations::{Applied, Proposal};
pub use store::AppointmentStore;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::storage;

/// The appointment store bound to the JSON file it is persisted in.
///
/// Every mutation is applied in memory first and then written out. When the
/// write fails the change is kept and the agenda stays dirty; the next save
/// writes the full store again.
#[derive(Debug)]
pub struct Agenda {
    store: AppointmentStore,
    path: PathBuf,
    dirty: bool,
}

impl Agenda {
    /// Load the agenda persisted at `path`. A missing file is an empty agenda.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AgendaError> {
        let path = path.into();
        let store = storage::load(&path)?;
        Ok(Self {
            store,
            path,
            dirty: false,
        })
    }

    /// An empty agenda that will be written to `path` on the first change.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            store: AppointmentStore::new(),
            path: path.into(),
            dirty: false,
        }
    }

    pub fn store(&self) -> &AppointmentStore {
        &self.store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the in-memory store holds changes the file does not.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> Result<(), AgendaError> {
        storage::save(&self.store, &self.path)?;
        self.dirty = false;
        Ok(())
    }

    /// Save only if there is something unsaved.
    pub fn flush(&mut self) -> Result<(), AgendaError> {
        if self.dirty { self.save() } else { Ok(()) }
    }

    /// Mark dirty + save in one call. The mutation already happened; a failed
    /// save is reported to the caller but does not undo it.
    fn persist_after_change(&mut self) -> Result<(), AgendaError> {
        self.dirty = true;
        let result = self.save();
        if let Err(e) = &result {
            warn!("change kept in memory but not saved: {e}");
        }
        result
    }
}
