use std::io;
use std::path::PathBuf;

use crate::model::AppointmentId;

#[derive(Debug)]
pub enum AgendaError {
    /// Bad user input: empty title, end not after start, unparseable date or time.
    Validation(String),
    NotFound(String),
    AlreadyExists(AppointmentId),
    /// Refused because the appointment overlaps these ones. Only raised where
    /// the caller asked for overlaps to be fatal.
    Conflict(Vec<AppointmentId>),
    LimitExceeded(&'static str),
    CorruptData {
        path: PathBuf,
        reason: String,
    },
    Persistence {
        path: PathBuf,
        source: io::Error,
    },
}

impl AgendaError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AgendaError::Validation(msg.into())
    }
}

impl std::fmt::Display for AgendaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgendaError::Validation(msg) => write!(f, "{msg}"),
            AgendaError::NotFound(id) => write!(f, "appointment not found: {id}"),
            AgendaError::AlreadyExists(id) => write!(f, "appointment already exists: {id}"),
            AgendaError::Conflict(ids) => {
                let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
                write!(
                    f,
                    "conflicts with {} appointment(s): {}",
                    ids.len(),
                    ids.join(", ")
                )
            }
            AgendaError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
            AgendaError::CorruptData { path, reason } => {
                let path = path.display();
                write!(f, "{path} is not a valid appointments file: {reason}")
            }
            AgendaError::Persistence { path, source } => {
                write!(f, "i/o error on {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for AgendaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AgendaError::Persistence { source, .. } => Some(source),
            _ => None,
        }
    }
}
