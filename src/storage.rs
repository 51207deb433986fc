use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::engine::{AgendaError, AppointmentStore, validate_appointment};
use crate::model::Appointment;

/// Sibling file the next snapshot is written to before it replaces `path`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn persistence_error(path: &Path) -> impl FnOnce(io::Error) -> AgendaError + '_ {
    move |source| AgendaError::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

/// Read the appointments file at `path`.
///
/// A missing or blank file is an empty calendar. Anything that is not a JSON
/// array of valid appointments with distinct ids is `CorruptData`: the file is
/// never silently replaced.
pub fn load(path: &Path) -> Result<AppointmentStore, AgendaError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no file at {}, starting empty", path.display());
            return Ok(AppointmentStore::new());
        }
        Err(e) => return Err(persistence_error(path)(e)),
    };

    let corrupt = |reason: String| AgendaError::CorruptData {
        path: path.to_path_buf(),
        reason,
    };

    let content = String::from_utf8(bytes).map_err(|e| corrupt(e.to_string()))?;
    if content.trim().is_empty() {
        return Ok(AppointmentStore::new());
    }

    let records: Vec<Appointment> = serde_json::from_str(&content)
        .map_err(|e| corrupt(e.to_string()))?;
    for record in &records {
        validate_appointment(record)
            .map_err(|e| corrupt(format!("appointment {}: {e}", record.id)))?;
    }
    let store = AppointmentStore::from_appointments(records)
        .map_err(|e| corrupt(e.to_string()))?;

    let count = store.len();
    info!("loaded {count} appointment(s) from {}", path.display());
    Ok(store)
}

/// Write the whole store to `path`.
///
/// The snapshot goes to a temp file which is fsynced and renamed over the
/// target, so readers see either the old file or the new one.
pub fn save(store: &AppointmentStore, path: &Path) -> Result<(), AgendaError> {
    let mut records: Vec<&Appointment> = store.all().collect();
    records.sort_by_key(|a| (a.date, a.start_time, a.id));
    let payload = serde_json::to_vec_pretty(&records)
        .map_err(|e| persistence_error(path)(io::Error::from(e)))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(persistence_error(path))?;
    }

    let tmp = tmp_path(path);
    let result = write_snapshot(&tmp, &payload).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = result {
        // Never leave a half-written snapshot next to the real file.
        let _ = fs::remove_file(&tmp);
        warn!("saving {} failed: {e}", path.display());
        return Err(persistence_error(path)(e));
    }

    let count = store.len();
    debug!("saved {count} appointment(s) to {}", path.display());
    Ok(())
}

fn write_snapshot(tmp: &Path, payload: &[u8]) -> io::Result<()> {
    let file = File::create(tmp)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(payload)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    writer.get_ref().sync_all()
}

/// Move an unreadable file out of the way so a fresh calendar can take its
/// place without destroying the old data. Returns where it went.
pub fn quarantine(path: &Path) -> Result<PathBuf, AgendaError> {
    let stamp = chrono::Utc::now().timestamp();
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".corrupt-{stamp}"));
    let target = PathBuf::from(name);
    fs::rename(path, &target).map_err(persistence_error(path))?;
    warn!(to = %target.display(), "moved unreadable {}", path.display());
    Ok(target)
}
