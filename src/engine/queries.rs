use chrono::{Days, NaiveDate};

use crate::limits::*;
use crate::model::*;

use super::{AgendaError, AppointmentStore};

impl AppointmentStore {
    /// Appointments on `date`, by start time.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        let mut day: Vec<&Appointment> = self.all().filter(|a| a.date == date).collect();
        day.sort_by_key(|a| (a.start_time, a.id));
        day
    }

    pub fn today(&self, current_date: NaiveDate) -> Vec<&Appointment> {
        self.on_date(current_date)
    }

    /// Appointments dated `current_date ..= current_date + horizon_days`,
    /// by date then start time.
    pub fn upcoming(
        &self,
        current_date: NaiveDate,
        horizon_days: u32,
    ) -> Result<Vec<&Appointment>, AgendaError> {
        if horizon_days > MAX_HORIZON_DAYS {
            return Err(AgendaError::LimitExceeded("horizon too wide"));
        }
        let past_calendar = AgendaError::LimitExceeded("horizon runs past the end of the calendar");
        let last = current_date
            .checked_add_days(Days::new(u64::from(horizon_days)))
            .ok_or(past_calendar)?;

        let mut window: Vec<&Appointment> = self
            .all()
            .filter(|a| current_date <= a.date && a.date <= last)
            .collect();
        window.sort_by_key(|a| (a.date, a.start_time, a.id));
        Ok(window)
    }
}
