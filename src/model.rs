use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Appointment identifiers are ULIDs: unique without coordination and never
/// handed out twice, so a removed id cannot come back.
pub type AppointmentId = Ulid;

/// Half-open time-of-day interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Span {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A single scheduled event. This is also the on-disk record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// Empty when the user gave none.
    #[serde(default)]
    pub description: String,
    /// Empty when the user gave none.
    #[serde(default)]
    pub location: String,
}

impl Appointment {
    /// Assign a fresh id to a draft.
    pub fn new(draft: AppointmentDraft) -> Self {
        Self {
            id: Ulid::new(),
            title: draft.title,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            description: draft.description,
            location: draft.location,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start_time, self.end_time)
    }

    /// Same date and overlapping `[start, end)`.
    pub fn overlaps(&self, other: &Appointment) -> bool {
        self.date == other.date && self.span().overlaps(&other.span())
    }
}

/// User-supplied fields of an appointment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: String,
    pub location: String,
}

impl AppointmentDraft {
    pub fn new(
        title: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            title: title.into(),
            date,
            start_time,
            end_time,
            description: String::new(),
            location: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// `HH:MM` codec for times of day. chrono's default emits seconds.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, mo: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, mo, day).unwrap()
    }

    #[test]
    fn span_overlap() {
        let a = Span::new(t(9, 0), t(10, 0));
        let b = Span::new(t(9, 30), t(10, 30));
        let c = Span::new(t(10, 0), t(11, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // adjacent, not overlapping
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn span_contained_overlaps() {
        let outer = Span::new(t(8, 0), t(12, 0));
        let inner = Span::new(t(9, 0), t(9, 15));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn span_emptiness() {
        assert!(Span::new(t(10, 0), t(10, 0)).is_empty());
        assert!(Span::new(t(11, 0), t(10, 0)).is_empty());
        assert!(!Span::new(t(10, 0), t(10, 1)).is_empty());
    }

    #[test]
    fn appointments_on_different_dates_never_overlap() {
        let a = Appointment::new(AppointmentDraft::new("a", d(2024, 6, 1), t(9, 0), t(10, 0)));
        let b = Appointment::new(AppointmentDraft::new("b", d(2024, 6, 2), t(9, 0), t(10, 0)));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn new_assigns_distinct_ids() {
        let draft = AppointmentDraft::new("x", d(2024, 6, 1), t(9, 0), t(10, 0));
        let a = Appointment::new(draft.clone());
        let b = Appointment::new(draft);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn json_shape() {
        let draft = AppointmentDraft::new("Dentist", d(2024, 6, 1), t(9, 5), t(9, 45));
        let appt = Appointment::new(draft.with_location("Main St"));
        let value = serde_json::to_value(&appt).unwrap();
        assert_eq!(value["id"], appt.id.to_string());
        assert_eq!(value["title"], "Dentist");
        assert_eq!(value["date"], "2024-06-01");
        assert_eq!(value["start_time"], "09:05");
        assert_eq!(value["end_time"], "09:45");
        assert_eq!(value["description"], "");
        assert_eq!(value["location"], "Main St");
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let json = r#"{
            "id": "01HZX3Q8V4J6J2M5T1K9P7R2WC",
            "title": "Standup",
            "date": "2024-06-03",
            "start_time": "09:00",
            "end_time": "09:15"
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.title, "Standup");
        assert_eq!(appt.start_time, t(9, 0));
        assert!(appt.description.is_empty());
        assert!(appt.location.is_empty());
    }

    #[test]
    fn seconds_in_time_are_rejected() {
        let json = r#"{
            "id": "01HZX3Q8V4J6J2M5T1K9P7R2WC",
            "title": "Standup",
            "date": "2024-06-03",
            "start_time": "09:00:30",
            "end_time": "09:15"
        }"#;
        assert!(serde_json::from_str::<Appointment>(json).is_err());
    }
}
