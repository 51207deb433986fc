//! Parsing of dates, times and day counts typed by the user.

use chrono::{NaiveDate, NaiveTime, TimeDelta};

use crate::engine::AgendaError;
use crate::limits::MAX_HORIZON_DAYS;
use crate::model::hhmm;

/// Tried in order. Month-first wins when both would parse.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];

pub fn parse_date(input: &str) -> Result<NaiveDate, AgendaError> {
    let input = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .ok_or_else(|| {
            AgendaError::Validation(format!("invalid date '{input}': use YYYY-MM-DD"))
        })
}

pub fn parse_time(input: &str) -> Result<NaiveTime, AgendaError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, hhmm::FORMAT)
        .map_err(|_| {
            AgendaError::Validation(format!("invalid time '{input}': use HH:MM"))
        })
}

/// End of an appointment: either a time of day (`10:30`) or a duration
/// after `start` (`45m`, `1h30m`). A duration must stay on the same day.
pub fn parse_end_time(start: NaiveTime, input: &str) -> Result<NaiveTime, AgendaError> {
    let input = input.trim();
    if let Ok(end) = NaiveTime::parse_from_str(input, hhmm::FORMAT) {
        return Ok(end);
    }

    let duration = humantime::parse_duration(input).map_err(|_| {
        AgendaError::Validation(format!(
            "invalid end time '{input}': use HH:MM or a duration such as 45m or 1h30m"
        ))
    })?;
    if duration.as_secs() % 60 != 0 || duration.subsec_nanos() != 0 {
        let msg = "duration must be a whole number of minutes";
        return Err(AgendaError::validation(msg));
    }
    let past_midnight = || AgendaError::validation("duration must end on the same day");
    let delta = TimeDelta::from_std(duration).map_err(|_| past_midnight())?;
    let (end, wrapped_secs) = start.overflowing_add_signed(delta);
    if wrapped_secs != 0 {
        return Err(past_midnight());
    }
    Ok(end)
}

/// Number of days for "upcoming". Blank input means `default`.
pub fn parse_horizon(input: &str, default: u32) -> Result<u32, AgendaError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(default);
    }
    let days: u32 = input.parse().map_err(|_| {
        AgendaError::Validation(format!("invalid number of days '{input}'"))
    })?;
    if days > MAX_HORIZON_DAYS {
        return Err(AgendaError::LimitExceeded("horizon too wide"));
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn dates_in_all_accepted_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
        assert_eq!(parse_date("2025-09-20").unwrap(), expected);
        assert_eq!(parse_date(" 09/20/2025 ").unwrap(), expected);
        assert_eq!(parse_date("20/09/2025").unwrap(), expected);
    }

    #[test]
    fn ambiguous_slash_date_is_month_first() {
        let parsed = parse_date("03/04/2025").unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    }

    #[test]
    fn bad_dates() {
        assert!(matches!(
            parse_date("tomorrow"),
            Err(AgendaError::Validation(_))
        ));
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn times() {
        assert_eq!(parse_time("09:30").unwrap(), t(9, 30));
        assert_eq!(parse_time("23:59").unwrap(), t(23, 59));
        assert!(parse_time("24:00").is_err());
        assert!(parse_time("2:30 PM").is_err());
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn end_as_time_of_day() {
        assert_eq!(parse_end_time(t(9, 0), "10:15").unwrap(), t(10, 15));
        // ordering is checked later, not here
        assert_eq!(parse_end_time(t(9, 0), "08:00").unwrap(), t(8, 0));
    }

    #[test]
    fn end_as_duration() {
        assert_eq!(parse_end_time(t(9, 0), "45m").unwrap(), t(9, 45));
        assert_eq!(parse_end_time(t(9, 0), "1h 30m").unwrap(), t(10, 30));
        assert_eq!(parse_end_time(t(9, 0), "2h").unwrap(), t(11, 0));
    }

    #[test]
    fn end_duration_past_midnight_rejected() {
        assert!(parse_end_time(t(23, 0), "2h").is_err());
        assert_eq!(parse_end_time(t(23, 0), "59m").unwrap(), t(23, 59));
    }

    #[test]
    fn end_duration_with_seconds_rejected() {
        assert!(parse_end_time(t(9, 0), "90s").is_err());
        assert!(parse_end_time(t(9, 0), "soon").is_err());
    }

    #[test]
    fn horizon() {
        assert_eq!(parse_horizon("", 7).unwrap(), 7);
        assert_eq!(parse_horizon(" 14 ", 7).unwrap(), 14);
        assert_eq!(parse_horizon("0", 7).unwrap(), 0);
        assert!(parse_horizon("-1", 7).is_err());
        assert!(matches!(
            parse_horizon("a week", 7),
            Err(AgendaError::Validation(_))
        ));
        assert!(matches!(
            parse_horizon(&(MAX_HORIZON_DAYS + 1).to_string(), 7),
            Err(AgendaError::LimitExceeded(_))
        ));
    }
}
