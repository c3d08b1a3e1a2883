//! Calendar-date and instant windows
//!
//! A [`DateWindow`] is a closed range of UTC calendar days as picked by a
//! user. An [`InstantWindow`] is the same range expanded to instant bounds:
//! from the first instant of the start day through the last instant of the
//! end day, both inclusive.

use super::errors::LabError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format accepted for window bounds (ISO 8601 calendar date)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A closed interval `[start, end]` of calendar days with `start <= end`
///
/// # Examples
///
/// ```
/// use lablens::domain::window::DateWindow;
///
/// let window = DateWindow::parse("2024-03-10", "2024-03-12").unwrap();
/// assert_eq!(window.length_days(), 3);
/// assert!(DateWindow::parse("2024-03-12", "2024-03-10").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateWindowRecord")]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window, rejecting `end < start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LabError> {
        if end < start {
            return Err(LabError::Validation(format!(
                "Date window end {end} is before start {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// A window covering exactly one day
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Parses `YYYY-MM-DD` bounds
    pub fn parse(start: &str, end: &str) -> Result<Self, LabError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Quick-range preset: from `days` days before `today` through `today`
    ///
    /// Returns `LabError::Validation` if the start would precede the
    /// earliest representable date.
    pub fn trailing_days(days: u32, today: NaiveDate) -> Result<Self, LabError> {
        let start = today
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or_else(|| {
                LabError::Validation(format!("Range of {days} days before {today} is out of range"))
            })?;
        Ok(Self { start, end: today })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, at least 1
    pub fn length_days(&self) -> u32 {
        let days = (self.end - self.start).num_days() + 1;
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Every day in the window, in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.length_days() as usize)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Expands the calendar window to inclusive instant bounds
    pub fn to_instants(&self) -> InstantWindow {
        InstantWindow {
            start: start_of_day(self.start),
            end: end_of_day(self.end),
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

#[derive(Debug, Deserialize)]
struct DateWindowRecord {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<DateWindowRecord> for DateWindow {
    type Error = LabError;

    fn try_from(record: DateWindowRecord) -> Result<Self, Self::Error> {
        DateWindow::new(record.start, record.end)
    }
}

/// Inclusive instant bounds `[start, end]` in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstantWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl InstantWindow {
    /// True if `instant` lies within the window, both ends inclusive
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Parses an ISO 8601 calendar date
pub fn parse_date(value: &str) -> Result<NaiveDate, LabError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        LabError::Validation(format!("Invalid date '{value}', expected YYYY-MM-DD: {e}"))
    })
}

/// First instant of a UTC calendar day
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Last representable instant of a UTC calendar day
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date)
        .checked_add_signed(Duration::days(1))
        .map(|next| next - Duration::nanoseconds(1))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_rejects_reversed_bounds() {
        let result = DateWindow::new(date(2024, 3, 12), date(2024, 3, 10));
        assert!(matches!(result, Err(LabError::Validation(_))));
    }

    #[test]
    fn test_single_day_window() {
        let window = DateWindow::single_day(date(2024, 2, 29));
        assert_eq!(window.length_days(), 1);
        assert_eq!(window.days().collect::<Vec<_>>(), vec![date(2024, 2, 29)]);
    }

    #[test]
    fn test_days_cross_month_boundary() {
        let window = DateWindow::parse("2024-02-28", "2024-03-02").unwrap();
        let days: Vec<_> = window.days().collect();
        assert_eq!(
            days,
            vec![date(2024, 2, 28), date(2024, 2, 29), date(2024, 3, 1), date(2024, 3, 2)]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(DateWindow::parse("03/10/2024", "2024-03-12").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }

    #[test]
    fn test_trailing_days_preset() {
        let window = DateWindow::trailing_days(7, date(2024, 3, 15)).unwrap();
        assert_eq!(window.start(), date(2024, 3, 8));
        assert_eq!(window.end(), date(2024, 3, 15));
        assert_eq!(window.length_days(), 8);
    }

    #[test]
    fn test_end_of_day_at_calendar_limit() {
        assert_eq!(end_of_day(NaiveDate::MAX), DateTime::<Utc>::MAX_UTC);
        assert!(start_of_day(NaiveDate::MAX) < end_of_day(NaiveDate::MAX));
    }

    #[test]
    fn test_trailing_days_overflow_is_rejected() {
        let result = DateWindow::trailing_days(u32::MAX, date(2024, 3, 15));
        assert!(matches!(result, Err(LabError::Validation(_))));
    }

    #[test]
    fn test_instant_bounds_cover_full_end_day() {
        let instants = DateWindow::single_day(date(2024, 3, 10)).to_instants();
        let last_second = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap();
        let next_midnight = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();

        assert!(instants.contains(instants.start));
        assert!(instants.contains(last_second));
        assert!(instants.contains(last_second + Duration::milliseconds(999)));
        assert!(!instants.contains(next_midnight));
        assert_eq!(instants.end + Duration::nanoseconds(1), next_midnight);
    }

    #[test]
    fn test_window_deserialize_validates() {
        let ok: DateWindow =
            serde_json::from_str(r#"{"start":"2024-03-10","end":"2024-03-12"}"#).unwrap();
        assert_eq!(ok.length_days(), 3);

        let reversed: Result<DateWindow, _> =
            serde_json::from_str(r#"{"start":"2024-03-12","end":"2024-03-10"}"#);
        assert!(reversed.is_err());
    }

    #[test]
    fn test_display() {
        let window = DateWindow::parse("2024-03-10", "2024-03-12").unwrap();
        assert_eq!(window.to_string(), "2024-03-10 to 2024-03-12");
    }
}
