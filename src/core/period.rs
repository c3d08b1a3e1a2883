//! Period resolution
//!
//! Turns the user's requested date range into the current window and an
//! equal-length comparison window that ends the day before the current one
//! starts.

use crate::domain::window::{DateWindow, InstantWindow};
use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

/// Current and comparison windows for one dashboard evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Periods {
    /// The requested calendar window (today when none was requested)
    pub current_days: DateWindow,

    /// The equal-length window immediately preceding `current_days`
    pub previous_days: DateWindow,

    /// `current_days` expanded to instant bounds
    pub current: InstantWindow,

    /// `previous_days` expanded to instant bounds
    pub previous: InstantWindow,
}

impl Periods {
    /// Length of each period in calendar days
    pub fn length_days(&self) -> u32 {
        self.current_days.length_days()
    }
}

/// Resolves the current and previous periods
///
/// With no requested window the result compares today against yesterday.
/// `today` is injected so the result is reproducible.
///
/// # Examples
///
/// ```
/// use lablens::core::period::resolve_periods;
/// use lablens::domain::DateWindow;
/// use chrono::NaiveDate;
///
/// let requested = DateWindow::parse("2024-03-10", "2024-03-12").unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
/// let periods = resolve_periods(Some(&requested), today);
///
/// assert_eq!(periods.previous_days, DateWindow::parse("2024-03-07", "2024-03-09").unwrap());
/// ```
pub fn resolve_periods(requested: Option<&DateWindow>, today: NaiveDate) -> Periods {
    let current_days = requested
        .copied()
        .unwrap_or_else(|| DateWindow::single_day(today));

    let length = i64::from(current_days.length_days());
    // Saturates at the earliest representable date
    let previous_end = current_days.start().pred_opt().unwrap_or(NaiveDate::MIN);
    let previous_start = previous_end
        .checked_sub_signed(Duration::days(length - 1))
        .unwrap_or(NaiveDate::MIN);
    let previous_days = DateWindow::new(previous_start, previous_end)
        .unwrap_or_else(|_| DateWindow::single_day(previous_end));

    let periods = Periods {
        current_days,
        previous_days,
        current: current_days.to_instants(),
        previous: previous_days.to_instants(),
    };

    tracing::debug!(
        current = %periods.current_days,
        previous = %periods.previous_days,
        length_days = length,
        "Resolved comparison periods"
    );

    periods
}

/// Resolves periods against the system clock's current UTC date
pub fn resolve_periods_now(requested: Option<&DateWindow>) -> Periods {
    resolve_periods(requested, Utc::now().date_naive())
}
