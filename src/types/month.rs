use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::fmt;
use std::fmt::{Display, Formatter};

/// A calendar month: year first, month (1-12) second.
///
/// Values are not range-checked on construction; operations that build
/// calendar dates return `None` for months chrono cannot represent.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month(pub i32, pub u32);

impl Month {
    pub fn new(year: i32, month: u32) -> Self {
        Self(year, month)
    }

    pub fn year(self) -> i32 {
        self.0
    }

    pub fn month(self) -> u32 {
        self.1
    }

    /// Midnight-aligned first day of the month.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.0, self.1, 1)
    }

    /// Last day of the month, leap years included.
    pub fn last_day(self) -> Option<NaiveDate> {
        let days = days_in_month(self.0, self.1)?;
        NaiveDate::from_ymd_opt(self.0, self.1, days)
    }

    pub fn days(self) -> Option<u32> {
        days_in_month(self.0, self.1)
    }

    /// Number of whole-hour observation slots in the month.
    pub fn hours(self) -> Option<u32> {
        self.days().map(|d| d * 24)
    }

    /// The following calendar month, with year rollover.
    pub fn next(self) -> Month {
        if self.1 >= 12 {
            Month(self.0 + 1, 1)
        } else {
            Month(self.0, self.1 + 1)
        }
    }

    /// Inclusive count of calendar months from `self` through `end`.
    /// Zero or negative when `end` lies before `self`.
    pub fn span_to(self, end: Month) -> i32 {
        (end.0 - self.0) * 12 + (end.1 as i32 - self.1 as i32) + 1
    }

    /// Week-sized sub-windows covering the month: starting at days 1, 8,
    /// 15, 22, 29, each clipped to the month's final day and ending at the
    /// 23:00 hour of its terminal day.
    pub(crate) fn week_windows(self) -> Option<Vec<ObservationWindow>> {
        let first = self.first_day()?;
        let last_day = self.days()?;
        let mut windows = Vec::new();
        let mut day = 1;
        while day <= last_day {
            let start = first.with_day(day)?.and_hms_opt(0, 0, 0)?;
            let end = first.with_day((day + 6).min(last_day))?.and_hms_opt(23, 0, 0)?;
            windows.push(ObservationWindow { start, end });
            day += 7;
        }
        Some(windows)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

impl From<(i32, u32)> for Month {
    fn from((year, month): (i32, u32)) -> Self {
        Month(year, month)
    }
}

/// One week-sized (or shorter, at month end) query slice. Both bounds are
/// inclusive hour marks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ObservationWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ObservationWindow {
    /// Hourly observation count the service is expected to return for this
    /// window at a 60 minute timestep.
    pub fn hours(&self) -> usize {
        ((self.end - self.start).num_hours() + 1) as usize
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_month_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_day_of_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)?;
    let last_day_of_current_month = first_day_of_next_month - Duration::days(1);
    Some(last_day_of_current_month.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2020, 2), Some(29));
        assert_eq!(days_in_month(2021, 2), Some(28));
        assert_eq!(days_in_month(2020, 1), Some(31));
        assert_eq!(days_in_month(2020, 4), Some(30));
        assert_eq!(days_in_month(2020, 12), Some(31));
        assert_eq!(days_in_month(2020, 0), None);
        assert_eq!(days_in_month(2020, 13), None);
    }

    #[test]
    fn month_boundaries() {
        let month = Month::new(2020, 2);
        assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2020, 2, 1));
        assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2020, 2, 29));
        assert_eq!(month.hours(), Some(696));
        assert_eq!(Month::new(2020, 13).first_day(), None);
    }

    #[test]
    fn next_rolls_over_the_year() {
        assert_eq!(Month::new(2019, 12).next(), Month::new(2020, 1));
        assert_eq!(Month::new(2020, 1).next(), Month::new(2020, 2));
    }

    #[test]
    fn span_counts_months_inclusively() {
        let start = Month::new(2019, 11);
        assert_eq!(start.span_to(Month::new(2019, 11)), 1);
        assert_eq!(start.span_to(Month::new(2020, 2)), 4);
        assert_eq!(start.span_to(Month::new(2019, 10)), 0);
        assert_eq!(start.span_to(Month::new(2018, 11)), -11);
    }

    #[test]
    fn formats_as_year_dash_month() {
        assert_eq!(Month::new(2020, 1).to_string(), "2020-01");
        assert_eq!(Month::from((1999, 12)).to_string(), "1999-12");
    }

    #[test]
    fn week_windows_cover_a_31_day_month() {
        let windows = Month::new(2020, 1).week_windows().unwrap();
        let starts: Vec<u32> = windows.iter().map(|w| w.start.date().day()).collect();
        assert_eq!(starts, vec![1, 8, 15, 22, 29]);

        // Last window is clipped to the 31st, still ending at 23:00.
        let last = windows.last().unwrap();
        assert_eq!(
            last.end,
            NaiveDate::from_ymd_opt(2020, 1, 31)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap()
        );
        assert_eq!(last.hours(), 72);

        let total: usize = windows.iter().map(ObservationWindow::hours).sum();
        assert_eq!(total, 744);
    }

    #[test]
    fn week_windows_cover_a_leap_february() {
        // 2020-02 has 29 days; the final one-day window must not be dropped.
        let windows = Month::new(2020, 2).week_windows().unwrap();
        assert_eq!(windows.len(), 5);
        let last = windows.last().unwrap();
        assert_eq!(
            last.start,
            NaiveDate::from_ymd_opt(2020, 2, 29)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
        assert_eq!(last.hours(), 24);

        let total: usize = windows.iter().map(ObservationWindow::hours).sum();
        assert_eq!(total, 696);
    }

    #[test]
    fn week_windows_cover_a_plain_february() {
        let windows = Month::new(2021, 2).week_windows().unwrap();
        assert_eq!(windows.len(), 4);
        let total: usize = windows.iter().map(ObservationWindow::hours).sum();
        assert_eq!(total, 672);
    }

    #[test]
    fn window_hours_count_both_endpoints() {
        let window = ObservationWindow {
            start: NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 1, 7)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap(),
        };
        assert_eq!(window.hours(), 168);
    }
}
