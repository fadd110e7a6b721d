//! Month grid rendering and month navigation
//!
//! A month is laid out Sunday-first: seven weekday headers, then one blank
//! cell per weekday before the 1st, then one cell per day. Events are placed
//! by comparing their `YYYY-MM-DD` key with the cell's key, so a date is
//! never shifted by a timezone conversion.

use chrono::{Datelike, Local, Months, NaiveDate};
use thiserror::Error;

use crate::models::event::Event;

/// Years a [`YearMonth`] can hold; keys are always four-digit years
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Please enter a valid year and month")]
    InvalidJump,

    #[error("{year}-{month} is not a valid month")]
    InvalidMonth { year: i32, month: u32 },
}

/// Language of the weekday headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Korean,
}

impl Locale {
    /// Weekday labels, Sunday first
    pub fn weekday_labels(self) -> [&'static str; 7] {
        match self {
            Locale::English => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            Locale::Korean => ["일", "월", "화", "수", "목", "금", "토"],
        }
    }
}

/// A calendar month. Always holds the first day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    /// `month` is 1-based
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(CalendarError::InvalidMonth { year, month });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(YearMonth)
            .ok_or(CalendarError::InvalidMonth { year, month })
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        YearMonth(date.with_day(1).unwrap_or(date))
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    /// Parse the raw text of the "jump to date" inputs.
    ///
    /// Both fields must be integers; a year of 0 is rejected like an empty
    /// one, and the month must be within 1..=12.
    pub fn jump(year_text: &str, month_text: &str) -> Result<Self, CalendarError> {
        let year: i32 = year_text.trim().parse().map_err(|_| CalendarError::InvalidJump)?;
        let month: u32 = month_text.trim().parse().map_err(|_| CalendarError::InvalidJump)?;
        if year == 0 || !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidJump);
        }
        Self::new(year, month).map_err(|_| CalendarError::InvalidJump)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1-based month number
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Weekday of the 1st, 0 = Sunday .. 6 = Saturday
    pub fn first_weekday(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Number of days in the month (the day before the 1st of next month)
    pub fn days_in_month(&self) -> u32 {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }

    /// The following month; December rolls into January of the next year.
    /// Stays put at the last representable month.
    pub fn next(&self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .filter(|d| d.year() <= MAX_YEAR)
            .map(YearMonth)
            .unwrap_or(*self)
    }

    /// The preceding month; January rolls back into December.
    /// Stays put at the first representable month.
    pub fn prev(&self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .filter(|d| d.year() >= MIN_YEAR)
            .map(YearMonth)
            .unwrap_or(*self)
    }

    /// `YYYY-MM-DD` key of a day in this month
    pub fn date_key(&self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year(), self.month(), day)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// One day of the month with the events that fall on it
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a> {
    pub day: u32,
    pub key: String,
    pub events: Vec<&'a Event>,
    /// Whether clicking an event opens it for editing
    pub clickable: bool,
}

/// A rendered month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid<'a> {
    pub month: YearMonth,
    pub headers: [&'static str; 7],
    /// Blank cells before the 1st
    pub leading_blanks: usize,
    pub days: Vec<DayCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    /// Cells split into rows of seven; `None` is a blank cell
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell<'a>>>> {
        let mut cells: Vec<Option<&DayCell<'a>>> = Vec::with_capacity(42);
        cells.extend(std::iter::repeat(None).take(self.leading_blanks));
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }

    /// The cell for `day`, if the month has it
    pub fn day(&self, day: u32) -> Option<&DayCell<'a>> {
        self.days.get(day.checked_sub(1)? as usize)
    }
}

/// Lay out `month` and place every event dated inside it on its day.
///
/// `editable` marks event entries as clickable; guests get `false`.
pub fn render(month: YearMonth, events: &[Event], locale: Locale, editable: bool) -> MonthGrid<'_> {
    let days = (1..=month.days_in_month())
        .map(|day| {
            let key = month.date_key(day);
            let events = events.iter().filter(|e| e.date_key() == key).collect();
            DayCell {
                day,
                key,
                events,
                clickable: editable,
            }
        })
        .collect();

    MonthGrid {
        month,
        headers: locale.weekday_labels(),
        leading_blanks: month.first_weekday() as usize,
        days,
    }
}
