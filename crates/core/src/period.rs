use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarYear(pub i32);

impl fmt::Display for CalendarYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl CalendarYear {
    pub fn new(year: i32) -> Self {
        CalendarYear(year)
    }

    pub fn of(date: NaiveDate) -> Self {
        CalendarYear(date.year())
    }

    pub fn year(self) -> i32 {
        self.0
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.0
    }

    /// The twelve months, January first.
    pub fn months(self) -> Vec<Month> {
        (1..=12).map(|month| Month { year: self.0, month }).collect()
    }
}

/// A calendar month; `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Month {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

impl Month {
    pub fn of(date: NaiveDate) -> Self {
        Month { year: date.year(), month: date.month() }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Month { year: self.year + 1, month: 1 }
        } else {
            Month { year: self.year, month: self.month + 1 }
        }
    }

    /// Zero-based position within its year.
    pub fn index_in_year(self) -> usize {
        (self.month - 1) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Inclusive on both ends.
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every calendar month the range touches, in order. Empty when `end < start`.
    pub fn months(self) -> Vec<Month> {
        let mut months = Vec::new();
        if self.end < self.start {
            return months;
        }
        let last = Month::of(self.end);
        let mut current = Month::of(self.start);
        while current <= last {
            months.push(current);
            current = current.next();
        }
        months
    }
}

/// The span an aggregation is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
    Year(CalendarYear),
    Range(DateRange),
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Window::Year(year) => write!(f, "{year}"),
            Window::Range(range) => write!(f, "{range}"),
        }
    }
}

impl Window {
    pub fn year(year: i32) -> Self {
        Window::Year(CalendarYear::new(year))
    }

    pub fn range(start: NaiveDate, end: NaiveDate) -> Self {
        Window::Range(DateRange::new(start, end))
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        match self {
            Window::Year(year) => year.contains(date),
            Window::Range(range) => range.contains(date),
        }
    }

    /// Month buckets, in order. Index `i` of a monthly series refers to `months()[i]`.
    pub fn months(self) -> Vec<Month> {
        match self {
            Window::Year(year) => year.months(),
            Window::Range(range) => range.months(),
        }
    }
}
