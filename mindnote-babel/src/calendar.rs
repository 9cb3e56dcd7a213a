//! Week and quarter arithmetic for periodic digests.

use chrono::{Datelike, Days, Local, NaiveDate};

/// The reporting period a digest covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub date: NaiveDate,
    /// ISO week number of `date`
    pub current_week: u32,
    /// ISO week number one week earlier (wraps across years)
    pub previous_week: u32,
    /// 1..=4
    pub quarter: u32,
}

impl Period {
    pub fn from_date(date: NaiveDate) -> Self {
        let previous = date - Days::new(7);
        Self {
            date,
            current_week: date.iso_week().week(),
            previous_week: previous.iso_week().week(),
            quarter: (date.month() + 2) / 3,
        }
    }

    /// The period containing today's local date.
    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    /// Week tokens a periodic digest keeps, previous week first.
    pub fn retained_weeks(&self) -> [String; 2] {
        [
            format!("W{}", self.previous_week),
            format!("W{}", self.current_week),
        ]
    }

    pub fn quarter_token(&self) -> String {
        format!("Q{}", self.quarter)
    }
}

/// `YYYY-MM-DD` stamp used in document headers.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
