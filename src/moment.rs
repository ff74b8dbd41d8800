//! Compact calendar date and time-of-day values used by the event
//! search, interconvertible with chrono's naive types.

use crate::calendar::{self, YEAR_BASE, YEAR_MAX};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Calendar date within the supported window, year stored as an
/// offset from the first supported one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Date {
    year: u8,
    month: u8,
    day: u8,
}

impl Date {
    pub fn new(year: u16, month: u8, day: u8) -> Self {
        debug_assert!((YEAR_BASE..=YEAR_MAX).contains(&year));
        Self {
            year: (year - YEAR_BASE) as u8,
            month,
            day,
        }
    }

    pub fn year(&self) -> u16 {
        YEAR_BASE + self.year as u16
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn day_of_week(&self) -> u8 {
        calendar::day_of_week(self.year(), self.month, self.day)
    }

    pub fn days_in_month(&self) -> u8 {
        calendar::days_in_month(self.year(), self.month)
    }

    /// Next calendar day, `None` past the end of the window.
    pub fn succ(&self) -> Option<Self> {
        if self.day < self.days_in_month() {
            Some(Self {
                day: self.day + 1,
                ..*self
            })
        } else if self.month < 12 {
            Some(Self {
                month: self.month + 1,
                day: 1,
                ..*self
            })
        } else if self.year() < YEAR_MAX {
            Some(Self::new(self.year() + 1, 1, 1))
        } else {
            None
        }
    }

    /// Previous calendar day, `None` before the start of the window.
    pub fn pred(&self) -> Option<Self> {
        if self.day > 1 {
            Some(Self {
                day: self.day - 1,
                ..*self
            })
        } else if self.month > 1 {
            let date = Self {
                month: self.month - 1,
                day: 1,
                ..*self
            };
            Some(Self {
                day: date.days_in_month(),
                ..date
            })
        } else if self.year() > YEAR_BASE {
            Some(Self::new(self.year() - 1, 12, 31))
        } else {
            None
        }
    }

    fn from_naive(date: &NaiveDate) -> Option<Self> {
        let year = date.year();
        if !(YEAR_BASE as i32..=YEAR_MAX as i32).contains(&year) {
            return None;
        }
        Some(Self::new(year as u16, date.month() as u8, date.day() as u8))
    }

    fn to_naive(self) -> NaiveDate {
        // The window guarantees a representable date.
        NaiveDate::from_ymd_opt(self.year() as i32, self.month as u32, self.day as u32).unwrap()
    }
}

/// Time of day with millisecond resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub millisecond: u16,
}

impl Time {
    fn from_naive(time: &NaiveTime) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
            second: time.second() as u8,
            // Leap seconds carry the extra time in the nanos field.
            millisecond: (time.nanosecond() / 1_000_000).min(999) as u16,
        }
    }

    fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_milli_opt(
            self.hour as u32,
            self.minute as u32,
            self.second as u32,
            self.millisecond as u32,
        )
        .unwrap()
    }
}

/// Splits a timestamp into the compact pair, `None` outside of the
/// supported year window.
pub(crate) fn split(t: &NaiveDateTime) -> Option<(Date, Time)> {
    Some((Date::from_naive(&t.date())?, Time::from_naive(&t.time())))
}

pub(crate) fn join(date: Date, time: Time) -> NaiveDateTime {
    NaiveDateTime::new(date.to_naive(), time.to_naive())
}
