//! Schedule expression compiler and scheduled events engine.

use crate::{
    bits::{ScheduleBits, DAYS, HOURS, LAST_DAY_OF_MONTH, MILLIS, MINUTES, MONTHS, SECONDS, WEEKDAYS, YEARS},
    calendar::{self, YEAR_BASE, YEAR_MAX},
    error::Error,
    moment::{self, Date, Time},
    rep::ScheduleRep,
    Result,
};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Compiled calendar schedule.
///
/// Holds the validated structured representation together with the
/// per-unit membership bits the event queries run on. The default
/// schedule matches every representable instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Schedule {
    rep: ScheduleRep,
    bits: ScheduleBits,
}

impl Schedule {
    /// Parses and compiles a schedule expression.
    ///
    /// # Errors
    ///
    /// Returns a parsing or validation error if the expression is
    /// malformed or contains out-of-domain values.
    pub fn new(schedule: impl AsRef<str>) -> Result<Self> {
        Self::from_rep(schedule.as_ref().parse()?)
    }

    /// Validates and compiles a structured representation.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any field contains out-of-domain
    /// values or a reversed range.
    pub fn from_rep(rep: ScheduleRep) -> Result<Self> {
        rep.validate()?;
        let bits = rep.compile();
        Ok(Self { rep, bits })
    }

    /// Structured representation the schedule was compiled from.
    pub fn rep(&self) -> &ScheduleRep {
        &self.rep
    }

    /// Checks whether the timestamp is a scheduled instant.
    ///
    /// Timestamps with a sub-millisecond component or outside of the
    /// supported year window are never on schedule.
    pub fn is_on_schedule(&self, t: &NaiveDateTime) -> bool {
        if t.nanosecond() % 1_000_000 != 0 {
            return false;
        }
        let Some((date, time)) = moment::split(t) else {
            return false;
        };
        self.matches_date(date)
            && self.bits.contains(HOURS, time.hour as u16)
            && self.bits.contains(MINUTES, time.minute as u16)
            && self.bits.contains(SECONDS, time.second as u16)
            && self.bits.contains(MILLIS, time.millisecond)
    }

    /// Returns the first scheduled instant strictly after `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNextSlot`] when no scheduled instant exists
    /// after `t`.
    pub fn next_event(&self, t: &NaiveDateTime) -> Result<NaiveDateTime> {
        let from = truncate_to_ms(&(*t + TimeDelta::milliseconds(1)));
        if from > max_instant() {
            return Err(Error::NoNextSlot);
        }
        let from = from.max(min_instant());
        let (date, time) = moment::split(&from).ok_or(Error::NoNextSlot)?;

        if self.matches_date(date) {
            if let Some(slot) = self.next_slot_in_day(time) {
                return Ok(moment::join(date, slot));
            }
        }
        let next = date.succ().ok_or(Error::NoNextSlot)?;
        let date = self.next_date(next)?;
        Ok(moment::join(date, self.first_slot()))
    }

    /// Returns the last scheduled instant strictly before `t`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPrevSlot`] when no scheduled instant exists
    /// before `t`.
    pub fn prev_event(&self, t: &NaiveDateTime) -> Result<NaiveDateTime> {
        let truncated = truncate_to_ms(t);
        let from = if truncated < *t {
            truncated
        } else {
            truncated - TimeDelta::milliseconds(1)
        };
        if from < min_instant() {
            return Err(Error::NoPrevSlot);
        }
        let from = from.min(max_instant());
        let (date, time) = moment::split(&from).ok_or(Error::NoPrevSlot)?;

        if self.matches_date(date) {
            if let Some(slot) = self.prev_slot_in_day(time) {
                return Ok(moment::join(date, slot));
            }
        }
        let prev = date.pred().ok_or(Error::NoPrevSlot)?;
        let date = self.prev_date(prev)?;
        Ok(moment::join(date, self.last_slot()))
    }

    /// Returns `t` itself when it is on schedule, the next scheduled
    /// instant otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNextSlot`] when no scheduled instant exists
    /// at or after `t`.
    pub fn nearest_event(&self, t: &NaiveDateTime) -> Result<NaiveDateTime> {
        if self.is_on_schedule(t) {
            Ok(*t)
        } else {
            self.next_event(t)
        }
    }

    /// Returns `t` itself when it is on schedule, the previous
    /// scheduled instant otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPrevSlot`] when no scheduled instant exists
    /// at or before `t`.
    pub fn nearest_prev_event(&self, t: &NaiveDateTime) -> Result<NaiveDateTime> {
        if self.is_on_schedule(t) {
            Ok(*t)
        } else {
            self.prev_event(t)
        }
    }

    fn matches_date(&self, date: Date) -> bool {
        self.bits.contains(YEARS, date.year())
            && self.bits.contains(MONTHS, date.month() as u16)
            && self.day_matches(date.year(), date.month(), date.day())
            && self.bits.contains(WEEKDAYS, date.day_of_week() as u16)
    }

    // Day bit or the last-day sentinel when the day closes the month.
    fn day_matches(&self, year: u16, month: u8, day: u8) -> bool {
        self.bits.contains(DAYS, day as u16)
            || (day == calendar::days_in_month(year, month) && self.bits.contains(DAYS, LAST_DAY_OF_MONTH))
    }

    /// First matching date at or after `from`.
    fn next_date(&self, from: Date) -> Result<Date> {
        let mut year = from.year();
        let mut month = from.month() as u16;
        let mut day = from.day();

        loop {
            let (y, carry) = self.bits.next_in(YEARS, year);
            if carry {
                return Err(Error::NoNextSlot);
            }
            if y != year {
                year = y;
                month = 1;
                day = 1;
            }

            let (m, carry) = self.bits.next_in(MONTHS, month);
            if carry {
                year += 1;
                month = 1;
                day = 1;
                continue;
            }
            if m != month {
                month = m;
                day = 1;
            }

            match self.next_day_in_month(year, month as u8, day) {
                Some(d) => return Ok(Date::new(year, month as u8, d)),
                None => {
                    month += 1;
                    day = 1;
                }
            }
        }
    }

    /// Last matching date at or before `from`.
    fn prev_date(&self, from: Date) -> Result<Date> {
        let mut year = from.year() as i32;
        let mut month = from.month() as i32;
        let mut day = from.day();

        loop {
            let (y, borrow) = self.bits.prev_in(YEARS, year);
            if borrow {
                return Err(Error::NoPrevSlot);
            }
            if y as i32 != year {
                year = y as i32;
                month = 12;
                day = LAST_DAY_OF_MONTH as u8;
            }

            let (m, borrow) = self.bits.prev_in(MONTHS, month);
            if borrow {
                year -= 1;
                month = 12;
                day = LAST_DAY_OF_MONTH as u8;
                continue;
            }
            if m as i32 != month {
                month = m as i32;
                day = LAST_DAY_OF_MONTH as u8;
            }

            match self.prev_day_in_month(year as u16, month as u8, day) {
                Some(d) => return Ok(Date::new(year as u16, month as u8, d)),
                None => {
                    month -= 1;
                    day = LAST_DAY_OF_MONTH as u8;
                }
            }
        }
    }

    fn next_day_in_month(&self, year: u16, month: u8, from: u8) -> Option<u8> {
        let last = calendar::days_in_month(year, month);
        (from..=last).find(|d| {
            self.day_matches(year, month, *d)
                && self.bits.contains(WEEKDAYS, calendar::day_of_week(year, month, *d) as u16)
        })
    }

    fn prev_day_in_month(&self, year: u16, month: u8, from: u8) -> Option<u8> {
        let last = calendar::days_in_month(year, month);
        (1..=from.min(last)).rev().find(|d| {
            self.day_matches(year, month, *d)
                && self.bits.contains(WEEKDAYS, calendar::day_of_week(year, month, *d) as u16)
        })
    }

    /// First scheduled time of day at or after `from`, `None` when the
    /// day has no remaining slot. Whenever a coarser unit moves
    /// forward, every finer one restarts at its smallest value.
    fn next_slot_in_day(&self, from: Time) -> Option<Time> {
        let (mut millisecond, carry) = self.bits.next_in(MILLIS, from.millisecond);

        let probe = from.second as u16 + carry as u16;
        let (mut second, carry) = self.bits.next_in(SECONDS, probe);
        if second != probe {
            millisecond = self.bits.min_of(MILLIS);
        }

        let probe = from.minute as u16 + carry as u16;
        let (minute, carry) = self.bits.next_in(MINUTES, probe);
        if minute != probe {
            second = self.bits.min_of(SECONDS);
            millisecond = self.bits.min_of(MILLIS);
        }

        let probe = from.hour as u16 + carry as u16;
        let (hour, carry) = self.bits.next_in(HOURS, probe);
        if carry {
            return None;
        }
        if hour != probe {
            return Some(Time {
                hour: hour as u8,
                ..self.first_slot()
            });
        }

        Some(Time {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            millisecond,
        })
    }

    /// Last scheduled time of day at or before `from`, `None` when the
    /// day has no earlier slot. Whenever a coarser unit moves backward,
    /// every finer one restarts at its largest value.
    fn prev_slot_in_day(&self, from: Time) -> Option<Time> {
        let (mut millisecond, borrow) = self.bits.prev_in(MILLIS, from.millisecond as i32);

        let probe = from.second as i32 - borrow as i32;
        let (mut second, borrow) = self.bits.prev_in(SECONDS, probe);
        if second as i32 != probe {
            millisecond = self.bits.max_of(MILLIS);
        }

        let probe = from.minute as i32 - borrow as i32;
        let (minute, borrow) = self.bits.prev_in(MINUTES, probe);
        if minute as i32 != probe {
            second = self.bits.max_of(SECONDS);
            millisecond = self.bits.max_of(MILLIS);
        }

        let probe = from.hour as i32 - borrow as i32;
        let (hour, borrow) = self.bits.prev_in(HOURS, probe);
        if borrow {
            return None;
        }
        if hour as i32 != probe {
            return Some(Time {
                hour: hour as u8,
                ..self.last_slot()
            });
        }

        Some(Time {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
            millisecond,
        })
    }

    fn first_slot(&self) -> Time {
        Time {
            hour: self.bits.min_of(HOURS) as u8,
            minute: self.bits.min_of(MINUTES) as u8,
            second: self.bits.min_of(SECONDS) as u8,
            millisecond: self.bits.min_of(MILLIS),
        }
    }

    fn last_slot(&self) -> Time {
        Time {
            hour: self.bits.max_of(HOURS) as u8,
            minute: self.bits.max_of(MINUTES) as u8,
            second: self.bits.max_of(SECONDS) as u8,
            millisecond: self.bits.max_of(MILLIS),
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        let rep = ScheduleRep::default();
        let bits = rep.compile();
        Self { rep, bits }
    }
}

// Implementation of standard conversion traits.
impl Display for Schedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rep)
    }
}

impl FromStr for Schedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Schedule {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for Schedule {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for Schedule {
    type Error = Error;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Schedule> for String {
    fn from(value: Schedule) -> Self {
        value.to_string()
    }
}

/// First representable instant, 2000-01-01 00:00:00.000.
fn min_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(YEAR_BASE as i32, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Last representable instant, 2100-12-31 23:59:59.999.
fn max_instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(YEAR_MAX as i32, 12, 31)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap()
}

// Drops the sub-millisecond part, rounding toward the past.
fn truncate_to_ms(t: &NaiveDateTime) -> NaiveDateTime {
    let sub = t.nanosecond() % 1_000_000;
    if sub == 0 {
        *t
    } else {
        *t - TimeDelta::nanoseconds(sub as i64)
    }
}
