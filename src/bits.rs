//! Fixed-layout membership bitset shared by all schedule units.

use crate::calendar::{YEAR_BASE, YEAR_MAX};

/// Day-of-month value standing for the last day of any month.
pub(crate) const LAST_DAY_OF_MONTH: u16 = 32;

/// Descriptor of a single schedule unit within the shared bit layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Unit {
    /// Unit name for diagnostics.
    pub name: &'static str,
    /// Offset of the unit's first bit within the layout.
    pub offset: usize,
    /// Smallest allowed value, mapped to the first bit.
    pub low: u16,
    /// Largest allowed value (inclusive).
    pub high: u16,
}

impl Unit {
    const fn width(&self) -> usize {
        (self.high - self.low) as usize + 1
    }

    const fn next(&self, name: &'static str, low: u16, high: u16) -> Unit {
        Unit {
            name,
            offset: self.offset + self.width(),
            low,
            high,
        }
    }
}

pub(crate) const YEARS: Unit = Unit {
    name: "year",
    offset: 0,
    low: YEAR_BASE,
    high: YEAR_MAX,
};
pub(crate) const MONTHS: Unit = YEARS.next("month", 1, 12);
pub(crate) const DAYS: Unit = MONTHS.next("day", 1, LAST_DAY_OF_MONTH);
pub(crate) const WEEKDAYS: Unit = DAYS.next("weekday", 0, 6);
pub(crate) const HOURS: Unit = WEEKDAYS.next("hour", 0, 23);
pub(crate) const MINUTES: Unit = HOURS.next("minute", 0, 59);
pub(crate) const SECONDS: Unit = MINUTES.next("second", 0, 59);
pub(crate) const MILLIS: Unit = SECONDS.next("millisecond", 0, 999);

const TOTAL_BITS: usize = MILLIS.offset + MILLIS.width();
const WORDS: usize = TOTAL_BITS.div_ceil(64);

/// Membership bits of a compiled schedule, one bit per allowed value
/// of every unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub(crate) struct ScheduleBits([u64; WORDS]);

impl ScheduleBits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `value` of `unit` as allowed.
    ///
    /// # Panics
    ///
    /// Panics if `value` is outside of the unit's domain.
    pub fn set(&mut self, unit: Unit, value: u16) {
        let bit = Self::bit_index(unit, value);
        self.0[bit / 64] |= 1 << (bit % 64);
    }

    /// Checks whether `value` of `unit` is allowed. Values outside of
    /// the unit's domain are never allowed.
    pub fn contains(&self, unit: Unit, value: u16) -> bool {
        if !(unit.low..=unit.high).contains(&value) {
            return false;
        }
        let bit = Self::bit_index(unit, value);
        self.0[bit / 64] & (1 << (bit % 64)) != 0
    }

    /// Smallest allowed value of the unit.
    ///
    /// # Panics
    ///
    /// Panics if the unit has no allowed values.
    pub fn min_of(&self, unit: Unit) -> u16 {
        (unit.low..=unit.high)
            .find(|v| self.contains(unit, *v))
            .unwrap_or_else(|| panic!("no values set for {} unit", unit.name))
    }

    /// Largest allowed value of the unit.
    ///
    /// # Panics
    ///
    /// Panics if the unit has no allowed values.
    pub fn max_of(&self, unit: Unit) -> u16 {
        (unit.low..=unit.high)
            .rev()
            .find(|v| self.contains(unit, *v))
            .unwrap_or_else(|| panic!("no values set for {} unit", unit.name))
    }

    /// Smallest allowed value that is `>= from`, or the unit's smallest
    /// allowed value with the carry flag set when there is none.
    pub fn next_in(&self, unit: Unit, from: u16) -> (u16, bool) {
        if from <= unit.high {
            let start = from.max(unit.low);
            if let Some(v) = (start..=unit.high).find(|v| self.contains(unit, *v)) {
                return (v, false);
            }
        }
        (self.min_of(unit), true)
    }

    /// Largest allowed value that is `<= from`, or the unit's largest
    /// allowed value with the borrow flag set when there is none.
    ///
    /// `from` is signed so a caller may probe below the unit's domain
    /// after borrowing.
    pub fn prev_in(&self, unit: Unit, from: i32) -> (u16, bool) {
        if from >= unit.low as i32 {
            let start = (from as u16).min(unit.high);
            if let Some(v) = (unit.low..=start).rev().find(|v| self.contains(unit, *v)) {
                return (v, false);
            }
        }
        (self.max_of(unit), true)
    }

    fn bit_index(unit: Unit, value: u16) -> usize {
        if !(unit.low..=unit.high).contains(&value) {
            panic!("Invalid {} value: {value}", unit.name);
        }
        unit.offset + (value - unit.low) as usize
    }
}
