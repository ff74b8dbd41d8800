//! Structured schedule representation, one value set per unit.

use crate::{
    bits::{self, Unit},
    error::Error,
    field::FieldSet,
    parser, Result,
};
use std::{fmt::Display, str::FromStr};

/// Structured representation of a schedule: one [`FieldSet`] per unit.
///
/// The default value has every field set to [`FieldSet::Any`] and
/// matches every representable instant. A representation built in code
/// is unchecked until it is compiled into a
/// [`Schedule`](crate::Schedule).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleRep {
    /// Years, 2000-2100.
    pub years: FieldSet,
    /// Months, 1-12.
    pub months: FieldSet,
    /// Days of month, 1-32; 32 stands for the last day of any month.
    pub days: FieldSet,
    /// Days of week, 0-6, 0 is Sunday.
    pub weekdays: FieldSet,
    /// Hours, 0-23.
    pub hours: FieldSet,
    /// Minutes, 0-59.
    pub minutes: FieldSet,
    /// Seconds, 0-59.
    pub seconds: FieldSet,
    /// Milliseconds, 0-999.
    pub milliseconds: FieldSet,
}

impl Default for ScheduleRep {
    fn default() -> Self {
        Self {
            years: FieldSet::Any,
            months: FieldSet::Any,
            days: FieldSet::Any,
            weekdays: FieldSet::Any,
            hours: FieldSet::Any,
            minutes: FieldSet::Any,
            seconds: FieldSet::Any,
            milliseconds: FieldSet::Any,
        }
    }
}

// Field list with its unit descriptor and natural rendering precision.
const FIELDS: [(fn(&ScheduleRep) -> &FieldSet, Unit, usize); 8] = [
    (|r| &r.years, bits::YEARS, 4),
    (|r| &r.months, bits::MONTHS, 2),
    (|r| &r.days, bits::DAYS, 2),
    (|r| &r.weekdays, bits::WEEKDAYS, 1),
    (|r| &r.hours, bits::HOURS, 2),
    (|r| &r.minutes, bits::MINUTES, 2),
    (|r| &r.seconds, bits::SECONDS, 2),
    (|r| &r.milliseconds, bits::MILLIS, 3),
];

impl ScheduleRep {
    /// Validates every field against its unit's domain.
    pub fn validate(&self) -> Result<()> {
        FIELDS
            .iter()
            .try_for_each(|(field, unit, _)| field(self).validate(unit.low, unit.high))
    }

    /// Materializes the membership bits of every field.
    pub(crate) fn compile(&self) -> bits::ScheduleBits {
        let mut bits = bits::ScheduleBits::new();
        for (field, unit, _) in &FIELDS {
            field(self).set_bits(&mut bits, *unit);
        }
        bits
    }

    /// Renders the schedule in the full
    /// `yyyy.MM.dd w HH:mm:ss.fff` layout.
    ///
    /// With `expand` set, every field is written as the exhaustive
    /// zero-padded enumeration of its values; otherwise the compact
    /// syntax is reproduced.
    pub fn render(&self, expand: bool) -> String {
        let parts: Vec<String> = FIELDS
            .iter()
            .map(|(field, unit, precision)| {
                if expand {
                    field(self).render(*precision, unit.low, unit.high)
                } else {
                    field(self).to_string()
                }
            })
            .collect();
        format!(
            "{}.{}.{} {} {}:{}:{}.{}",
            parts[0], parts[1], parts[2], parts[3], parts[4], parts[5], parts[6], parts[7]
        )
    }
}

impl Display for ScheduleRep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

impl FromStr for ScheduleRep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_schedule(s)
    }
}
