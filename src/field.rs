//! Per-field value set algebra of the schedule grammar.

use crate::{
    bits::{ScheduleBits, Unit},
    error::Error,
    parser, Result,
};
use std::{fmt::Display, str::FromStr};

/// Syntactic kind of a field construct, used in validation errors to
/// name the outermost layer the offending value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetKind {
    /// Single value.
    Singular,
    /// Inclusive range of values.
    Range,
    /// Stepped walk over a base set.
    Step,
    /// Comma-separated list.
    List,
}

impl Display for SetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Singular => "singular",
            Self::Range => "range",
            Self::Step => "step",
            Self::List => "list",
        };
        write!(f, "{kind}")
    }
}

/// Base set a step construct walks over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepBase {
    /// Whole unit domain (`*/n`).
    Any,
    /// Inclusive range (`a-b/n`).
    Range(u16, u16),
}

/// Set of allowed values of a single schedule field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldSet {
    /// Every value of the unit's domain.
    Any,
    /// Single value.
    Singular(u16),
    /// Inclusive range of values.
    Range(u16, u16),
    /// Every `step`-th value of the base set, starting at its lower bound.
    Step(StepBase, u16),
    /// Union of the items; items are never `Any` or nested lists.
    List(Vec<FieldSet>),
}

impl FieldSet {
    /// Validates the set against the unit domain `low..=high`.
    ///
    /// A failure inside a compound construct is reported with the
    /// outermost kind, keeping the offending value and the tested
    /// bounds.
    pub(crate) fn validate(&self, low: u16, high: u16) -> Result<()> {
        match self {
            Self::Any => Ok(()),
            Self::Singular(value) => check_bounds(SetKind::Singular, *value, low, high),
            Self::Range(lo, hi) => {
                check_bounds(SetKind::Range, *lo, low, high)?;
                check_bounds(SetKind::Range, *hi, low, high)?;
                if lo > hi {
                    return Err(Error::ReversedRange {
                        kind: SetKind::Range,
                        lo: *lo,
                        hi: *hi,
                    });
                }
                Ok(())
            }
            Self::Step(base, step) => {
                if *step == 0 {
                    return Err(Error::OutOfBounds {
                        kind: SetKind::Step,
                        value: 0,
                        low: 1,
                        high,
                    });
                }
                match base {
                    StepBase::Any => Ok(()),
                    StepBase::Range(lo, hi) => {
                        Self::Range(*lo, *hi).validate(low, high).map_err(|e| e.retag(SetKind::Step))
                    }
                }
            }
            Self::List(items) => items
                .iter()
                .try_for_each(|item| item.validate(low, high).map_err(|e| e.retag(SetKind::List))),
        }
    }

    /// Marks every value of the set in the unit's bit slice.
    pub(crate) fn set_bits(&self, bits: &mut ScheduleBits, unit: Unit) {
        for value in self.values(unit.low, unit.high) {
            bits.set(unit, value);
        }
    }

    /// Renders the fully expanded comma-separated form, each value
    /// zero-padded to `precision` digits.
    pub(crate) fn render(&self, precision: usize, low: u16, high: u16) -> String {
        self.values(low, high)
            .iter()
            .map(|v| format!("{v:0precision$}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Enumerates the set's values in written order, within the unit
    /// domain `low..=high`. Assumes the set is validated.
    fn values(&self, low: u16, high: u16) -> Vec<u16> {
        match self {
            Self::Any => (low..=high).collect(),
            Self::Singular(value) => vec![*value],
            Self::Range(lo, hi) => (*lo..=*hi).collect(),
            Self::Step(base, step) => {
                let (lo, hi) = match base {
                    StepBase::Any => (low, high),
                    StepBase::Range(lo, hi) => (*lo, *hi),
                };
                (lo..=hi).step_by(*step as usize).collect()
            }
            Self::List(items) => items.iter().flat_map(|item| item.values(low, high)).collect(),
        }
    }
}

impl Display for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Singular(value) => write!(f, "{value}"),
            Self::Range(lo, hi) => write!(f, "{lo}-{hi}"),
            Self::Step(StepBase::Any, step) => write!(f, "*/{step}"),
            Self::Step(StepBase::Range(lo, hi), step) => write!(f, "{lo}-{hi}/{step}"),
            Self::List(items) => {
                let items: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "{}", items.join(","))
            }
        }
    }
}

impl FromStr for FieldSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse_field(s)
    }
}

fn check_bounds(kind: SetKind, value: u16, low: u16, high: u16) -> Result<()> {
    if !(low..=high).contains(&value) {
        return Err(Error::OutOfBounds { kind, value, low, high });
    }
    Ok(())
}
