//! Schedule expression parser: single-field grammar and whole-string
//! layout dispatch.

use crate::{
    error::Error,
    field::{FieldSet, StepBase},
    rep::ScheduleRep,
    Result,
};

const SEPARATORS: [char; 3] = ['.', ':', ' '];

// Separator character sequences of the recognized layouts.
const TIME: &str = "::";
const TIME_MS: &str = "::.";
const DATE_TIME: &str = ".. ::";
const DATE_TIME_MS: &str = ".. ::.";
const DATE_DOW_TIME: &str = "..  ::";
const DATE_DOW_TIME_MS: &str = "..  ::.";

/// Parses a whole schedule expression into its structured
/// representation and validates it against the unit domains.
pub(crate) fn parse_schedule(input: &str) -> Result<ScheduleRep> {
    let input = input.trim();

    let mut separators = String::new();
    let mut fields = Vec::new();
    let mut start = 0;
    for (pos, ch) in input.char_indices() {
        if SEPARATORS.contains(&ch) {
            if separators.len() == DATE_DOW_TIME_MS.len() {
                return Err(Error::InvalidSchedule(input.to_string()));
            }
            separators.push(ch);
            fields.push(&input[start..pos]);
            start = pos + ch.len_utf8();
        }
    }
    fields.push(&input[start..]);

    let mut rep = ScheduleRep::default();
    match separators.as_str() {
        TIME | TIME_MS => {
            rep.hours = parse_field(fields[0])?;
            rep.minutes = parse_field(fields[1])?;
            rep.seconds = parse_field(fields[2])?;
        }
        DATE_TIME | DATE_TIME_MS => {
            rep.years = parse_field(fields[0])?;
            rep.months = parse_field(fields[1])?;
            rep.days = parse_field(fields[2])?;
            rep.hours = parse_field(fields[3])?;
            rep.minutes = parse_field(fields[4])?;
            rep.seconds = parse_field(fields[5])?;
        }
        DATE_DOW_TIME | DATE_DOW_TIME_MS => {
            rep.years = parse_field(fields[0])?;
            rep.months = parse_field(fields[1])?;
            rep.days = parse_field(fields[2])?;
            rep.weekdays = parse_field(fields[3])?;
            rep.hours = parse_field(fields[4])?;
            rep.minutes = parse_field(fields[5])?;
            rep.seconds = parse_field(fields[6])?;
        }
        _ => return Err(Error::InvalidSchedule(input.to_string())),
    }
    // An omitted milliseconds field means the exact start of the second.
    rep.milliseconds = if separators.ends_with('.') {
        parse_field(fields[fields.len() - 1])?
    } else {
        FieldSet::Singular(0)
    };

    rep.validate()?;
    Ok(rep)
}

/// Parses a single field: a term or a comma-separated list of terms.
pub(crate) fn parse_field(field: &str) -> Result<FieldSet> {
    if field.is_empty() {
        return Err(Error::InvalidField(field.to_string()));
    }
    if !field.contains(',') {
        return parse_term(field);
    }

    let items: Vec<FieldSet> = field
        .split(',')
        .map(|item| {
            // A bare `*` inside a list makes the other items meaningless.
            if item == "*" {
                Err(Error::InvalidField(field.to_string()))
            } else {
                parse_term(item)
            }
        })
        .collect::<Result<_>>()?;
    Ok(FieldSet::List(items))
}

// Single term: `*`, value, range or step. The rightmost `/` splits off
// the step, the rightmost `-` before it splits the range.
fn parse_term(term: &str) -> Result<FieldSet> {
    if term == "*" {
        return Ok(FieldSet::Any);
    }

    if let Some(step_pos) = term.rfind('/') {
        let step =
            parse_value(&term[step_pos + 1..]).ok_or_else(|| Error::InvalidField(term.to_string()))?;
        let base = &term[..step_pos];
        let base = if base == "*" {
            StepBase::Any
        } else if let Some(dash_pos) = base.rfind('-') {
            let lo = parse_value(&base[..dash_pos]).ok_or_else(|| Error::InvalidField(term.to_string()))?;
            let hi =
                parse_value(&base[dash_pos + 1..]).ok_or_else(|| Error::InvalidField(term.to_string()))?;
            StepBase::Range(lo, hi)
        } else {
            // A step needs `*` or a range to walk over.
            return Err(Error::InvalidField(term.to_string()));
        };
        return Ok(FieldSet::Step(base, step));
    }

    if let Some(dash_pos) = term.rfind('-') {
        let lo = parse_value(&term[..dash_pos]).ok_or_else(|| Error::InvalidField(term.to_string()))?;
        let hi =
            parse_value(&term[dash_pos + 1..]).ok_or_else(|| Error::InvalidField(term.to_string()))?;
        return Ok(FieldSet::Range(lo, hi));
    }

    parse_value(term)
        .map(FieldSet::Singular)
        .ok_or_else(|| Error::InvalidField(term.to_string()))
}

// Digit-only value, no signs or whitespace.
fn parse_value(value: &str) -> Option<u16> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*", FieldSet::Any)]
    #[case("7", FieldSet::Singular(7))]
    #[case("007", FieldSet::Singular(7))]
    #[case("3-5", FieldSet::Range(3, 5))]
    #[case("*/4", FieldSet::Step(StepBase::Any, 4))]
    #[case("10-20/3", FieldSet::Step(StepBase::Range(10, 20), 3))]
    #[case("1,2,3-5,10-20/3", FieldSet::List(vec![
        FieldSet::Singular(1),
        FieldSet::Singular(2),
        FieldSet::Range(3, 5),
        FieldSet::Step(StepBase::Range(10, 20), 3),
    ]))]
    #[case("*/2,7", FieldSet::List(vec![FieldSet::Step(StepBase::Any, 2), FieldSet::Singular(7)]))]
    fn well_formed_fields(#[case] input: &str, #[case] expected: FieldSet) {
        assert_eq!(parse_field(input), Ok(expected));
    }

    #[rstest]
    #[case("")]
    #[case(" ")]
    #[case("a")]
    #[case("+5")]
    #[case("-5")]
    #[case("5-")]
    #[case("-")]
    #[case("1.5")]
    #[case("5/2")]
    #[case("*/")]
    #[case("/2")]
    #[case("1/2-3")]
    #[case("99999")]
    #[case("*,*")]
    #[case("*,1")]
    #[case("1,*")]
    #[case("1,,2")]
    fn malformed_fields(#[case] input: &str) {
        assert!(matches!(parse_field(input), Err(Error::InvalidField(_))));
    }

    #[rstest]
    #[case("10:20:30")]
    #[case("10:20:30.400")]
    #[case("2020.09.01 10:20:30")]
    #[case("2020.09.01 10:20:30.400")]
    #[case("*.*.* * 10:20:30")]
    #[case("*.*.* * 10:20:30.400")]
    #[case("  *:*:*  ")]
    fn recognized_layouts(#[case] input: &str) {
        assert!(parse_schedule(input).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("*")]
    #[case("*.*:*")]
    #[case("*:*")]
    #[case("*:*:*:*")]
    #[case("*.* *:*:*")]
    #[case("*.*.* *.*:*")]
    #[case("* * * * *:*:*")]
    #[case("*.*.* * *:*:*.*.*")]
    fn unrecognized_layouts(#[case] input: &str) {
        assert!(matches!(parse_schedule(input), Err(Error::InvalidSchedule(_))));
    }

    #[test]
    fn omitted_milliseconds_mean_zero() {
        let rep = parse_schedule("10:20:30").unwrap();
        assert_eq!(rep.milliseconds, FieldSet::Singular(0));

        let rep = parse_schedule("10:20:30.*").unwrap();
        assert_eq!(rep.milliseconds, FieldSet::Any);
    }

    #[test]
    fn omitted_date_means_any() {
        let rep = parse_schedule("10:20:30").unwrap();
        assert_eq!(rep.years, FieldSet::Any);
        assert_eq!(rep.months, FieldSet::Any);
        assert_eq!(rep.days, FieldSet::Any);
        assert_eq!(rep.weekdays, FieldSet::Any);
    }
}
