use millicron::{Error, FieldSet, Schedule, SetKind};
use rstest::rstest;
use rstest_reuse::{self, apply, template};

#[template]
#[rstest]
#[case::empty("")]
#[case::single_star("*")]
#[case::star_in_list("*,*:*:*")]
#[case::mixed_separators("*.*:*")]
#[case::negative_hour("-10:00:00")]
#[case::negative_minute("10:-10:00")]
#[case::negative_second("10:10:-10")]
#[case::negative_millisecond("10:10:10.-10")]
#[case::hour_too_big("24:00:00")]
#[case::minute_too_big("10:60:00")]
#[case::second_too_big("10:10:60")]
#[case::year_too_small("1999.01.01 *:*:*")]
#[case::year_too_big("2101.01.01 *:*:*")]
#[case::negative_year("-2101.01.01 *:*:*")]
#[case::month_too_big("2000.13.01 *:*:*")]
#[case::month_zero("2000.00.01 *:*:*")]
#[case::negative_month("2000.-1.01 *:*:*")]
#[case::day_zero("2000.01.00 *:*:*")]
#[case::day_too_big("2000.01.33 *:*:*")]
#[case::negative_day("2000.01.-1 *:*:*")]
#[case::negative_weekday("*.*.* -1 *:*:*")]
#[case::dotted_time_part("*.*.* -1 *.*.*")]
#[case::weekday_too_big("*.*.* 7 *:*:*")]
#[case::too_many_fields("*.*.* * *:*:*.*.*")]
#[case::step_without_base("*:*:5/2")]
#[case::zero_step("*/0:*:*")]
fn invalid_inputs(#[case] input: &str) {}

#[apply(invalid_inputs)]
fn new_rejects_invalid_input(#[case] input: &str) {
    assert!(Schedule::new(input).is_err(), "{input:?}");
}

#[apply(invalid_inputs)]
fn from_str_rejects_invalid_input(#[case] input: &str) {
    assert!(input.parse::<Schedule>().is_err(), "{input:?}");
}

#[rstest]
#[case("*:*:*")]
#[case("10:20:30")]
#[case("10:20:30.400")]
#[case("2020.09.01 10:20:30")]
#[case("2020.09.01 10:20:30.400")]
#[case("*.*.* * 10:20:30")]
#[case("*.*.* 1-5 10:20:30.400")]
#[case("2100.12.31 23:59:59.999")]
#[case("*.*.32 12:00:00")]
#[case("*.9.*/2 1-5 10:00:00.000")]
#[case("*.*.* * *:*:*.1,2,3-5,10-20/3")]
#[case(" 10:20:30 ")]
fn accepts_valid_input(#[case] input: &str) {
    assert!(Schedule::new(input).is_ok(), "{input:?}");
}

#[rstest]
#[case("24:00:00", Error::OutOfBounds { kind: SetKind::Singular, value: 24, low: 0, high: 23 })]
#[case("*.*.* 7 *:*:*", Error::OutOfBounds { kind: SetKind::Singular, value: 7, low: 0, high: 6 })]
#[case("*:*:50-70", Error::OutOfBounds { kind: SetKind::Range, value: 70, low: 0, high: 59 })]
#[case("*:*:1,2,60", Error::OutOfBounds { kind: SetKind::List, value: 60, low: 0, high: 59 })]
#[case("*:*:*.100-2000/50", Error::OutOfBounds { kind: SetKind::Step, value: 2000, low: 0, high: 999 })]
#[case("*:30-10:*", Error::ReversedRange { kind: SetKind::Range, lo: 30, hi: 10 })]
fn reports_offending_value_and_bounds(#[case] input: &str, #[case] expected: Error) {
    assert_eq!(Schedule::new(input), Err(expected));
}

#[test]
fn list_with_ranges_and_steps_expands_fully() {
    let schedule = Schedule::new("*.*.* * *:1,2,3-5,10-20/3:*").unwrap();
    let expanded = schedule.rep().render(true);
    let minutes = expanded.split(&[' ', ':'][..]).nth(3).unwrap().to_string();

    assert_eq!(minutes, "01,02,03,04,05,10,13,16,19");
}

#[test]
fn expanded_rendering_compiles_to_same_schedule() {
    for expr in [
        "*.9.*/2 1-5 10:00:00.000",
        "*.*.32 12:00:00",
        "2020-2022.*/3.1,15 10:30:00.500",
        "*:*:*",
    ] {
        let schedule = Schedule::new(expr).unwrap();
        let expanded = Schedule::new(schedule.rep().render(true)).unwrap();

        let t = chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(schedule.next_event(&t), expanded.next_event(&t), "{expr}");
        assert_eq!(schedule.prev_event(&t), expanded.prev_event(&t), "{expr}");
    }
}

#[test]
fn compact_display_round_trips() {
    for expr in ["10:20:30", "*.*.* 1-5 10:20:30.400", "*.9.*/2 1-5 10:00:00.000"] {
        let schedule = Schedule::new(expr).unwrap();
        assert_eq!(Schedule::new(schedule.to_string()).unwrap(), schedule, "{expr}");
    }
}

#[test]
fn milliseconds_default_to_zero_only_when_omitted() {
    let explicit = Schedule::new("10:20:30.0").unwrap();
    let omitted = Schedule::new("10:20:30").unwrap();
    let any = Schedule::new("10:20:30.*").unwrap();

    assert_eq!(omitted.rep().milliseconds, FieldSet::Singular(0));
    assert_eq!(omitted, explicit);
    assert_eq!(any.rep().milliseconds, FieldSet::Any);
}

#[cfg(feature = "serde")]
mod serde {
    use super::*;

    #[test]
    fn schedule_round_trips_through_string_form() {
        let schedule = Schedule::new("*.9.*/2 1-5 10:00:00.000").unwrap();

        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(json, format!("\"{schedule}\""));
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }

    #[test]
    fn invalid_string_fails_to_deserialize() {
        assert!(serde_json::from_str::<Schedule>("\"*.*:*\"").is_err());
    }
}
