//! Millisecond-resolution calendar schedule engine.
#![deny(unsafe_code, warnings, missing_docs)]

//! This crate compiles compact cron-like schedule expressions into
//! per-unit membership bitsets and answers next, previous and nearest
//! scheduled-instant queries with millisecond resolution. Timestamps
//! are naive (no time zone) and limited to the years 2000-2100.
//!
//! ## Schedule expression format
//!
//! An expression is a sequence of fields glued by fixed separators.
//! The recognized layouts, selected by the exact separator sequence:
//!
//! | Layout                      | Example                       |
//! |-----------------------------|-------------------------------|
//! | `HH:mm:ss`                  | `10:20:30`                    |
//! | `HH:mm:ss.fff`              | `10:20:30.400`                |
//! | `yyyy.MM.dd HH:mm:ss`       | `2020.09.01 10:20:30`         |
//! | `yyyy.MM.dd HH:mm:ss.fff`   | `2020.09.01 10:20:30.400`     |
//! | `yyyy.MM.dd w HH:mm:ss`     | `*.*.* 1-5 10:20:30`          |
//! | `yyyy.MM.dd w HH:mm:ss.fff` | `*.*.* 1-5 10:20:30.400`      |
//!
//! Omitted date and weekday fields default to `*`; an omitted
//! milliseconds field defaults to `0`, so `10:20:30` fires exactly at
//! the start of the second.
//!
//! Each field is `*`, a single value, a range `a-b`, a step `*/n` or
//! `a-b/n`, or a comma-separated list of those (without `*` and
//! without nested lists). Allowed values per field:
//!
//! | Field        | Allowed values | Notes                            |
//! |--------------|----------------|----------------------------------|
//! | Years        | 2000-2100      |                                  |
//! | Months       | 1-12           |                                  |
//! | Days         | 1-32           | `32` is the last day of a month  |
//! | Day of week  | 0-6            | `0` is Sunday                    |
//! | Hours        | 0-23           |                                  |
//! | Minutes      | 0-59           |                                  |
//! | Seconds      | 0-59           |                                  |
//! | Milliseconds | 0-999          |                                  |
//!
//! A day field of `32` matches the last calendar day of every month,
//! so `*.*.32 12:00:00` fires at noon on Jan 31, Feb 28 or 29, and so
//! on. Day and weekday constraints must both hold.
//!
//! ## How to use
//!
//! The single public entry point is the [`Schedule`] structure:
//! - [new()](Schedule::new): parses, validates and compiles an expression;
//! - [next_event()](Schedule::next_event) / [prev_event()](Schedule::prev_event):
//!   first scheduled instant strictly after / before a timestamp;
//! - [nearest_event()](Schedule::nearest_event) /
//!   [nearest_prev_event()](Schedule::nearest_prev_event): the timestamp
//!   itself when it is on schedule, the adjacent instant otherwise;
//! - [is_on_schedule()](Schedule::is_on_schedule): membership check.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use millicron::{Result, Schedule};
//!
//! fn next() -> Result<()> {
//!     let schedule = Schedule::new("*.*.32 12:00:00")?;
//!     let start = NaiveDate::from_ymd_opt(2020, 1, 31)
//!         .unwrap()
//!         .and_hms_opt(12, 0, 0)
//!         .unwrap();
//!
//!     // Noon of the last day of the next month.
//!     let next = schedule.next_event(&start)?;
//!     assert_eq!(
//!         next,
//!         NaiveDate::from_ymd_opt(2020, 2, 29).unwrap().and_hms_opt(12, 0, 0).unwrap()
//!     );
//!
//!     Ok(())
//! }
//! # next().unwrap();
//! ```
//!
//! A schedule may also be built programmatically from a
//! [`ScheduleRep`]:
//!
//! ```rust
//! use millicron::{FieldSet, Result, Schedule, ScheduleRep};
//!
//! fn compile() -> Result<()> {
//!     let rep = ScheduleRep {
//!         hours: FieldSet::Range(9, 17),
//!         minutes: FieldSet::Singular(0),
//!         seconds: FieldSet::Singular(0),
//!         milliseconds: FieldSet::Singular(0),
//!         ..Default::default()
//!     };
//!     let schedule = Schedule::from_rep(rep)?;
//!     assert_eq!(schedule.to_string(), "*.*.* * 9-17:0:0.0");
//!
//!     Ok(())
//! }
//! # compile().unwrap();
//! ```
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html)
//!   and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html)
//!   implementations for [`Schedule`], using the compact string form.

mod bits;
mod calendar;
/// Crate specific Error implementation.
pub mod error;
/// Per-field value set algebra.
pub mod field;
mod moment;
mod parser;
/// Structured schedule representation.
pub mod rep;
/// Schedule expression compiler and scheduled events engine.
pub mod schedule;

// Re-export of public entities.
pub use error::Error;
pub use field::{FieldSet, SetKind, StepBase};
pub use rep::ScheduleRep;
pub use schedule::Schedule;

/// Convenient alias for `Result`.
pub type Result<T, E = Error> = std::result::Result<T, E>;
