//! Calendar arithmetic for the supported 2000-2100 year window.

/// First supported year.
pub(crate) const YEAR_BASE: u16 = 2000;
/// Last supported year (inclusive).
pub(crate) const YEAR_MAX: u16 = 2100;
/// Number of supported years.
pub(crate) const YEAR_SPAN: usize = (YEAR_MAX - YEAR_BASE + 1) as usize;

const MONTH_DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

// Weekday of the first day of each month, 0 = Sunday.
// 2000-01-01 was a Saturday.
static FIRST_DOW: [[u8; 12]; YEAR_SPAN] = build_first_dow();

const fn build_first_dow() -> [[u8; 12]; YEAR_SPAN] {
    let mut table = [[0u8; 12]; YEAR_SPAN];
    let mut dow = 6u8;
    let mut y = 0;
    while y < YEAR_SPAN {
        let mut m = 0;
        while m < 12 {
            table[y][m] = dow;
            dow = (dow + month_len(YEAR_BASE + y as u16, m as u8 + 1)) % 7;
            m += 1;
        }
        y += 1;
    }
    table
}

/// Checks whether the year is a leap year.
pub(crate) const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

const fn month_len(year: u16, month: u8) -> u8 {
    if month == 2 && is_leap_year(year) {
        29
    } else {
        MONTH_DAYS[month as usize - 1]
    }
}

/// Returns the number of days in the month.
///
/// # Panics
///
/// Panics if `month` is not in the range 1-12.
pub(crate) fn days_in_month(year: u16, month: u8) -> u8 {
    if !(1..=12).contains(&month) {
        panic!("Invalid month: {month}");
    }
    month_len(year, month)
}

/// Returns the day of week, 0 = Sunday.
///
/// # Panics
///
/// Panics if the date is outside of the supported window or invalid.
pub(crate) fn day_of_week(year: u16, month: u8, day: u8) -> u8 {
    if !(YEAR_BASE..=YEAR_MAX).contains(&year) || !(1..=days_in_month(year, month)).contains(&day) {
        panic!("Invalid date: {year:04}-{month:02}-{day:02}");
    }
    (FIRST_DOW[(year - YEAR_BASE) as usize][month as usize - 1] + day - 1) % 7
}
