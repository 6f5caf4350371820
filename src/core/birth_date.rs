//! Birth date parsing and the minimum-age rule applied at login and on the form.

use chrono::{DateTime, Datelike, Local, NaiveDate};

pub const MINIMUM_AGE: u32 = 16;

/// Something that can be read as a calendar birth date.
///
/// Strings accept `YYYY-MM-DD` (what a date input submits), `DD/MM/YYYY` and
/// RFC 3339 timestamps, of which only the date part is used.
pub trait BirthDateInput {
    fn to_birth_date(&self) -> Option<NaiveDate>;
}

impl BirthDateInput for NaiveDate {
    fn to_birth_date(&self) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl BirthDateInput for str {
    fn to_birth_date(&self) -> Option<NaiveDate> {
        parse_date(self)
    }
}

impl BirthDateInput for String {
    fn to_birth_date(&self) -> Option<NaiveDate> {
        parse_date(self)
    }
}

impl<T: BirthDateInput + ?Sized> BirthDateInput for &T {
    fn to_birth_date(&self) -> Option<NaiveDate> {
        (**self).to_birth_date()
    }
}

/// Reads a calendar date from a form field.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Whole years between `birth` and `today`, counting a year only once its
/// anniversary has been reached. Negative when `birth` is in the future.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Parses `input` and checks it is not after `today` and that the person is at
/// least `minimum_age` years old on `today`.
pub fn meets_minimum_age<D: BirthDateInput + ?Sized>(
    input: &D,
    today: NaiveDate,
    minimum_age: u32,
) -> bool {
    let Some(birth) = input.to_birth_date() else {
        return false;
    };
    if birth > today {
        return false;
    }
    age_on(birth, today) >= minimum_age as i32
}

/// [`validate_birth_date`] evaluated on a fixed day.
pub fn validate_birth_date_on<D: BirthDateInput + ?Sized>(input: &D, today: NaiveDate) -> bool {
    meets_minimum_age(input, today, MINIMUM_AGE)
}

/// True when `input` is a past date and the person is at least 16 today.
pub fn validate_birth_date<D: BirthDateInput + ?Sized>(input: &D) -> bool {
    validate_birth_date_on(input, Local::now().date_naive())
}
