use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    BookingDraft, FormField, FormSnapshot, CONTACT_DIGITS, DATE_FORMAT, MAX_GUESTS, MIN_GUESTS,
    NAME_MAX_CHARS, NAME_MIN_CHARS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    Malformed,
    InPast,
    NotOffered,
    OutOfRange,
    TooShort,
    TooLong,
    InvalidCharacters,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FieldProblem::Missing => "is required",
            FieldProblem::Malformed => "is not in the expected format",
            FieldProblem::InPast => "must not be in the past",
            FieldProblem::NotOffered => "is not one of the offered times",
            FieldProblem::OutOfRange => "must be between 1 and 10",
            FieldProblem::TooShort => "is too short",
            FieldProblem::TooLong => "is too long",
            FieldProblem::InvalidCharacters => "contains characters that are not allowed",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.label(), self.problem)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} invalid field(s): {}", .errors.len(), join_errors(.errors))]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn fields(&self) -> Vec<FormField> {
        self.errors.iter().map(|error| error.field).collect()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl BookingDraft {
    pub fn from_snapshot(
        snapshot: &FormSnapshot,
        today: NaiveDate,
        offered_times: &[String],
    ) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();
        let date = check(&mut errors, FormField::Date, validate_date(&snapshot.date, today));
        let time = check(
            &mut errors,
            FormField::Time,
            validate_time(&snapshot.time, offered_times),
        );
        let guests = check(&mut errors, FormField::Guests, validate_guests(&snapshot.guests));
        let name = check(&mut errors, FormField::Name, validate_name(&snapshot.name));
        let contact = check(
            &mut errors,
            FormField::Contact,
            validate_contact(&snapshot.contact),
        );

        match (date, time, guests, name, contact) {
            (Some(date), Some(time), Some(guests), Some(name), Some(contact)) => Ok(Self {
                date,
                time,
                guests,
                name,
                contact,
            }),
            _ => Err(ValidationErrors { errors }),
        }
    }
}

fn check<T>(
    errors: &mut Vec<FieldError>,
    field: FormField,
    result: Result<T, FieldProblem>,
) -> Option<T> {
    result
        .map_err(|problem| errors.push(FieldError { field, problem }))
        .ok()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn validate_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, FieldProblem> {
    if raw.trim().is_empty() {
        return Err(FieldProblem::Missing);
    }
    let date = parse_date(raw).ok_or(FieldProblem::Malformed)?;
    if date < today {
        return Err(FieldProblem::InPast);
    }
    Ok(date)
}

fn validate_time(raw: &str, offered_times: &[String]) -> Result<String, FieldProblem> {
    if raw.is_empty() {
        return Err(FieldProblem::Missing);
    }
    if !offered_times.iter().any(|offered| offered == raw) {
        return Err(FieldProblem::NotOffered);
    }
    Ok(raw.to_string())
}

fn validate_guests(raw: &str) -> Result<u8, FieldProblem> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldProblem::Missing);
    }
    let guests = parse_whole_number(raw)?;
    if !(i64::from(MIN_GUESTS)..=i64::from(MAX_GUESTS)).contains(&guests) {
        return Err(FieldProblem::OutOfRange);
    }
    u8::try_from(guests).map_err(|_| FieldProblem::OutOfRange)
}

// Decimal notation as a number input takes it: optional `-`, digits, optional
// `.digits`. No leading `+`. A fractional part must be all zeros.
fn parse_whole_number(raw: &str) -> Result<i64, FieldProblem> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.map_or(true, all_digits) {
        return Err(FieldProblem::Malformed);
    }
    if fraction.is_some_and(|fraction| fraction.bytes().any(|b| b != b'0')) {
        return Err(FieldProblem::Malformed);
    }
    let magnitude: i64 = whole.parse().map_err(|_| FieldProblem::OutOfRange)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn validate_name(raw: &str) -> Result<String, FieldProblem> {
    if raw.is_empty() {
        return Err(FieldProblem::Missing);
    }
    let chars = raw.chars().count();
    if chars < NAME_MIN_CHARS {
        return Err(FieldProblem::TooShort);
    }
    if chars > NAME_MAX_CHARS {
        return Err(FieldProblem::TooLong);
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return Err(FieldProblem::InvalidCharacters);
    }
    Ok(raw.to_string())
}

fn validate_contact(raw: &str) -> Result<String, FieldProblem> {
    if raw.is_empty() {
        return Err(FieldProblem::Missing);
    }
    if raw.len() != CONTACT_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldProblem::Malformed);
    }
    Ok(raw.to_string())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
