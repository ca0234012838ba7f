use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 10;
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const CONTACT_DIGITS: usize = 10;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Date,
    Time,
    Guests,
    Name,
    Contact,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Date,
        FormField::Time,
        FormField::Guests,
        FormField::Name,
        FormField::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Date => "Date",
            FormField::Time => "Time",
            FormField::Guests => "Guests",
            FormField::Name => "Name",
            FormField::Contact => "Phone Number",
        }
    }
}

/// Raw input values as the presentation layer captured them at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub date: String,
    pub time: String,
    pub guests: String,
    pub name: String,
    pub contact: String,
}

impl FormSnapshot {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Date => &self.date,
            FormField::Time => &self.time,
            FormField::Guests => &self.guests,
            FormField::Name => &self.name,
            FormField::Contact => &self.contact,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Date => self.date = value,
            FormField::Time => self.time = value,
            FormField::Guests => self.guests = value,
            FormField::Name => self.name = value,
            FormField::Contact => self.contact = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub date: NaiveDate,
    pub time: String,
    pub guests: u8,
    pub name: String,
    pub contact: String,
}

impl BookingDraft {
    pub fn confirmation_message(&self) -> String {
        format!(
            "Booking confirmed for {} guests on {} at {}.",
            self.guests,
            self.date.format(DATE_FORMAT),
            self.time
        )
    }
}
