use serde::{Deserialize, Serialize};

use crate::domain::{BookingDraft, DATE_FORMAT};

pub const AVAILABLE_TIMES_PATH: &str = "/api/available-times";
pub const BOOKINGS_PATH: &str = "/api/bookings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimesResponse {
    pub available_slots: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTimesQuery {
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub date: String,
    pub time: String,
    pub guests: u8,
    pub name: String,
    pub contact: String,
}

impl From<&BookingDraft> for BookingRequest {
    fn from(draft: &BookingDraft) -> Self {
        Self {
            date: draft.date.format(DATE_FORMAT).to_string(),
            time: draft.time.clone(),
            guests: draft.guests,
            name: draft.name.clone(),
            contact: draft.contact.clone(),
        }
    }
}
