use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use shared::{
    domain::DATE_FORMAT,
    error::ApiErrorBody,
    protocol::{
        AvailableTimesQuery, AvailableTimesResponse, BookingRequest, AVAILABLE_TIMES_PATH,
        BOOKINGS_PATH,
    },
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ClientSettings;

#[derive(Debug, Error)]
pub enum BookingApiError {
    #[error("request to booking backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("booking backend rejected the request with status {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
}

impl BookingApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BookingApiError::Rejected { message, .. } => message.as_deref(),
            BookingApiError::Transport(_) => None,
        }
    }
}

#[async_trait]
pub trait AvailabilityService: Send + Sync {
    async fn available_times(&self, date: NaiveDate) -> Result<Vec<String>, BookingApiError>;
}

#[async_trait]
pub trait BookingService: Send + Sync {
    async fn create_booking(&self, request: &BookingRequest) -> Result<(), BookingApiError>;
}

#[derive(Clone)]
pub struct HttpBookingApi {
    http: Client,
    api_base: String,
}

impl HttpBookingApi {
    pub fn new(settings: &ClientSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: &ClientSettings) -> Self {
        Self {
            http,
            api_base: settings.api_base.clone(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

#[async_trait]
impl AvailabilityService for HttpBookingApi {
    async fn available_times(&self, date: NaiveDate) -> Result<Vec<String>, BookingApiError> {
        let date = date.format(DATE_FORMAT).to_string();
        debug!(%date, "availability: requesting slots");
        let response = self
            .http
            .get(format!("{}{AVAILABLE_TIMES_PATH}", self.api_base))
            .query(&AvailableTimesQuery { date: date.clone() })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            warn!(%date, %status, "availability: lookup rejected");
            return Err(BookingApiError::Rejected {
                status,
                message: ApiErrorBody::from_body(&body).message().map(str::to_string),
            });
        }

        let body: AvailableTimesResponse = response.json().await?;
        debug!(
            %date,
            slots = body.available_slots.len(),
            "availability: slots received"
        );
        Ok(body.available_slots)
    }
}

#[async_trait]
impl BookingService for HttpBookingApi {
    async fn create_booking(&self, request: &BookingRequest) -> Result<(), BookingApiError> {
        let response = self
            .http
            .post(format!("{}{BOOKINGS_PATH}", self.api_base))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!(
                date = %request.date,
                time = %request.time,
                guests = request.guests,
                "booking: accepted"
            );
            return Ok(());
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = ApiErrorBody::from_body(&body).message().map(str::to_string);
        warn!(
            %status,
            reason = message.as_deref().unwrap_or("<none>"),
            "booking: rejected"
        );
        Err(BookingApiError::Rejected { status, message })
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
