use std::sync::Arc;

use chrono::NaiveDate;
use shared::{
    domain::{BookingDraft, FormSnapshot},
    protocol::BookingRequest,
    slots::{filter_slots_after, format_min_time},
    validation::{parse_date, ValidationErrors},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    api::{AvailabilityService, BookingService, HttpBookingApi},
    config::ClientSettings,
    Clock, Notifier, SystemClock, DEFAULT_ERROR_TOAST_DURATION, SUCCESS_TOAST_DURATION,
    VALIDATION_TOAST_DURATION,
};

pub const FETCH_TIMES_FAILED: &str = "Failed to fetch available times.";
pub const VALIDATION_FAILED: &str = "Please correct the highlighted fields.";
pub const BOOKING_FAILED_FALLBACK: &str = "Failed to book the table. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Idle,
    TimesLoading,
    TimesReady,
    TimesError,
    Submitting,
    Submitted,
    SubmitError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub selected_date: Option<NaiveDate>,
    pub min_time: String,
    pub available_times: Vec<String>,
    pub form: FormSnapshot,
    pub phase: FormPhase,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Booked(BookingDraft),
    /// Nothing was sent; the listed fields need correcting.
    Invalid(ValidationErrors),
    Failed {
        message: String,
    },
}

struct ControllerState {
    view: FormState,
    /// Generation of the newest availability request; older responses are dropped.
    latest_fetch: u64,
}

pub struct BookingFormController {
    availability: Arc<dyn AvailabilityService>,
    bookings: Arc<dyn BookingService>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    inner: Mutex<ControllerState>,
}

impl BookingFormController {
    pub fn new(settings: &ClientSettings, notifier: Arc<dyn Notifier>) -> Self {
        let api = Arc::new(HttpBookingApi::new(settings));
        Self::new_with_dependencies(api.clone(), api, notifier, Arc::new(SystemClock))
    }

    pub fn new_with_dependencies(
        availability: Arc<dyn AvailabilityService>,
        bookings: Arc<dyn BookingService>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            availability,
            bookings,
            notifier,
            clock,
            inner: Mutex::new(ControllerState {
                view: FormState::default(),
                latest_fetch: 0,
            }),
        }
    }

    pub async fn state(&self) -> FormState {
        self.inner.lock().await.view.clone()
    }

    /// Returns the date to load slots for when the selection changed to a
    /// non-empty value.
    pub async fn handle_date_change(&self, new_date: &str) -> Option<NaiveDate> {
        let selected = parse_date(new_date);
        let now = self.clock.now();

        let mut guard = self.inner.lock().await;
        let changed = guard.view.selected_date != selected;
        guard.view.selected_date = selected;
        guard.view.form.date = new_date.to_string();
        guard.view.min_time = match selected {
            Some(date) if date == now.date() => format_min_time(now.time()),
            _ => String::new(),
        };

        if !changed {
            return None;
        }
        guard.latest_fetch += 1;
        guard.view.available_times.clear();
        if selected.is_none() {
            guard.view.phase = FormPhase::Idle;
        }
        debug!(date = new_date, min_time = %guard.view.min_time, "form: date changed");
        selected
    }

    pub async fn select_date(&self, new_date: &str) -> Option<NaiveDate> {
        let date = self.handle_date_change(new_date).await?;
        self.fetch_available_times(date).await;
        Some(date)
    }

    /// For today only slots strictly after the current minute are kept.
    pub async fn fetch_available_times(&self, date: NaiveDate) {
        let token = {
            let mut guard = self.inner.lock().await;
            guard.latest_fetch += 1;
            guard.view.phase = FormPhase::TimesLoading;
            guard.latest_fetch
        };

        let result = self.availability.available_times(date).await;
        let now = self.clock.now();

        let mut guard = self.inner.lock().await;
        if guard.latest_fetch != token {
            debug!(
                %date,
                token,
                latest = guard.latest_fetch,
                "availability: discarding stale response"
            );
            return;
        }

        match result {
            Ok(slots) => {
                let offered = slots.len();
                let slots = if date == now.date() {
                    filter_slots_after(slots, now.time())
                } else {
                    slots
                };
                info!(
                    %date,
                    offered,
                    selectable = slots.len(),
                    "availability: times updated"
                );
                guard.view.available_times = slots;
                guard.view.phase = FormPhase::TimesReady;
            }
            Err(err) => {
                guard.view.phase = FormPhase::TimesError;
                drop(guard);
                error!(%date, "failed to fetch available times: {err}");
                self.notifier
                    .notify_error(FETCH_TIMES_FAILED, DEFAULT_ERROR_TOAST_DURATION);
            }
        }
    }

    pub async fn handle_submit(&self, snapshot: FormSnapshot) -> SubmitOutcome {
        let today = self.clock.now().date();

        let validated = {
            let mut guard = self.inner.lock().await;
            guard.view.form = snapshot.clone();
            let view = &guard.view;
            let offered: &[String] = match (parse_date(&snapshot.date), view.selected_date) {
                (Some(requested), Some(selected)) if requested == selected => {
                    &view.available_times
                }
                _ => &[],
            };
            let validated = BookingDraft::from_snapshot(&snapshot, today, offered);
            if validated.is_ok() {
                guard.view.phase = FormPhase::Submitting;
            }
            validated
        };

        let draft = match validated {
            Ok(draft) => draft,
            Err(errors) => {
                warn!(fields = ?errors.fields(), "booking: validation failed");
                self.notifier
                    .notify_error(VALIDATION_FAILED, VALIDATION_TOAST_DURATION);
                return SubmitOutcome::Invalid(errors);
            }
        };

        match self
            .bookings
            .create_booking(&BookingRequest::from(&draft))
            .await
        {
            Ok(()) => {
                let still_selected = {
                    let mut guard = self.inner.lock().await;
                    guard.view.form = FormSnapshot::default();
                    let still_selected = guard.view.selected_date == Some(draft.date);
                    // A newer selection owns the time floor, the slots and the phase.
                    if still_selected {
                        guard.view.min_time.clear();
                        guard.view.phase = FormPhase::Submitted;
                    }
                    still_selected
                };
                self.notifier
                    .notify_success(&draft.confirmation_message(), SUCCESS_TOAST_DURATION);
                if still_selected {
                    self.fetch_available_times(draft.date).await;
                } else {
                    debug!(date = %draft.date, "booking: selection moved on, skipping refresh");
                }
                SubmitOutcome::Booked(draft)
            }
            Err(err) => {
                let message = err
                    .server_message()
                    .unwrap_or(BOOKING_FAILED_FALLBACK)
                    .to_string();
                self.inner.lock().await.view.phase = FormPhase::SubmitError;
                error!(date = %draft.date, time = %draft.time, "booking failed: {err}");
                self.notifier
                    .notify_error(&message, DEFAULT_ERROR_TOAST_DURATION);
                SubmitOutcome::Failed { message }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
