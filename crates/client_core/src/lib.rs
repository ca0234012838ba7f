use std::{sync::RwLock, time::Duration};

use chrono::{Local, NaiveDateTime};

pub mod api;
pub mod config;
pub mod controller;

pub use api::{AvailabilityService, BookingApiError, BookingService, HttpBookingApi};
pub use config::{load_settings, ClientSettings};
pub use controller::{BookingFormController, FormPhase, FormState, SubmitOutcome};

pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_secs(5);
pub const VALIDATION_TOAST_DURATION: Duration = Duration::from_secs(5);
pub const DEFAULT_ERROR_TOAST_DURATION: Duration = Duration::from_secs(4);

pub trait Notifier: Send + Sync {
    fn notify_success(&self, message: &str, display_for: Duration);
    fn notify_error(&self, message: &str, display_for: Duration);
}

pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
pub struct FixedClock {
    now: RwLock<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        match self.now.write() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}
