use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use client_core::{
    AvailabilityService, BookingApiError, BookingService, FixedClock, Notifier,
};
use shared::protocol::BookingRequest;

use super::*;

struct StaticAvailability;

#[async_trait]
impl AvailabilityService for StaticAvailability {
    async fn available_times(&self, _date: NaiveDate) -> Result<Vec<String>, BookingApiError> {
        Ok(vec!["6:00 PM".to_string(), "7:30 PM".to_string()])
    }
}

#[derive(Default)]
struct RecordingBookings {
    received: Mutex<Vec<BookingRequest>>,
}

#[async_trait]
impl BookingService for RecordingBookings {
    async fn create_booking(&self, request: &BookingRequest) -> Result<(), BookingApiError> {
        self.received.lock().expect("received").push(request.clone());
        Ok(())
    }
}

struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify_success(&self, _message: &str, _display_for: Duration) {}
    fn notify_error(&self, _message: &str, _display_for: Duration) {}
}

fn controller(bookings: Arc<RecordingBookings>) -> BookingFormController {
    let now = NaiveDateTime::parse_from_str("2024-06-01 12:00:00", "%Y-%m-%d %H:%M:%S")
        .expect("now");
    BookingFormController::new_with_dependencies(
        Arc::new(StaticAvailability),
        bookings,
        Arc::new(SilentNotifier),
        Arc::new(FixedClock::new(now)),
    )
}

#[tokio::test]
async fn walks_every_field_and_books() {
    let bookings = Arc::new(RecordingBookings::default());
    let controller = controller(bookings.clone());
    let input: &[u8] = b"2024-06-02\n2\n4\nAda Lovelace\n5551234567\n";
    let mut out = Vec::new();

    let booked = FormSession::new(&controller, input)
        .run(&mut out)
        .await
        .expect("form run")
        .expect("booked");

    assert_eq!(booked.time, "7:30 PM");
    assert_eq!(booked.guests, 4);
    let received = bookings.received.lock().expect("received").clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].date, "2024-06-02");

    let transcript = String::from_utf8(out).expect("utf8");
    assert!(transcript.contains("   2) 7:30 PM"), "{transcript}");
    assert!(transcript.ends_with("Table booked.\n"), "{transcript}");
}

#[tokio::test]
async fn asks_again_only_for_flagged_fields() {
    let bookings = Arc::new(RecordingBookings::default());
    let controller = controller(bookings.clone());
    let input: &[u8] = b"2024-06-02\n6:00 PM\n11\nAda Lovelace\n5551234567\n3\n";
    let mut out = Vec::new();

    let booked = FormSession::new(&controller, input)
        .run(&mut out)
        .await
        .expect("form run")
        .expect("booked");

    assert_eq!(booked.guests, 3);
    assert_eq!(booked.time, "6:00 PM");
    let transcript = String::from_utf8(out).expect("utf8");
    assert!(transcript.contains("! Guests must be between 1 and 10"), "{transcript}");
    assert!(transcript.contains("Guests [11]: "), "{transcript}");
    assert_eq!(bookings.received.lock().expect("received").len(), 1);
}

#[tokio::test]
async fn ending_input_early_books_nothing() {
    let bookings = Arc::new(RecordingBookings::default());
    let controller = controller(bookings.clone());
    let input: &[u8] = b"2024-06-02\n1\n";
    let mut out = Vec::new();

    let booked = FormSession::new(&controller, input)
        .run(&mut out)
        .await
        .expect("form run");

    assert!(booked.is_none());
    assert!(bookings.received.lock().expect("received").is_empty());
}
