use super::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("date")
}

fn offered() -> Vec<String> {
    vec!["6:00 PM".to_string(), "7:00 PM".to_string()]
}

fn valid_snapshot() -> FormSnapshot {
    FormSnapshot {
        date: "2024-06-01".to_string(),
        time: "7:00 PM".to_string(),
        guests: "4".to_string(),
        name: "Ada Lovelace".to_string(),
        contact: "5551234567".to_string(),
    }
}

fn problem_for(snapshot: &FormSnapshot, field: FormField) -> Option<FieldProblem> {
    BookingDraft::from_snapshot(snapshot, today(), &offered())
        .expect_err("must be invalid")
        .errors
        .into_iter()
        .find(|error| error.field == field)
        .map(|error| error.problem)
}

#[test]
fn accepts_a_complete_snapshot() {
    let draft = BookingDraft::from_snapshot(&valid_snapshot(), today(), &offered())
        .expect("valid snapshot");
    assert_eq!(draft.date, today());
    assert_eq!(draft.time, "7:00 PM");
    assert_eq!(draft.guests, 4);
    assert_eq!(draft.name, "Ada Lovelace");
    assert_eq!(draft.contact, "5551234567");
}

#[test]
fn empty_form_reports_every_field_in_order() {
    let err = BookingDraft::from_snapshot(&FormSnapshot::default(), today(), &offered())
        .expect_err("empty form");
    assert_eq!(err.fields(), FormField::ALL.to_vec());
    assert!(err
        .errors
        .iter()
        .all(|error| error.problem == FieldProblem::Missing));
}

#[test]
fn guest_count_outside_one_to_ten_is_rejected() {
    for raw in ["0", "11", "-3"] {
        let mut snapshot = valid_snapshot();
        snapshot.guests = raw.to_string();
        assert_eq!(
            problem_for(&snapshot, FormField::Guests),
            Some(FieldProblem::OutOfRange),
            "guests={raw}"
        );
    }

    let mut snapshot = valid_snapshot();
    snapshot.guests = "2.5".to_string();
    assert_eq!(
        problem_for(&snapshot, FormField::Guests),
        Some(FieldProblem::Malformed)
    );
}

#[test]
fn past_and_malformed_dates_are_rejected() {
    let mut snapshot = valid_snapshot();
    snapshot.date = "2024-05-31".to_string();
    assert_eq!(
        problem_for(&snapshot, FormField::Date),
        Some(FieldProblem::InPast)
    );

    snapshot.date = "06/01/2024".to_string();
    assert_eq!(
        problem_for(&snapshot, FormField::Date),
        Some(FieldProblem::Malformed)
    );
}

#[test]
fn time_must_be_one_of_the_offered_slots() {
    let mut snapshot = valid_snapshot();
    snapshot.time = "8:00 PM".to_string();
    assert_eq!(
        problem_for(&snapshot, FormField::Time),
        Some(FieldProblem::NotOffered)
    );
}

#[test]
fn name_rules_cover_length_and_characters() {
    let long_name = "x".repeat(51);
    let cases = [
        ("A", FieldProblem::TooShort),
        (long_name.as_str(), FieldProblem::TooLong),
        ("R2D2", FieldProblem::InvalidCharacters),
        ("José", FieldProblem::InvalidCharacters),
    ];
    for (raw, expected) in cases {
        let mut snapshot = valid_snapshot();
        snapshot.name = raw.to_string();
        assert_eq!(
            problem_for(&snapshot, FormField::Name),
            Some(expected),
            "name={raw}"
        );
    }

    let mut snapshot = valid_snapshot();
    snapshot.name = "x".repeat(50);
    assert!(BookingDraft::from_snapshot(&snapshot, today(), &offered()).is_ok());
}

#[test]
fn contact_needs_exactly_ten_digits() {
    for raw in ["555123456", "55512345678", "555-123-45", "555123456a"] {
        let mut snapshot = valid_snapshot();
        snapshot.contact = raw.to_string();
        assert_eq!(
            problem_for(&snapshot, FormField::Contact),
            Some(FieldProblem::Malformed),
            "contact={raw}"
        );
    }
}

#[test]
fn error_display_lists_fields() {
    let mut snapshot = valid_snapshot();
    snapshot.guests = "11".to_string();
    snapshot.contact = String::new();
    let err = BookingDraft::from_snapshot(&snapshot, today(), &offered()).expect_err("invalid");
    assert_eq!(
        err.to_string(),
        "2 invalid field(s): Guests must be between 1 and 10, Phone Number is required"
    );
    assert!(err.contains(FormField::Guests));
    assert!(!err.contains(FormField::Name));
}

#[test]
fn guest_count_follows_number_input_notation() {
    for (raw, expected) in [("4.0", 4), ("7.00", 7), (" 10 ", 10)] {
        let mut snapshot = valid_snapshot();
        snapshot.guests = raw.to_string();
        let draft = BookingDraft::from_snapshot(&snapshot, today(), &offered())
            .unwrap_or_else(|err| panic!("guests={raw}: {err}"));
        assert_eq!(draft.guests, expected, "guests={raw}");
    }

    for raw in ["+5", "5.", ".5", "4.5", "1e1", "four", "--2"] {
        let mut snapshot = valid_snapshot();
        snapshot.guests = raw.to_string();
        assert_eq!(
            problem_for(&snapshot, FormField::Guests),
            Some(FieldProblem::Malformed),
            "guests={raw}"
        );
    }

    let mut snapshot = valid_snapshot();
    snapshot.guests = "99999999999999999999".to_string();
    assert_eq!(
        problem_for(&snapshot, FormField::Guests),
        Some(FieldProblem::OutOfRange)
    );
}
