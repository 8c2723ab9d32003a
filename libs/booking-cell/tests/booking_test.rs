use std::collections::HashSet;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use regex::Regex;
use tokio::sync::mpsc;

use booking_cell::{
    AppointmentRequest, BookingError, BookingService, FixedClock, InMemoryAppointmentStore,
};
use location_cell::models::{City, Doctor, Hospital, Region};
use location_cell::LocationDirectory;
use shared_models::auth::User;
use shared_models::events::{DomainEvent, EventKind};

fn test_directory() -> LocationDirectory {
    let regions = vec![Region { id: 1, name: "Maharashtra".to_string() }];
    let cities = vec![City { id: 1, name: "Mumbai".to_string(), region_id: 1 }];
    let hospitals = vec![
        Hospital {
            id: 1,
            name: "City Care Hospital".to_string(),
            region: "Maharashtra".to_string(),
            city: "Mumbai".to_string(),
            hospital_type: "Private".to_string(),
            rating: Some(4.4),
            emergency_24x7: true,
            insurance_supported: true,
            website_url: None,
            image_url: None,
        },
        Hospital {
            id: 2,
            name: "Harbor General".to_string(),
            region: "Maharashtra".to_string(),
            city: "Mumbai".to_string(),
            hospital_type: "Government".to_string(),
            rating: Some(4.1),
            emergency_24x7: true,
            insurance_supported: false,
            website_url: None,
            image_url: None,
        },
    ];
    let doctors = vec![
        Doctor {
            id: 1,
            name: "Dr. Rao".to_string(),
            degree: "MD".to_string(),
            specialization: "Cardiology".to_string(),
            experience_years: 12,
            hospital_id: 1,
            rating: Some(4.6),
            past_experience: None,
            image_url: None,
        },
        Doctor {
            id: 5,
            name: "Dr. Iyer".to_string(),
            degree: "MD".to_string(),
            specialization: "General Medicine".to_string(),
            experience_years: 9,
            hospital_id: 2,
            rating: Some(4.3),
            past_experience: None,
            image_url: None,
        },
    ];
    LocationDirectory::new(regions, cities, hospitals, doctors)
}

fn service() -> (BookingService, mpsc::Receiver<DomainEvent>) {
    let (tx, rx) = mpsc::channel(256);
    let clock = FixedClock(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap());
    let service = BookingService::new(
        Arc::new(test_directory()),
        Arc::new(InMemoryAppointmentStore::new()),
        Arc::new(clock),
        tx,
    );
    (service, rx)
}

fn patient_user() -> User {
    User {
        id: "patient-1".to_string(),
        name: Some("Asha".to_string()),
        role: Some("patient".to_string()),
    }
}

fn admin_user() -> User {
    User {
        id: "admin-1".to_string(),
        name: Some("Admin".to_string()),
        role: Some("admin".to_string()),
    }
}

fn valid_request() -> AppointmentRequest {
    AppointmentRequest {
        doctor_id: Some(5),
        hospital_id: Some(2),
        appointment_date: Some("2025-06-16".to_string()), // tomorrow for the fixed clock
        appointment_time: Some("10:30".to_string()),
        patient_name: Some("Asha".to_string()),
        mobile_number: Some("9999999999".to_string()),
        ..AppointmentRequest::default()
    }
}

#[tokio::test]
async fn commit_returns_a_tracking_id_and_tracks_as_booked() {
    let (service, mut events) = service();

    let confirmation = service.book(valid_request(), &patient_user()).await.expect("booking succeeds");

    let pattern = Regex::new(r"^HCMS-\d{4}-\d{4}$").unwrap();
    assert!(
        pattern.is_match(&confirmation.tracking_id),
        "Tracking id {} should match HCMS-<year>-<4 digits>",
        confirmation.tracking_id
    );
    assert_eq!(confirmation.tracking_id, "HCMS-2025-0001");

    let snapshot = service.track(&confirmation.tracking_id).await.expect("tracking lookup");
    assert_eq!(snapshot.status, "BOOKED");
    assert_eq!(snapshot.doctor_id, 5);
    assert_eq!(snapshot.hospital_id, 2);
    assert_eq!(snapshot.patient_name, "Asha");

    let event = events.recv().await.expect("a BookingCreated event is emitted");
    assert_eq!(event.kind, EventKind::BookingCreated);
    assert_eq!(event.appointment.tracking_id, confirmation.tracking_id);
}

#[tokio::test]
async fn validation_failure_names_every_field_and_consumes_no_tracking_id() {
    let (service, _events) = service();

    let empty = AppointmentRequest::default();
    let err = service.book(empty, &patient_user()).await.unwrap_err();

    match err {
        BookingError::Validation { fields } => {
            for expected in [
                "doctorId",
                "hospitalId",
                "appointmentDate",
                "appointmentTime",
                "patientName",
                "mobileNumber",
            ] {
                assert!(
                    fields.iter().any(|f| f.starts_with(expected)),
                    "Missing field {} should be reported, got {:?}",
                    expected,
                    fields
                );
            }
        }
        other => panic!("Expected validation error, got {:?}", other),
    }

    // The failed attempt must not have consumed a sequence number.
    let confirmation = service.book(valid_request(), &patient_user()).await.expect("booking succeeds");
    assert_eq!(
        confirmation.tracking_id, "HCMS-2025-0001",
        "First successful commit takes the first sequence of the year"
    );
}

#[tokio::test]
async fn past_or_same_day_dates_are_rejected_regardless_of_time() {
    let (service, _events) = service();

    for date in ["2025-06-15", "2025-06-14", "2024-12-31"] {
        let mut request = valid_request();
        request.appointment_date = Some(date.to_string());
        let err = service.book(request, &patient_user()).await.unwrap_err();
        assert!(
            matches!(err, BookingError::Validation { .. }),
            "Date {} must be rejected",
            date
        );
    }
}

#[tokio::test]
async fn alternative_date_formats_are_accepted() {
    let (service, _events) = service();

    for date in ["16-06-2025", "2025/06/16", "16/06/2025"] {
        let mut request = valid_request();
        request.appointment_date = Some(date.to_string());
        service
            .book(request, &patient_user())
            .await
            .unwrap_or_else(|e| panic!("Date format {} should be accepted: {:?}", date, e));
    }
}

#[tokio::test]
async fn stale_association_is_rejected_at_commit_time() {
    let (service, _events) = service();

    // Doctor 5 works at hospital 2; a stale selection pairing it with
    // hospital 1 must not commit.
    let mut request = valid_request();
    request.hospital_id = Some(1);
    let err = service.book(request, &patient_user()).await.unwrap_err();
    assert!(matches!(err, BookingError::Validation { .. }));
}

#[tokio::test]
async fn unknown_doctor_or_hospital_fails_not_found() {
    let (service, _events) = service();

    let mut request = valid_request();
    request.doctor_id = Some(42);
    let err = service.book(request, &patient_user()).await.unwrap_err();
    assert!(matches!(err, BookingError::DoctorNotFound(42)));

    let mut request = valid_request();
    request.hospital_id = Some(42);
    let err = service.book(request, &patient_user()).await.unwrap_err();
    assert!(matches!(err, BookingError::HospitalNotFound(42)));
}

#[tokio::test]
async fn concurrent_commits_receive_pairwise_distinct_tracking_ids() {
    let (service, _events) = service();
    let service = Arc::new(service);

    let mut handles = Vec::new();
    for i in 0..100 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let user = User {
                id: format!("patient-{}", i),
                name: Some(format!("Patient {}", i)),
                role: Some("patient".to_string()),
            };
            service.book(valid_request(), &user).await
        }));
    }

    let mut tracking_ids = HashSet::new();
    for handle in handles {
        let confirmation = handle
            .await
            .expect("task completes")
            .expect("every concurrent commit succeeds");
        assert!(
            tracking_ids.insert(confirmation.tracking_id.clone()),
            "Tracking id {} was allocated twice",
            confirmation.tracking_id
        );
    }
    assert_eq!(tracking_ids.len(), 100, "All 100 commits must get distinct ids");
}

#[tokio::test]
async fn cancel_transitions_to_cancelled_and_second_cancel_conflicts() {
    let (service, _events) = service();
    let user = patient_user();

    let confirmation = service.book(valid_request(), &user).await.expect("booking succeeds");
    let booked = service.track(&confirmation.tracking_id).await.expect("tracking lookup");

    let cancelled = service.cancel(booked.id, &user).await.expect("owner may cancel");
    assert_eq!(cancelled.status, "CANCELLED");

    let err = service.cancel(booked.id, &user).await.unwrap_err();
    assert!(
        matches!(err, BookingError::InvalidStatusTransition(_)),
        "A second cancel must conflict, got {:?}",
        err
    );
}

#[tokio::test]
async fn cancel_requires_ownership_or_an_elevated_role() {
    let (service, _events) = service();
    let owner = patient_user();

    let confirmation = service.book(valid_request(), &owner).await.expect("booking succeeds");
    let booked = service.track(&confirmation.tracking_id).await.expect("tracking lookup");

    let stranger = User {
        id: "patient-2".to_string(),
        name: None,
        role: Some("patient".to_string()),
    };
    let err = service.cancel(booked.id, &stranger).await.unwrap_err();
    assert!(matches!(err, BookingError::Unauthorized));

    let cancelled = service.cancel(booked.id, &admin_user()).await.expect("staff may cancel");
    assert_eq!(cancelled.status, "CANCELLED");
}

#[tokio::test]
async fn complete_is_elevated_only_and_terminal() {
    let (service, _events) = service();
    let owner = patient_user();

    let confirmation = service.book(valid_request(), &owner).await.expect("booking succeeds");
    let booked = service.track(&confirmation.tracking_id).await.expect("tracking lookup");

    let err = service.complete(booked.id, &owner).await.unwrap_err();
    assert!(matches!(err, BookingError::Unauthorized), "Patients cannot complete appointments");

    let completed = service.complete(booked.id, &admin_user()).await.expect("staff completes");
    assert_eq!(completed.status, "COMPLETED");

    // Terminal: neither cancel nor another complete may follow.
    let err = service.cancel(booked.id, &admin_user()).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidStatusTransition(_)));
    let err = service.complete(booked.id, &admin_user()).await.unwrap_err();
    assert!(matches!(err, BookingError::InvalidStatusTransition(_)));
}

#[tokio::test]
async fn tracking_an_unknown_id_fails_not_found() {
    let (service, _events) = service();
    let err = service.track("HCMS-2025-9999").await.unwrap_err();
    assert!(matches!(err, BookingError::TrackingIdNotFound(_)));
}

#[tokio::test]
async fn owner_listing_is_newest_first_and_scoped_to_the_owner() {
    let (service, _events) = service();
    let user = patient_user();

    let first = service.book(valid_request(), &user).await.expect("first booking");
    let second = service.book(valid_request(), &user).await.expect("second booking");

    let other = User {
        id: "patient-2".to_string(),
        name: None,
        role: Some("patient".to_string()),
    };
    service.book(valid_request(), &other).await.expect("other user's booking");

    let mine = service.list_for_owner(&user).await.expect("listing succeeds");
    assert_eq!(mine.len(), 2, "Only the caller's appointments are listed");
    assert_eq!(mine[0].tracking_id, second.tracking_id, "Newest first");
    assert_eq!(mine[1].tracking_id, first.tracking_id);
}

#[tokio::test]
async fn lifecycle_events_follow_the_status_changes() {
    let (service, mut events) = service();
    let user = patient_user();

    let confirmation = service.book(valid_request(), &user).await.expect("booking succeeds");
    let booked = service.track(&confirmation.tracking_id).await.expect("tracking lookup");
    service.cancel(booked.id, &user).await.expect("cancel succeeds");

    let created = events.recv().await.expect("created event");
    assert_eq!(created.kind, EventKind::BookingCreated);
    assert_eq!(created.owner_subject, user.id);

    let cancelled = events.recv().await.expect("cancelled event");
    assert_eq!(cancelled.kind, EventKind::BookingCancelled);
    assert_eq!(cancelled.appointment.status, "CANCELLED");
}
