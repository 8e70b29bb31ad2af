use worktracker::errors::AppError;
use worktracker::models::response::ApiResponse;
use worktracker::utils::date::parse_period;
use worktracker::utils::time::{parse_timestamp, to_db};

#[test]
fn test_error_classes_map_to_status_and_codes() {
    let cases = [
        (AppError::Conflict("x".into()), "conflict", 409, 3),
        (AppError::NotFound("x".into()), "not_found", 404, 4),
        (AppError::Validation("x".into()), "invalid", 400, 2),
        (AppError::InvalidDate("x".into()), "invalid", 400, 2),
        (AppError::PermissionDenied("x".into()), "forbidden", 403, 5),
        (
            AppError::Storage(rusqlite::Error::InvalidQuery),
            "unavailable",
            503,
            6,
        ),
        (AppError::Other("x".into()), "error", 500, 1),
    ];

    for (err, status, http, exit) in cases {
        assert_eq!(err.status(), status, "{err}");
        assert_eq!(err.http_status(), http, "{err}");
        assert_eq!(err.exit_code(), exit, "{err}");
    }
}

#[test]
fn test_api_response_from_error() {
    let resp = ApiResponse::from_error(&AppError::Conflict("shift already open".into()));
    assert_eq!(resp.status, "conflict");
    assert!(!resp.is_success());
    assert!(resp.message.unwrap().contains("shift already open"));

    let ok = ApiResponse::new("started").with_minutes(5);
    assert!(ok.is_success());
    let json = serde_json::to_string(&ok).unwrap();
    assert_eq!(json, r#"{"status":"started","minutes":5}"#);
}

#[test]
fn test_parse_period_forms() {
    let r = parse_period("2025-02").unwrap();
    assert_eq!(r.from.to_string(), "2025-02-01");
    assert_eq!(r.to.to_string(), "2025-02-28");
    assert_eq!(r.lower_bound(), "2025-02-01T00:00:00Z");
    assert_eq!(r.upper_bound_exclusive(), "2025-03-01T00:00:00Z");

    let r = parse_period("2024:2025").unwrap();
    assert_eq!(r.from.to_string(), "2024-01-01");
    assert_eq!(r.to.to_string(), "2025-12-31");

    assert!(parse_period("2025-06-10:2025-06-01").is_err());
    assert!(parse_period("2025:2025-06").is_err());
    assert!(parse_period("June").is_err());
}

#[test]
fn test_parse_timestamp_inputs() {
    let a = parse_timestamp("2025-06-02 08:00").unwrap();
    let b = parse_timestamp("2025-06-02T08:00:00Z").unwrap();
    let c = parse_timestamp("2025-06-02T10:00:00+02:00").unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert_eq!(to_db(&a), "2025-06-02T08:00:00Z");

    assert!(matches!(
        parse_timestamp("yesterday"),
        Err(AppError::InvalidTime(_))
    ));
}

#[test]
fn test_timestamps_outside_storable_years_are_invalid() {
    for input in ["+10000-01-01 00:30", "+10000-01-01T00:30:00"] {
        assert!(
            matches!(parse_timestamp(input), Err(AppError::InvalidTime(_))),
            "{input}"
        );
    }
    assert!(parse_timestamp("-0001-06-01 08:00").is_err());

    let last = parse_timestamp("9999-12-31 23:59:59").unwrap();
    assert_eq!(to_db(&last), "9999-12-31T23:59:59Z");
}

#[test]
fn test_last_storable_day_keeps_bounds_ordered() {
    let r = parse_period("9999-12-31").unwrap();
    assert_eq!(r.lower_bound(), "9999-12-31T00:00:00Z");
    assert!(r.upper_bound_exclusive() > r.lower_bound());
    assert!(r.upper_bound_exclusive().as_str() > "9999-12-31T23:59:59Z");

    let far = chrono::NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
    let near = chrono::NaiveDate::from_ymd_opt(9999, 1, 1).unwrap();
    assert!(matches!(
        worktracker::models::date_range::DateRange::new(near, far),
        Err(AppError::InvalidDate(_))
    ));
}
