use chrono::NaiveDate;
use domain::{Aircraft, AircraftStatus, ServiceHistoryEntry};
use fleet_intervals::{
    GENERAL_CATEGORY, IntervalEvaluator, IntervalTable, IntervalTableError, ScheduledItem,
    ServiceStatus,
};

fn aircraft(manufacturer: &str, aircraft_type: &str, hours: f64) -> Aircraft {
    Aircraft {
        id: "ac-1".to_string(),
        model: "Test Airframe".to_string(),
        serial: "SN-1".to_string(),
        manufacturer: manufacturer.to_string(),
        aircraft_type: aircraft_type.to_string(),
        status: AircraftStatus::InService,
        flight_hours: hours,
        location: "Base".to_string(),
        history: Vec::new(),
    }
}

fn history(title: &str, code: Option<&str>) -> ServiceHistoryEntry {
    ServiceHistoryEntry {
        title: title.to_string(),
        date: NaiveDate::from_ymd_opt(2025, 4, 2).expect("date"),
        notes: String::new(),
        files: Vec::new(),
        completed_interval: code.map(str::to_string),
    }
}

/// DJI: 100/200/300（乱序给出），GENERAL: 50。
fn fixture() -> IntervalTable {
    IntervalTable::new([
        (
            "dji",
            vec![
                ScheduledItem::hourly("300H", "300 Hour Inspection", 300.0),
                ScheduledItem::hourly("100H", "100 Hour Inspection", 100.0),
                ScheduledItem::calendar("ANNUAL", "Annual Review"),
                ScheduledItem::hourly("200H", "200 Hour Inspection", 200.0),
            ],
        ),
        (
            "Fixed-Wing",
            vec![ScheduledItem::hourly("25H", "25 Hour Check", 25.0)],
        ),
        (
            "General",
            vec![ScheduledItem::hourly("50H", "50 Hour Inspection", 50.0)],
        ),
    ])
    .expect("fixture table")
}

#[test]
fn unknown_manufacturer_and_type_fall_back_to_general() {
    let evaluator = IntervalEvaluator::new(fixture());
    let category = evaluator.resolve_category(&aircraft("Acme Drones", "Blimp", 10.0));
    assert_eq!(category.key, GENERAL_CATEGORY);
    assert_eq!(category.items.len(), 1);
}

#[test]
fn manufacturer_wins_over_type_and_type_matches_normalized() {
    let evaluator = IntervalEvaluator::new(fixture());
    assert_eq!(
        evaluator
            .resolve_category(&aircraft(" DJI ", "fixed wing", 0.0))
            .key,
        "DJI"
    );
    assert_eq!(
        evaluator
            .resolve_category(&aircraft("Acme", "fixed_wing", 0.0))
            .key,
        "FIXED WING"
    );
}

#[test]
fn dji_at_95_hours_is_approaching_100() {
    let evaluator = IntervalEvaluator::new(fixture());
    let drone = aircraft("DJI", "Quadcopter", 95.0);
    assert_eq!(evaluator.next_due_interval(&drone), Some(100.0));
    assert!(evaluator.is_approaching(&drone));
    assert!(!evaluator.is_overdue(&drone));
    assert_eq!(evaluator.evaluate(&drone).status, ServiceStatus::Approaching);
}

#[test]
fn dji_at_250_without_200_record_is_overdue() {
    let evaluator = IntervalEvaluator::new(fixture());
    let mut drone = aircraft("DJI", "Quadcopter", 250.0);
    drone.history.push(history("100 Hour Inspection", None));
    assert!(evaluator.is_overdue(&drone));
    assert_eq!(evaluator.overdue_items(&drone), vec!["200H".to_string()]);
    assert_eq!(evaluator.next_due_interval(&drone), Some(300.0));
}

#[test]
fn structured_completion_code_clears_exactly_its_item() {
    let evaluator = IntervalEvaluator::new(fixture());
    let mut drone = aircraft("DJI", "Quadcopter", 250.0);
    drone.history.push(history("Routine service", Some("100h")));
    assert_eq!(evaluator.overdue_items(&drone), vec!["200H".to_string()]);

    drone.history.push(history("Major service", Some("200H")));
    assert!(!evaluator.is_overdue(&drone));
    assert_eq!(evaluator.evaluate(&drone).status, ServiceStatus::UpToDate);
}

#[test]
fn coded_entry_does_not_fall_back_to_title_match() {
    let evaluator = IntervalEvaluator::new(fixture());
    let mut drone = aircraft("DJI", "Quadcopter", 150.0);
    drone.history.push(history("100 Hour Inspection", Some("ANNUAL")));
    assert!(evaluator.is_overdue(&drone));
}

#[test]
fn legacy_title_match_is_whole_number() {
    let evaluator = IntervalEvaluator::new(fixture());
    let mut drone = aircraft("DJI", "Quadcopter", 250.0);
    drone.history.push(history("1200 Hour Inspection", None));
    drone.history.push(history("2000 Hour Inspection", None));
    drone.history.push(history("100 Hour Inspection", None));
    assert_eq!(evaluator.overdue_items(&drone), vec!["200H".to_string()]);

    drone.history.push(history("200 Hour Inspection", None));
    assert!(!evaluator.is_overdue(&drone));
}

#[test]
fn zero_hours_is_never_overdue_without_zero_threshold() {
    let evaluator = IntervalEvaluator::new(fixture());
    let drone = aircraft("DJI", "Quadcopter", 0.0);
    assert!(!evaluator.is_overdue(&drone));
    assert_eq!(evaluator.next_due_interval(&drone), Some(100.0));
    assert!(!evaluator.is_approaching(&drone));
}

#[test]
fn past_every_threshold_has_no_next_due_and_is_not_approaching() {
    let evaluator = IntervalEvaluator::new(fixture());
    let mut drone = aircraft("DJI", "Quadcopter", 412.0);
    for code in ["100H", "200H", "300H"] {
        drone.history.push(history("Service", Some(code)));
    }
    assert_eq!(evaluator.next_due_interval(&drone), None);
    assert!(!evaluator.is_approaching(&drone));
    assert!(!evaluator.is_overdue(&drone));
}

#[test]
fn next_due_is_strictly_greater_than_hours() {
    let evaluator = IntervalEvaluator::new(fixture());
    for hours in [0.0, 99.9, 100.0, 100.1, 199.0, 200.0, 299.5, 300.0, 1000.0] {
        let drone = aircraft("DJI", "Quadcopter", hours);
        match evaluator.next_due_interval(&drone) {
            Some(next) => assert!(next > hours, "next {next} for {hours}"),
            None => assert!(!evaluator.is_approaching(&drone)),
        }
    }
}

#[test]
fn exactly_on_threshold_is_overdue_not_approaching() {
    let evaluator = IntervalEvaluator::new(fixture());
    let drone = aircraft("DJI", "Quadcopter", 100.0);
    assert_eq!(evaluator.next_due_interval(&drone), Some(200.0));
    assert!(evaluator.is_overdue(&drone));
    assert!(!evaluator.is_approaching(&drone));
}

#[test]
fn overdue_takes_precedence_over_approaching() {
    let evaluator = IntervalEvaluator::new(fixture());
    let drone = aircraft("DJI", "Quadcopter", 195.0);
    assert!(evaluator.is_approaching(&drone));
    assert!(evaluator.is_overdue(&drone));
    assert_eq!(evaluator.evaluate(&drone).status, ServiceStatus::Overdue);
}

#[test]
fn non_finite_or_negative_hours_are_unclassified() {
    let evaluator = IntervalEvaluator::new(fixture());
    for hours in [f64::NAN, f64::INFINITY, -5.0] {
        let drone = aircraft("DJI", "Quadcopter", hours);
        assert_eq!(evaluator.next_due_interval(&drone), None);
        assert!(!evaluator.is_approaching(&drone));
        assert!(!evaluator.is_overdue(&drone));
        let assessment = evaluator.evaluate(&drone);
        assert_eq!(assessment.status, ServiceStatus::Unclassified);
        assert_eq!(assessment.category, "DJI");
    }
}

#[test]
fn approaching_window_is_configurable() {
    let evaluator = IntervalEvaluator::new(fixture()).with_approaching_window(25.0);
    let drone = aircraft("DJI", "Quadcopter", 80.0);
    assert!(evaluator.is_approaching(&drone));

    let ignored = IntervalEvaluator::new(fixture()).with_approaching_window(f64::NAN);
    assert_eq!(ignored.approaching_window(), 10.0);
    assert!(!ignored.is_approaching(&drone));
}

#[test]
fn evaluation_is_deterministic() {
    let evaluator = IntervalEvaluator::new(IntervalTable::default());
    let drone = aircraft("DJI", "Quadcopter", 412.0);
    assert_eq!(evaluator.evaluate(&drone), evaluator.evaluate(&drone));
}

#[test]
fn table_requires_general_category() {
    let err = IntervalTable::new([(
        "DJI",
        vec![ScheduledItem::hourly("100H", "100 Hour", 100.0)],
    )])
    .expect_err("missing general");
    assert!(matches!(err, IntervalTableError::MissingGeneral));
}

#[test]
fn table_rejects_invalid_thresholds_and_duplicate_keys() {
    let err = IntervalTable::new([
        ("GENERAL", vec![ScheduledItem::hourly("X", "bad", f64::NAN)]),
    ])
    .expect_err("nan threshold");
    assert!(matches!(err, IntervalTableError::InvalidThreshold { .. }));

    let err = IntervalTable::new([
        ("Fixed Wing", Vec::new()),
        ("fixed-wing", Vec::new()),
        ("GENERAL", Vec::new()),
    ])
    .expect_err("duplicate");
    assert!(matches!(err, IntervalTableError::DuplicateCategory(key) if key == "FIXED WING"));
}

#[test]
fn table_loads_from_json() {
    let table = IntervalTable::from_json(
        r#"{
            "Quantum-Systems": [
                { "code": "150H", "label": "150 Hour Service", "hours": 150 },
                { "code": "ANNUAL", "label": "Annual Review" }
            ],
            "general": [{ "code": "50H", "label": "50 Hour", "hours": 50 }]
        }"#,
    )
    .expect("json table");
    let items = table.category("QUANTUM SYSTEMS").expect("category");
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].hours, None);

    assert!(matches!(
        IntervalTable::from_json("[1, 2]"),
        Err(IntervalTableError::Parse(_))
    ));
}
