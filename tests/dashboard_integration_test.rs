//! End-to-end tests of the metrics engine over generated and hand-built data

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use lablens::core::aggregate::{
    build_location_metrics, build_series, build_summary, build_type_metrics,
};
use lablens::core::change::{compute_change, ChangeDirection};
use lablens::core::dashboard::{DashboardEngine, DashboardRequest};
use lablens::core::filter::{filter_by_window, SampleFilter};
use lablens::core::period::resolve_periods;
use lablens::core::table::{location_table, type_table, SortDirection};
use lablens::data::{MockDataGenerator, SampleStore};
use lablens::domain::catalog::default_locations;
use lablens::domain::{DateWindow, Priority, Sample, SampleStatus};
use tempfile::TempDir;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 31, 18, 0, 0).unwrap()
}

fn generated_store() -> SampleStore {
    MockDataGenerator::new(2024)
        .days(30)
        .now(fixed_now())
        .into_store()
        .unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn test_previous_window_precedes_current() {
    let requested = DateWindow::parse("2024-03-10", "2024-03-12").unwrap();
    let periods = resolve_periods(Some(&requested), day(31));

    assert_eq!(periods.previous_days, DateWindow::new(day(7), day(9)).unwrap());
    assert_eq!(periods.current_days.length_days(), periods.previous_days.length_days());
    assert!(periods.previous.end < periods.current.start);
}

#[test]
fn test_series_is_complete_and_conserves_counts() {
    let store = generated_store();
    let window = DateWindow::new(day(5), day(25)).unwrap();
    let in_window = filter_by_window(store.samples(), &window.to_instants());

    let series = build_series(in_window.iter().copied(), &window);
    assert_eq!(series.len(), 21);
    assert!(series.windows(2).all(|pair| pair[0].date < pair[1].date));

    let submitted: usize = series.iter().map(|p| p.submitted_count).sum();
    assert_eq!(submitted, in_window.len());
}

#[test]
fn test_breakdown_bounds_hold_on_generated_data() {
    let store = generated_store();
    let window = DateWindow::new(day(1), day(30)).unwrap();
    let in_window = filter_by_window(store.samples(), &window.to_instants());

    let locations = build_location_metrics(in_window.iter().copied(), store.locations());
    assert_eq!(locations.len(), 4);
    assert!(locations.iter().all(|l| l.utilization_percent <= 100));
    assert!(locations.iter().all(|l| l.location_id.as_str() != "loc-005"));

    let types = build_type_metrics(in_window.iter().copied(), store.sample_types());
    assert!(types.iter().all(|t| t.completion_rate_percent <= 100));
    assert!(types.iter().all(|t| t.count > 0));
}

#[test]
fn test_inactive_location_samples_are_dropped_from_breakdown() {
    let sample = Sample::builder()
        .id("r-1")
        .sample_number("S20240310-001")
        .submitted_at(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap())
        .priority(Priority::Low)
        .status(SampleStatus::Completed)
        .completed_after_minutes(45)
        .sample_type("Serology")
        .location_id("loc-005")
        .technician("Tom Wilson")
        .department("Research")
        .build()
        .unwrap();
    let store = SampleStore::with_default_catalog(default_locations(), vec![sample]).unwrap();

    let metrics = build_location_metrics(store.samples(), store.locations());
    assert!(metrics.iter().all(|m| m.location_id.as_str() != "loc-005"));
    assert!(metrics.iter().all(|m| m.samples_processed == 0));

    let summary = build_summary(store.samples());
    assert_eq!(summary.total_count, 1);
}

#[test]
fn test_change_conventions() {
    let tie = compute_change(10.0, 10.0);
    assert_eq!(tie.magnitude_percent, 0);
    assert_eq!(tie.direction, ChangeDirection::Increase);

    let from_zero = compute_change(50.0, 0.0);
    assert_eq!(from_zero.magnitude_percent, 0);
    assert_eq!(from_zero.direction, ChangeDirection::Increase);
}

#[test]
fn test_empty_period_reports_zeros() {
    let store = generated_store();
    let window = DateWindow::parse("2023-01-01", "2023-01-07").unwrap();
    let request = DashboardRequest::new(Some(window)).with_today(day(31));
    let report = DashboardEngine::new(&store).build(&request);

    assert_eq!(report.summary.total_count, 0);
    assert_eq!(report.summary.on_time_rate_percent, 0);
    assert_eq!(report.series.len(), 7);
    assert!(report.series.iter().all(|p| p.submitted_count == 0));
    assert!(report.types.is_empty());
    assert_eq!(report.changes.total_samples.direction, ChangeDirection::Increase);
}

#[test]
fn test_filtered_report_only_counts_matching_samples() {
    let store = generated_store();
    let window = DateWindow::new(day(10), day(20)).unwrap();
    let filter = SampleFilter::new()
        .with_priority(Priority::Urgent)
        .with_status(SampleStatus::Completed);
    let request = DashboardRequest::new(Some(window))
        .with_filter(filter.clone())
        .with_today(day(31));

    let report = DashboardEngine::new(&store).build(&request);

    let expected = filter_by_window(filter.apply(store.samples()), &window.to_instants()).len();
    assert_eq!(report.summary.total_count, expected);
    assert_eq!(report.summary.completed_count, expected);
}

#[test]
fn test_generated_dataset_round_trips_through_json() {
    let store = generated_store();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("samples.json");

    store.save_json(&path).unwrap();
    let reloaded = SampleStore::from_json_file(&path).unwrap();

    assert_eq!(reloaded.samples(), store.samples());
    assert_eq!(reloaded.locations().len(), store.locations().len());
}

#[test]
fn test_generator_is_deterministic_per_seed() {
    let a = MockDataGenerator::new(77).days(14).now(fixed_now()).generate().unwrap();
    let b = MockDataGenerator::new(77).days(14).now(fixed_now()).generate().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_sorted_tables_render() {
    let store = generated_store();
    let request = DashboardRequest::new(Some(DateWindow::new(day(1), day(30)).unwrap()))
        .with_today(day(31));
    let report = DashboardEngine::new(&store).build(&request);

    let mut locations = location_table(report.locations.clone());
    assert!(locations.sort_by_name("processed", SortDirection::Descending));
    let rows = locations.rows();
    assert!(rows
        .windows(2)
        .all(|pair| pair[0].samples_processed >= pair[1].samples_processed));

    let mut types = type_table(report.types.clone());
    assert!(types.sort_by_name("type", SortDirection::Ascending));
    let names: Vec<&str> = types.rows().iter().map(|t| t.sample_type.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    assert!(!types.sort_by_name("utilization", SortDirection::Ascending));
    assert!(type_table(Vec::new()).render_text().contains("No data available"));
}
