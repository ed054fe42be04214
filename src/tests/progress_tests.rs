use super::*;
use crate::stats::types::LanguageStat;
use crate::store::types::{EnabledItem, TicketCostView};
use serde_json::json;
use tempfile::TempDir;

fn stats_with(projects: Vec<(&str, f64)>, total_seconds: f64) -> StatsOutput {
    StatsOutput {
        total_seconds: Some(Seconds::from_f64(total_seconds)),
        human_readable: Some("n/a".to_string()),
        languages: vec![LanguageStat::new("Rust", total_seconds)],
        projects: projects
            .into_iter()
            .map(|(name, hours)| ProjectStat {
                name: name.to_string(),
                hours,
                seconds: hours * 3600.0,
            })
            .collect(),
    }
}

fn store_with(items: Vec<Value>) -> StoreOutput {
    StoreOutput {
        item_names: Vec::new(),
        enabled_items: Vec::<EnabledItem>::new(),
        ticket_costs: Vec::<TicketCostView>::new(),
        raw_data: json!({ "items": items }),
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_zero_hours_earns_base_scaled_by_quality() {
    let stats = stats_with(vec![("p", 0.0)], 0.0);
    let earned = estimate_cookies(&stats, &ProgressParams::new("x"));
    assert!(approx(earned, 88.0 * 10.0 / 15.0));
}

#[test]
fn test_per_project_sum_beats_combined_hours() {
    let params = ProgressParams::new("x");
    let split = stats_with(vec![("a", 5.0), ("b", 5.0)], 36000.0);
    let combined = stats_with(vec![("a", 10.0)], 36000.0);

    assert!(estimate_cookies(&split, &params) > estimate_cookies(&combined, &params));
}

#[test]
fn test_falls_back_to_total_hours_without_projects() {
    let params = ProgressParams::new("x");
    let stats = stats_with(vec![], 3600.0 * (std::f64::consts::E - 1.0));

    let expected = 88.0 * (10.0 / 15.0) * (1.0 + 2.0);
    assert!(approx(estimate_cookies(&stats, &params), expected));
}

#[test]
fn test_quality_is_clamped() {
    let stats = stats_with(vec![("p", 0.0)], 0.0);
    let mut params = ProgressParams::new("x");

    params.quality = 40.0;
    assert!(approx(estimate_cookies(&stats, &params), 88.0));

    params.quality = -3.0;
    assert!(approx(estimate_cookies(&stats, &params), 88.0 / 15.0));
}

#[test]
fn test_item_price_prefers_country() {
    let item = json!({"name": "Pad", "ticket_cost": {"base_cost": "10", "uk": "12.5"}});
    assert_eq!(item_price(&item, "uk"), Some(12.5));
    assert_eq!(item_price(&item, "us"), Some(10.0));
    assert_eq!(item_price(&json!({"name": "Free"}), "us"), None);
}

#[test]
fn test_evaluate_reports_progress() {
    let stats = stats_with(vec![("a", 0.0), ("b", 0.0)], 0.0);
    let store = store_with(vec![json!({
        "name": "Keyboard",
        "ticket_cost": {"base_cost": 200}
    })]);
    let mut params = ProgressParams::new("  Keyboard ");
    params.country = " US ".to_string();

    let progress = evaluate(&stats, &store, &params).unwrap();

    let earned = 2.0 * 88.0 * 10.0 / 15.0;
    assert_eq!(progress.name, "Keyboard");
    assert_eq!(progress.country, "us");
    assert_eq!(progress.price, Some(200.0));
    assert!(approx(progress.cookies_earned, earned));
    assert!(approx(progress.cookies_needed.unwrap(), 200.0 - earned));
    assert!(approx(progress.progress_pct.unwrap(), earned / 200.0 * 100.0));
}

#[test]
fn test_evaluate_caps_at_one_hundred_percent() {
    let stats = stats_with(vec![("a", 1000.0)], 0.0);
    let store = store_with(vec![json!({"name": "Sticker", "ticket_cost": {"base_cost": "1"}})]);

    let progress = evaluate(&stats, &store, &ProgressParams::new("Sticker")).unwrap();

    assert_eq!(progress.progress_pct, Some(100.0));
    assert_eq!(progress.cookies_needed, Some(0.0));
}

#[test]
fn test_evaluate_unknown_item() {
    let stats = stats_with(vec![], 0.0);
    let store = store_with(vec![json!({"name": "Sticker", "ticket_cost": {"base_cost": "1"}})]);

    let err = evaluate(&stats, &store, &ProgressParams::new("Laptop")).unwrap_err();
    assert!(matches!(err, Error::UnknownItem { .. }));
}

#[test]
fn test_run_reads_persisted_files() {
    let temp_dir = TempDir::new().unwrap();
    storage::write_json(
        temp_dir.path(),
        storage::STATS_FILE,
        &stats_with(vec![("a", 0.0)], 0.0),
    )
    .unwrap();
    storage::write_json(
        temp_dir.path(),
        storage::STORE_FILE,
        &store_with(vec![json!({"name": "Mug", "ticket_cost": {"base_cost": "88"}})]),
    )
    .unwrap();

    let progress = run(temp_dir.path(), &ProgressParams::new("Mug")).unwrap();

    assert_eq!(progress.price, Some(88.0));
    assert!(progress.progress_pct.is_some());
}

#[test]
fn test_run_without_store_file() {
    let temp_dir = TempDir::new().unwrap();
    storage::write_json(
        temp_dir.path(),
        storage::STATS_FILE,
        &stats_with(vec![], 0.0),
    )
    .unwrap();

    let err = run(temp_dir.path(), &ProgressParams::new("Mug")).unwrap_err();
    assert!(matches!(err, Error::FileRead { .. }));
}
