use super::*;
use serde_json::json;

#[test]
fn test_language_stat_keeps_unknown_fields() {
    let raw = json!({
        "name": "Rust",
        "total_seconds": 120,
        "text": "2m",
        "hours": 0,
        "minutes": 2,
        "digital": "0:02:00",
        "percent": 12.5,
        "seconds": 0
    });

    let stat: LanguageStat = serde_json::from_value(raw).unwrap();
    assert_eq!(stat.name, "Rust");
    assert_eq!(stat.total_seconds, 120.0);
    assert_eq!(stat.percent, Some(12.5));
    assert_eq!(stat.extra.get("seconds"), Some(&json!(0)));

    let back = serde_json::to_value(&stat).unwrap();
    assert_eq!(back["total_seconds"], json!(120));
    assert_eq!(back["seconds"], json!(0));
    assert_eq!(back["digital"], json!("0:02:00"));
}

#[test]
fn test_language_stat_null_seconds_is_zero() {
    let stat: LanguageStat =
        serde_json::from_value(json!({"name": null, "total_seconds": null})).unwrap();
    assert_eq!(stat.name, "");
    assert_eq!(stat.total_seconds, 0.0);
}

#[test]
fn test_language_stat_omits_unset_fields() {
    let value = serde_json::to_value(LanguageStat::new("Python", 10.0)).unwrap();
    assert_eq!(value, json!({"name": "Python", "total_seconds": 10.0}));
}

#[test]
fn test_stats_response_tolerates_missing_lists() {
    let response: StatsResponse = serde_json::from_value(json!({
        "data": {"total_seconds": 10, "human_readable_total": "10s", "languages": null}
    }))
    .unwrap();

    let data = response.data.unwrap();
    assert_eq!(data.total_seconds.map(|s| s.as_f64()), Some(10.0));
    assert!(data.languages.is_empty());
    assert!(data.projects.is_empty());
}

#[test]
fn test_stats_response_without_data() {
    let response: StatsResponse = serde_json::from_value(json!({"error": "nope"})).unwrap();
    assert!(response.data.is_none());
}

#[test]
fn test_seconds_keep_their_number_form() {
    let int: Seconds = serde_json::from_value(json!(4339)).unwrap();
    let float: Seconds = serde_json::from_value(json!(12.25)).unwrap();

    assert_eq!(serde_json::to_string(&int).unwrap(), "4339");
    assert_eq!(serde_json::to_string(&float).unwrap(), "12.25");
    assert_eq!(int, 4339.0);
    assert_eq!(serde_json::to_string(&Seconds::from_f64(3661.0)).unwrap(), "3661.0");
    assert_eq!(Seconds::from_f64(f64::NAN).as_f64(), 0.0);
}
