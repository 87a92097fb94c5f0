//! End-to-end estimation against mocked Open-Meteo and SoilGrids servers

mod common;

use chrono::NaiveDate;
use land_potential::domain::{
    AnalysisRequest, GeoLocation, LandAnalysis, PvConfig, ScenarioKind, SoilProfile, WindConfig,
};
use land_potential::PotentialEngine;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, d).unwrap()
}

fn bengaluru() -> GeoLocation {
    GeoLocation::new(12.97, 77.59)
}

#[tokio::test]
async fn test_sunny_day_energy_potential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .and(query_param("latitude", "12.97"))
        .and(query_param("longitude", "77.59"))
        .and(query_param("start_date", "2023-01-01"))
        .and(query_param("end_date", "2023-01-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sunny_day_body()))
        .expect(1)
        .mount(&server)
        .await;

    let engine = PotentialEngine::from_config(&config_for(&server)).unwrap();
    let result = engine
        .estimate_energy_potential(
            bengaluru(),
            date(1),
            date(2),
            1000.0,
            &PvConfig::default(),
            &WindConfig::default(),
        )
        .await;

    assert!((result.pv_energy_kwh - 547.2).abs() < 1e-9);
    assert_eq!(result.wind_energy_kwh, 0.0);
    assert!((result.total_energy_kwh - 547.2).abs() < 1e-9);
    assert_eq!(result.monthly_breakdown.len(), 1);
    assert_eq!(result.monthly_breakdown[0].month, "2023-01");
    assert!((result.summary.peak_hourly_kwh - 45.6).abs() < 1e-9);
    assert_eq!(result.summary.productive_hours, 12);
}

#[tokio::test]
async fn test_repeat_request_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(sunny_day_body()))
        .expect(1)
        .mount(&server)
        .await;

    let engine = PotentialEngine::from_config(&config_for(&server)).unwrap();
    let (pv, wind) = (PvConfig::default(), WindConfig::default());

    let first = engine
        .estimate_energy_potential(bengaluru(), date(1), date(2), 1000.0, &pv, &wind)
        .await;
    let second = engine
        .estimate_energy_potential(bengaluru(), date(1), date(2), 1000.0, &pv, &wind)
        .await;
    assert_eq!(first.pv_energy_kwh, second.pv_energy_kwh);
    assert!(first.pv_energy_kwh > 0.0);
}

#[tokio::test]
async fn test_weather_outage_yields_zero_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let engine = PotentialEngine::from_config(&config_for(&server)).unwrap();
    let result = engine
        .estimate_energy_potential(
            bengaluru(),
            date(1),
            date(2),
            1000.0,
            &PvConfig::default(),
            &WindConfig::default(),
        )
        .await;

    assert!(result.is_zero());
    assert!(result.monthly_breakdown.is_empty());
    assert!(serde_json::to_value(&result).is_ok());
}

#[tokio::test]
async fn test_full_analysis_with_live_soil() {
    let server = MockServer::start().await;
    mount_weather(&server, sunny_day_body()).await;
    mount_soil(&server, 200, clay_loam_body()).await;

    let engine = PotentialEngine::from_config(&config_for(&server)).unwrap();
    let analysis = engine
        .analyze(&AnalysisRequest {
            location: bengaluru(),
            start_date: date(1),
            end_date: date(2),
            area_m2: 1000.0,
            pv: PvConfig::default(),
            wind: WindConfig::default(),
        })
        .await;

    assert_ne!(analysis.soil, SoilProfile::reference());
    assert_eq!(analysis.crops[0], "Rice");
    assert!(analysis.crops.contains(&"Sugarcane".to_string()));
    assert_eq!(analysis.agri.best_crop.as_deref(), Some("Sugarcane"));
    assert!((analysis.agri.max_revenue - 24_000.0).abs() < 1e-6);

    assert_eq!(analysis.scenarios.scenarios.len(), 7);
    assert_eq!(analysis.scenarios.best_scenario.kind, ScenarioKind::AgricultureOnly);
    assert_eq!(
        analysis.scenarios.best_scenario.name,
        "Agriculture Only (Sugarcane)"
    );
    let agrivoltaics = analysis.scenarios.get(ScenarioKind::Agrivoltaics).unwrap();
    assert!((agrivoltaics.revenue - (547.2 * 6.0 * 0.6 + 24_000.0 * 0.7)).abs() < 1e-6);
}

#[tokio::test]
async fn test_soil_outage_uses_reference_profile() {
    let server = MockServer::start().await;
    mount_weather(&server, sunny_day_body()).await;
    mount_soil(&server, 503, json!({"detail": "maintenance"})).await;

    let engine = PotentialEngine::from_config(&config_for(&server)).unwrap();
    let soil = engine.fetch_soil(bengaluru()).await;
    assert_eq!(soil, SoilProfile::reference());

    let crops = engine.recommend_crops(&soil);
    assert!(!crops.is_empty());
    assert!(!crops.contains(&"Rice".to_string()));
}

#[tokio::test]
async fn test_mock_soil_switch_skips_network() {
    let server = MockServer::start().await;
    mount_weather(&server, sunny_day_body()).await;
    Mock::given(method("GET"))
        .and(path(SOIL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(clay_loam_body()))
        .expect(0)
        .mount(&server)
        .await;

    let mut cfg = config_for(&server);
    cfg.soil.use_mock = true;
    let engine = PotentialEngine::from_config(&cfg).unwrap();

    assert_eq!(engine.fetch_soil(bengaluru()).await, SoilProfile::reference());
}

#[tokio::test]
async fn test_analysis_serializes_without_non_finite_numbers() {
    let server = MockServer::start().await;
    mount_weather(&server, sunny_day_body()).await;
    mount_soil(&server, 200, clay_loam_body()).await;

    let engine = PotentialEngine::from_config(&config_for(&server)).unwrap();
    let mut request = AnalysisRequest {
        location: bengaluru(),
        start_date: date(1),
        end_date: date(1),
        area_m2: 1000.0,
        pv: PvConfig::default(),
        wind: WindConfig::default(),
    };
    request.wind.rotor_diameter_m = 0.0;

    let analysis = engine.analyze(&request).await;
    assert_eq!(analysis.energy.wind_energy_kwh, 0.0);

    // non-finite floats would serialize as null and fail to read back
    let json = serde_json::to_string(&analysis).unwrap();
    let back: LandAnalysis = serde_json::from_str(&json).unwrap();
    assert_eq!(back.scenarios.best_scenario, analysis.scenarios.best_scenario);
}
