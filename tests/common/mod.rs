#![allow(dead_code)]
use land_potential::config::Config;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const WEATHER_PATH: &str = "/v1/archive";
pub const SOIL_PATH: &str = "/soilgrids/v2.0/properties/query";

/// One UTC day: 500 W/m² from 06:00 to 17:00, no wind
pub fn sunny_day_body() -> Value {
    let time: Vec<String> = (0..24).map(|h| format!("2023-01-01T{h:02}:00")).collect();
    let irradiance: Vec<f64> = (0..24)
        .map(|h| if (6..18).contains(&h) { 500.0 } else { 0.0 })
        .collect();
    json!({
        "latitude": 12.97,
        "longitude": 77.59,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "hourly": {
            "time": time,
            "shortwave_radiation": irradiance,
            "wind_speed_10m": vec![0.0; 24],
            "temperature_2m": vec![24.0; 24]
        }
    })
}

/// Loamy, slightly clay-rich profile that satisfies the Rice rule
pub fn clay_loam_body() -> Value {
    let layer = |name: &str, values: [f64; 3]| {
        json!({
            "name": name,
            "depths": [
                {"label": "0-5cm", "values": {"mean": values[0]}},
                {"label": "5-15cm", "values": {"mean": values[1]}},
                {"label": "15-30cm", "values": {"mean": values[2]}}
            ]
        })
    };
    json!({
        "type": "Feature",
        "properties": {
            "layers": [
                layer("phh2o", [65.0, 65.0, 65.0]),
                layer("clay", [290.0, 300.0, 310.0]),
                layer("sand", [260.0, 250.0, 240.0]),
                layer("soc", [14.0, 12.0, 10.0]),
                layer("nitrogen", [900.0, 800.0, 700.0])
            ]
        }
    })
}

pub async fn mount_weather(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path(WEATHER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_soil(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(SOIL_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Configuration pointing both sources at a mock server
pub fn config_for(server: &MockServer) -> Config {
    let mut cfg = Config::default();
    cfg.weather.base_url = format!("{}{}", server.uri(), WEATHER_PATH);
    cfg.weather.http_timeout_seconds = 5;
    cfg.soil.base_url = format!("{}{}", server.uri(), SOIL_PATH);
    cfg.soil.http_timeout_seconds = 5;
    cfg
}
