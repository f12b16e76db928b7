use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, de};

use crate::{config::YandexConfig, model::WeatherRecord, translate};

use super::WeatherProvider;

const FORECAST_URL: &str = "https://api.weather.yandex.ru/v2/forecast";
const API_KEY_HEADER: &str = "X-Yandex-Weather-Key";

#[derive(Debug, Clone)]
pub struct YandexWeatherProvider {
    config: YandexConfig,
    http: Client,
}

impl YandexWeatherProvider {
    pub fn new(config: YandexConfig) -> Self {
        Self { config, http: Client::new() }
    }

    async fn fetch_current(&self) -> Result<WeatherRecord> {
        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("lat", self.config.lat.to_string()),
                ("lon", self.config.lon.to_string()),
            ])
            .header(API_KEY_HEADER, self.config.api_key.as_str())
            .send()
            .await
            .context("Failed to send request to Yandex Weather")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read Yandex Weather response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Yandex Weather request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).context("Failed to parse Yandex Weather JSON")?;

        record_from_fact(&parsed.fact)
    }
}

#[async_trait]
impl WeatherProvider for YandexWeatherProvider {
    async fn current(&self) -> Result<WeatherRecord> {
        self.fetch_current().await
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    fact: Fact,
}

/// Current-conditions block of the forecast envelope.
#[derive(Debug, Deserialize)]
struct Fact {
    #[serde(deserialize_with = "coerce_f64")]
    temp: f64,
    #[serde(deserialize_with = "coerce_f64")]
    wind_speed: f64,
    #[serde(deserialize_with = "coerce_f64")]
    pressure_mm: f64,
    wind_dir: String,
    prec_type: u8,
    #[serde(deserialize_with = "coerce_f64")]
    prec_strength: f64,
}

/// Numeric fields through direct coercion, coded fields through the
/// translators. An unrecognized code rejects the whole record.
fn record_from_fact(fact: &Fact) -> Result<WeatherRecord> {
    let wind_direction = translate::wind_direction(&fact.wind_dir)?;
    let precipitation_type = translate::precipitation_type(fact.prec_type)?;
    let precipitation_strength = translate::precipitation_strength(fact.prec_strength)?;

    Ok(WeatherRecord {
        temperature: fact.temp,
        wind_direction: wind_direction.to_string(),
        wind_speed: fact.wind_speed,
        pressure: fact.pressure_mm,
        precipitation_type: precipitation_type.to_string(),
        precipitation_strength: precipitation_strength.to_string(),
    })
}

/// The API reports numeric fields as JSON numbers, but some responses quote
/// them; accept both.
fn coerce_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Error bodies can be Cyrillic; cut on a char boundary.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_quoted_numeric_payload() {
        let body = r#"{
            "fact": {
                "temp": "5.5",
                "wind_speed": "3.2",
                "pressure_mm": "745",
                "wind_dir": "n",
                "prec_type": 0,
                "prec_strength": 0
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(body).expect("payload must parse");
        let record = record_from_fact(&parsed.fact).expect("record must assemble");

        assert_eq!(
            record,
            WeatherRecord {
                temperature: 5.5,
                wind_direction: "Северное".to_string(),
                wind_speed: 3.2,
                pressure: 745.0,
                precipitation_type: "Без осадков".to_string(),
                precipitation_strength: "Без осадков".to_string(),
            }
        );
    }

    #[test]
    fn parses_a_plain_numeric_payload() {
        let body = r#"{
            "fact": {
                "temp": -11.3,
                "wind_speed": 7.0,
                "pressure_mm": 762,
                "wind_dir": "sw",
                "prec_type": 3,
                "prec_strength": 0.75
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(body).expect("payload must parse");
        let record = record_from_fact(&parsed.fact).expect("record must assemble");

        assert_eq!(record.temperature, -11.3);
        assert_eq!(record.wind_direction, "Юго-западное");
        assert_eq!(record.precipitation_type, "Снег");
        assert_eq!(record.precipitation_strength, "Сильные осадки");
    }

    #[test]
    fn unknown_wind_code_rejects_the_record() {
        let body = r#"{
            "fact": {
                "temp": 1.0,
                "wind_speed": 1.0,
                "pressure_mm": 750,
                "wind_dir": "zz",
                "prec_type": 0,
                "prec_strength": 0
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(body).expect("payload must parse");
        let err = record_from_fact(&parsed.fact).unwrap_err();

        assert!(err.to_string().contains("zz"));
    }

    #[test]
    fn extra_fact_fields_are_ignored() {
        let body = r#"{
            "now": 1700000000,
            "fact": {
                "temp": 0,
                "feels_like": -4,
                "icon": "ovc",
                "wind_speed": 2.1,
                "pressure_mm": 748,
                "pressure_pa": 997,
                "wind_dir": "c",
                "prec_type": 0,
                "prec_strength": 0
            }
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(body).expect("payload must parse");
        let record = record_from_fact(&parsed.fact).expect("record must assemble");

        assert_eq!(record.wind_direction, "Штиль");
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        // One ASCII byte up front puts every two-byte Cyrillic char on an
        // odd offset, so the 200-byte cap lands mid-char.
        let body = format!("x{}", "п".repeat(150));

        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }
}
