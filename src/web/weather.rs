// wttr.in weather source. Location comes from the caller's IP on wttr's side.

use crate::core::{WeatherReport, WeatherSource};
use crate::error::{JarvisError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct WttrPayload {
    current_condition: Vec<CurrentCondition>,
    nearest_area: Vec<NearestArea>,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    #[serde(rename = "temp_C")]
    temp_c: String,
    #[serde(rename = "weatherDesc")]
    weather_desc: Vec<TextValue>,
    humidity: String,
    #[serde(rename = "windspeedKmph")]
    windspeed_kmph: String,
}

#[derive(Debug, Deserialize)]
struct NearestArea {
    #[serde(rename = "areaName")]
    area_name: Vec<TextValue>,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    value: String,
}

pub struct Wttr {
    client: reqwest::Client,
    base_url: String,
}

impl Wttr {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl WeatherSource for Wttr {
    async fn current(&self) -> Result<WeatherReport> {
        let payload: WttrPayload = self
            .client
            .get(&self.base_url)
            .query(&[("format", "j1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let report = into_report(payload)?;
        debug!(city = %report.city, "weather fetched");
        Ok(report)
    }
}

fn into_report(payload: WttrPayload) -> Result<WeatherReport> {
    let current = payload
        .current_condition
        .into_iter()
        .next()
        .ok_or_else(|| JarvisError::Weather("missing current_condition".to_string()))?;

    let city = payload
        .nearest_area
        .into_iter()
        .next()
        .and_then(|area| area.area_name.into_iter().next())
        .map(|name| name.value)
        .unwrap_or_else(|| "your area".to_string());

    let condition = current
        .weather_desc
        .into_iter()
        .next()
        .map(|desc| desc.value)
        .unwrap_or_default();

    Ok(WeatherReport {
        city,
        temp: current.temp_c,
        condition,
        humidity: current.humidity,
        wind: current.windspeed_kmph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload() -> serde_json::Value {
        json!({
            "current_condition": [{
                "temp_C": "21",
                "weatherDesc": [{"value": "Partly cloudy"}],
                "humidity": "60",
                "windspeedKmph": "11"
            }],
            "nearest_area": [{"areaName": [{"value": "Lisbon"}]}]
        })
    }

    #[tokio::test]
    async fn test_current_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("format", "j1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload()))
            .mount(&server)
            .await;

        let wttr = Wttr::new(server.uri(), Duration::from_secs(5)).unwrap();
        let report = wttr.current().await.unwrap();

        assert_eq!(report.city, "Lisbon");
        assert_eq!(report.temp, "21");
        assert_eq!(report.condition, "Partly cloudy");
        assert_eq!(
            report.summary(),
            "Current weather in Lisbon: 21°C, Partly cloudy. Humidity: 60%. Wind: 11 km/h."
        );
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let wttr = Wttr::new(server.uri(), Duration::from_secs(5)).unwrap();
        assert!(wttr.current().await.is_err());
    }

    #[tokio::test]
    async fn test_missing_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"current_condition": [], "nearest_area": []})),
            )
            .mount(&server)
            .await;

        let wttr = Wttr::new(server.uri(), Duration::from_secs(5)).unwrap();
        let err = wttr.current().await.unwrap_err();
        assert!(matches!(err, JarvisError::Weather(_)));
    }
}
