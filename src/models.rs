use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// National Weather Service API Models
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub properties: Option<AlertProperties>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AlertProperties {
    pub event: Option<String>,
    #[serde(rename = "areaDesc")]
    pub area_desc: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub headline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsResponse {
    pub properties: Option<PointsProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsProperties {
    pub forecast: Option<String>,
}

impl PointsResponse {
    /// Forecast URL discovered from the grid point, if any
    pub fn forecast_url(&self) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|p| p.forecast.as_deref())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    pub properties: Option<ForecastProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastProperties {
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

impl ForecastResponse {
    /// Forecast periods, empty when the response carries none
    pub fn periods(&self) -> &[ForecastPeriod] {
        self.properties
            .as_ref()
            .map(|p| p.periods.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ForecastPeriod {
    pub name: Option<String>,
    pub temperature: Option<f64>,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: Option<String>,
    #[serde(rename = "windSpeed")]
    pub wind_speed: Option<String>,
    #[serde(rename = "windDirection")]
    pub wind_direction: Option<String>,
    #[serde(rename = "shortForecast")]
    pub short_forecast: Option<String>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetAlertsRequest {
    #[schemars(description = "Two-letter state code (e.g. CA, NY)", length(min = 2, max = 2))]
    pub state: String,
}

impl GetAlertsRequest {
    /// Returns the uppercased state code, or a message if it is not two characters long
    pub fn state_code(&self) -> Result<String, String> {
        let count = self.state.chars().count();
        if count != 2 {
            return Err(format!(
                "Invalid state code: '{}'. Must be exactly 2 characters.",
                self.state
            ));
        }
        Ok(self.state.to_uppercase())
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct GetForecastRequest {
    #[schemars(description = "Latitude of the location (-90 to 90)", range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[schemars(
        description = "Longitude of the location (-180 to 180)",
        range(min = -180.0, max = 180.0)
    )]
    pub longitude: f64,
}

impl GetForecastRequest {
    /// Checks both coordinates are within their geographic bounds
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(format!(
                "Invalid latitude: {}. Must be between -90 and 90.",
                self.latitude
            ));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(format!(
                "Invalid longitude: {}. Must be between -180 and 180.",
                self.longitude
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_code_is_uppercased() {
        let request = GetAlertsRequest {
            state: "ca".to_string(),
        };
        assert_eq!(request.state_code().unwrap(), "CA");
    }

    #[test]
    fn state_code_must_be_two_characters() {
        for state in ["", "C", "CAL", "California"] {
            let request = GetAlertsRequest {
                state: state.to_string(),
            };
            assert!(request.state_code().is_err(), "{state} should be rejected");
        }
    }

    #[test]
    fn coordinates_accept_inclusive_bounds() {
        for (latitude, longitude) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0)] {
            assert!(GetForecastRequest { latitude, longitude }.validate().is_ok());
        }
    }

    #[test]
    fn coordinates_out_of_range_are_rejected() {
        let cases = [(90.5, 0.0), (-91.0, 0.0), (0.0, 180.1), (0.0, -200.0), (f64::NAN, 0.0)];
        for (latitude, longitude) in cases {
            assert!(GetForecastRequest { latitude, longitude }.validate().is_err());
        }
    }

    #[test]
    fn request_schemas_state_their_bounds() {
        let alerts = serde_json::to_value(schemars::schema_for!(GetAlertsRequest)).unwrap();
        let state = &alerts["properties"]["state"];
        assert_eq!(state["minLength"], 2);
        assert_eq!(state["maxLength"], 2);

        let forecast = serde_json::to_value(schemars::schema_for!(GetForecastRequest)).unwrap();
        let latitude = &forecast["properties"]["latitude"];
        let longitude = &forecast["properties"]["longitude"];
        assert_eq!(latitude["minimum"].as_f64(), Some(-90.0));
        assert_eq!(latitude["maximum"].as_f64(), Some(90.0));
        assert_eq!(longitude["minimum"].as_f64(), Some(-180.0));
        assert_eq!(longitude["maximum"].as_f64(), Some(180.0));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let alerts: AlertsResponse = serde_json::from_str("{}").unwrap();
        assert!(alerts.features.is_empty());

        let forecast: ForecastResponse = serde_json::from_str(r#"{"properties":{}}"#).unwrap();
        assert!(forecast.periods().is_empty());

        let points: PointsResponse = serde_json::from_str(r#"{"properties":{"gridId":"LWX"}}"#).unwrap();
        assert!(points.forecast_url().is_none());
    }

    #[test]
    fn null_alert_properties_do_not_fail_the_response() {
        let alerts: AlertsResponse = serde_json::from_str(
            r#"{"features":[{"properties":null},{"id":"x"},{"properties":{"status":"Actual"}}]}"#,
        )
        .unwrap();
        assert_eq!(alerts.features.len(), 3);
        assert!(alerts.features[0].properties.is_none());
        assert!(alerts.features[1].properties.is_none());
        assert_eq!(
            alerts.features[2].properties.as_ref().unwrap().status.as_deref(),
            Some("Actual")
        );
    }

    #[test]
    fn alert_fields_are_read_from_camel_case() {
        let alerts: AlertsResponse = serde_json::from_str(
            r#"{"type":"FeatureCollection","features":[{"properties":{"event":"Flood Warning","areaDesc":"Kern","severity":null}}]}"#,
        )
        .unwrap();
        let props = alerts.features[0].properties.as_ref().unwrap();
        assert_eq!(props.event.as_deref(), Some("Flood Warning"));
        assert_eq!(props.area_desc.as_deref(), Some("Kern"));
        assert_eq!(props.severity, None);
    }
}
