use crate::models::{AlertProperties, ForecastPeriod};

/// Returns the field value, or `placeholder` when it is missing or empty
fn or_placeholder<'a>(value: &'a Option<String>, placeholder: &'a str) -> &'a str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    }
}

/// Formats a single weather alert into a human-readable block
pub fn format_alert(alert: &AlertProperties) -> String {
    [
        format!("Event: {}", or_placeholder(&alert.event, "Unknown")),
        format!("Area: {}", or_placeholder(&alert.area_desc, "Unknown")),
        format!("Severity: {}", or_placeholder(&alert.severity, "Unknown")),
        format!("Status: {}", or_placeholder(&alert.status, "Unknown")),
        format!("Headline: {}", or_placeholder(&alert.headline, "No headline")),
        "---".to_string(),
    ]
    .join("\n")
}

/// Formats a single forecast period into a human-readable block
pub fn format_period(period: &ForecastPeriod) -> String {
    let temperature = period
        .temperature
        .map(|t| t.to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    [
        format!("{}:", or_placeholder(&period.name, "Unknown")),
        format!(
            "Temperature: {}\u{00b0}{}",
            temperature,
            or_placeholder(&period.temperature_unit, "F")
        ),
        format!(
            "Wind: {} {}",
            or_placeholder(&period.wind_speed, "Unknown"),
            or_placeholder(&period.wind_direction, "")
        ),
        or_placeholder(&period.short_forecast, "No forecast available").to_string(),
        "---".to_string(),
    ]
    .join("\n")
}

/// Formats all alerts for a state under a header line
pub fn format_alerts(state: &str, alerts: &[AlertProperties]) -> String {
    let blocks: Vec<String> = alerts.iter().map(format_alert).collect();
    format!("Active alerts for {}:\n\n{}", state, blocks.join("\n"))
}

/// Formats all forecast periods for a coordinate pair under a header line
pub fn format_forecast(latitude: f64, longitude: f64, periods: &[ForecastPeriod]) -> String {
    let blocks: Vec<String> = periods.iter().map(format_period).collect();
    format!(
        "Forecast for {}, {}:\n\n{}",
        latitude,
        longitude,
        blocks.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tornado_warning() -> AlertProperties {
        AlertProperties {
            event: Some("Tornado Warning".to_string()),
            area_desc: Some("Lubbock, TX".to_string()),
            severity: Some("Extreme".to_string()),
            status: Some("Actual".to_string()),
            headline: Some("Tornado Warning issued until 5:45PM CDT".to_string()),
        }
    }

    fn tonight() -> ForecastPeriod {
        ForecastPeriod {
            name: Some("Tonight".to_string()),
            temperature: Some(58.0),
            temperature_unit: Some("F".to_string()),
            wind_speed: Some("5 to 10 mph".to_string()),
            wind_direction: Some("SW".to_string()),
            short_forecast: Some("Mostly Clear".to_string()),
        }
    }

    #[test]
    fn alert_renders_fields_in_order() {
        assert_eq!(
            format_alert(&tornado_warning()),
            "Event: Tornado Warning\n\
             Area: Lubbock, TX\n\
             Severity: Extreme\n\
             Status: Actual\n\
             Headline: Tornado Warning issued until 5:45PM CDT\n\
             ---"
        );
    }

    #[test]
    fn alert_with_no_fields_uses_placeholders() {
        let rendered = format_alert(&AlertProperties::default());
        assert_eq!(
            rendered,
            "Event: Unknown\nArea: Unknown\nSeverity: Unknown\nStatus: Unknown\nHeadline: No headline\n---"
        );
        assert_eq!(rendered, format_alert(&AlertProperties::default()));
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let alert = AlertProperties {
            event: Some(String::new()),
            ..tornado_warning()
        };
        assert!(format_alert(&alert).starts_with("Event: Unknown\n"));
    }

    #[test]
    fn period_renders_fields_in_order() {
        assert_eq!(
            format_period(&tonight()),
            "Tonight:\nTemperature: 58\u{00b0}F\nWind: 5 to 10 mph SW\nMostly Clear\n---"
        );
    }

    #[test]
    fn period_with_no_fields_uses_placeholders() {
        assert_eq!(
            format_period(&ForecastPeriod::default()),
            "Unknown:\nTemperature: Unknown\u{00b0}F\nWind: Unknown \nNo forecast available\n---"
        );
    }

    #[test]
    fn embedded_newlines_pass_through() {
        let alert = AlertProperties {
            headline: Some("line one\nline two".to_string()),
            ..AlertProperties::default()
        };
        assert!(format_alert(&alert).contains("Headline: line one\nline two\n---"));
    }

    #[test]
    fn forecast_header_names_coordinates() {
        let text = format_forecast(38.8894, -77.0352, &[tonight(), tonight()]);
        assert!(text.starts_with("Forecast for 38.8894, -77.0352:\n\nTonight:"));
        assert_eq!(text.matches("---").count(), 2);
    }

    #[test]
    fn alerts_header_names_state() {
        let text = format_alerts("TX", &[tornado_warning()]);
        assert!(text.starts_with("Active alerts for TX:\n\nEvent: Tornado Warning"));
        assert!(text.ends_with("---"));
    }
}
