use std::sync::Arc;

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError,
};

use crate::constants::SERVER_NAME;
use crate::formatters::{format_alerts, format_forecast};
use crate::models::{
    AlertProperties, AlertsResponse, ForecastResponse, GetAlertsRequest, GetForecastRequest,
    PointsResponse,
};
use crate::session::Session;
use crate::upstream::NwsClient;

/// Weather service that handles MCP requests for a single session
pub struct Weather {
    upstream: Arc<NwsClient>,
    _session: Session,
    tool_router: ToolRouter<Self>,
}

/// Wraps `text` as the single content item of a successful tool reply
fn text_reply(text: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

impl Weather {
    /// Creates a server bound to `session`; the session closes when the server is dropped
    pub fn new(upstream: Arc<NwsClient>, session: Session) -> Self {
        Self {
            upstream,
            _session: session,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for Weather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the National Weather Service API. \
                Provides active alerts for US states and forecasts for US locations."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl Weather {
    /// Gets active weather alerts for a US state
    #[tool(description = "Get weather alerts for a state. Provide a two-letter state code (e.g. CA, NY).")]
    async fn get_alerts(
        &self,
        Parameters(request): Parameters<GetAlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let state = request
            .state_code()
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        tracing::info!("Getting alerts for state: {}", state);

        let url = self.upstream.alerts_url(&state);
        let Ok(alerts) = self.upstream.fetch::<AlertsResponse>(&url).await else {
            return text_reply("Failed to retrieve alerts data");
        };

        if alerts.features.is_empty() {
            return text_reply(format!("No active alerts for {}", state));
        }

        let records: Vec<AlertProperties> =
            alerts.features.into_iter().map(|f| f.properties.unwrap_or_default()).collect();
        text_reply(format_alerts(&state, &records))
    }

    /// Gets the weather forecast for a US location
    #[tool(description = "Get weather forecast for a location. Provide latitude (-90 to 90) and longitude (-180 to 180).")]
    async fn get_forecast(
        &self,
        Parameters(request): Parameters<GetForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        request
            .validate()
            .map_err(|msg| McpError::invalid_params(msg, None))?;

        let GetForecastRequest {
            latitude,
            longitude,
        } = request;
        tracing::info!(
            "Getting forecast for coordinates: {}, {}",
            latitude,
            longitude
        );

        let points_url = self.upstream.points_url(latitude, longitude);
        let Ok(points) = self.upstream.fetch::<PointsResponse>(&points_url).await else {
            return text_reply(format!(
                "Failed to retrieve grid point data for coordinates: {}, {}. \
                This location may not be supported by the NWS API (only US locations are supported).",
                latitude, longitude
            ));
        };

        let Some(forecast_url) = points.forecast_url() else {
            return text_reply("Failed to get forecast URL from grid point data");
        };

        let Ok(forecast) = self.upstream.fetch::<ForecastResponse>(forecast_url).await else {
            return text_reply("Failed to retrieve forecast data");
        };

        let periods = forecast.periods();
        if periods.is_empty() {
            return text_reply("No forecast periods available");
        }

        text_reply(format_forecast(latitude, longitude, periods))
    }
}
