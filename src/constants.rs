/// User agent string sent to the National Weather Service
pub const USER_AGENT: &str = "weather-app/1.0";

/// Media type requested from the National Weather Service
pub const NWS_ACCEPT: &str = "application/geo+json";

/// National Weather Service API base URL
pub const NWS_API_BASE: &str = "https://api.weather.gov";

/// Path the MCP endpoint is mounted on
pub const MCP_PATH: &str = "/mcp";

/// Name advertised in the MCP server info
pub const SERVER_NAME: &str = "weather";
