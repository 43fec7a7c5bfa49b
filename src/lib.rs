//! MCP weather server backed by the National Weather Service API, served
//! over stateless streamable HTTP.

pub mod config;
pub mod constants;
pub mod formatters;
pub mod models;
pub mod service;
pub mod session;
pub mod transport;
pub mod upstream;

pub use config::Config;
pub use service::Weather;
pub use session::{Session, SessionFactory, SessionTracker};
pub use upstream::{FetchError, NwsClient};
