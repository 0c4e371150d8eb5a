//! Status pipeline for the Penelope widget: fetch `sessions_list` from a gateway, validate the
//! envelope, fold the sessions into a summary, and format it for display.

pub mod config;
pub mod constants;
pub mod format;
pub mod gateway;
pub mod render;

pub use config::{AppConfig, GatewayConfig};
pub use format::{format_time_ago, format_time_ago_at, format_tokens, map_model_name};
pub use gateway::{fetch_status, GatewayClient, GatewayError, GatewayStatus};
