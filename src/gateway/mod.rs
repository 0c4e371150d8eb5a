pub mod aggregate;
pub mod client;
pub mod envelope;
pub mod error;
pub mod status;

pub use aggregate::{aggregate, SessionSummary};
pub use client::{fetch_status, resolve_endpoint, GatewayClient};
pub use envelope::{Session, SessionListDetails};
pub use error::GatewayError;
pub use status::GatewayStatus;
