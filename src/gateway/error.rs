/// Everything that can go wrong while asking the gateway for its sessions.
///
/// Only the configuration class (`MissingConfiguration`, `InvalidUrl`, `Client`) ever reaches
/// callers as an `Err`. The rest is folded into an offline [`super::GatewayStatus`] whose `error`
/// is this type's `Display` output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway URL or token not configured")]
    MissingConfiguration,
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),
    #[error("failed to build http client: {0}")]
    Client(String),
    #[error("{0}")]
    Network(String),
    #[error("HTTP error: {0}")]
    Http(u16),
    #[error("Invalid response from gateway: {0}")]
    MalformedResponse(String),
    #[error("{0}")]
    Api(String),
}

impl GatewayError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingConfiguration | Self::InvalidUrl(_) | Self::Client(_)
        )
    }
}
