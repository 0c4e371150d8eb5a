use std::error::Error;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;

use super::aggregate::aggregate;
use super::envelope::{decode_response, sessions_list_request, SessionListDetails};
use super::error::GatewayError;
use super::status::GatewayStatus;
use crate::config::GatewayConfig;
use crate::constants::{TOOLS_INVOKE_PATH, USER_AGENT};

#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    config: GatewayConfig,
}

fn redact_url_for_logs(url: &Url) -> String {
    // Credentials, query and fragment never reach a log line or a status message.
    let mut shown = url.clone();
    let _ = shown.set_username("");
    let _ = shown.set_password(None);
    shown.set_query(None);
    shown.set_fragment(None);
    shown.to_string()
}

/// `request error (<timeout|connect|request>); url=<redacted>; cause=<a | b>`
fn format_reqwest_error(e: &reqwest::Error) -> String {
    let class = match (e.is_timeout(), e.is_connect()) {
        (true, _) => "timeout",
        (false, true) => "connect",
        _ => "request",
    };
    let mut out = format!("request error ({class})");
    if let Some(url) = e.url() {
        out.push_str(&format!("; url={}", redact_url_for_logs(url)));
    }

    let mut causes: Vec<String> = Vec::new();
    for cause in std::iter::successors(e.source(), |c: &&(dyn Error + 'static)| (*c).source()) {
        let text = cause.to_string();
        if text.is_empty() || causes.contains(&text) {
            continue;
        }
        causes.push(text);
        if causes.len() == 2 {
            break;
        }
    }
    if !causes.is_empty() {
        out.push_str(&format!("; cause={}", causes.join(" | ")));
    }
    out
}

/// `<base_url>/tools/invoke`, after checking that both settings are present.
pub fn resolve_endpoint(base_url: &str, auth_token: &str) -> Result<Url, GatewayError> {
    let base = base_url.trim();
    if base.is_empty() || auth_token.trim().is_empty() {
        return Err(GatewayError::MissingConfiguration);
    }
    let raw = format!("{}{TOOLS_INVOKE_PATH}", base.trim_end_matches('/'));
    let url = Url::parse(&raw).map_err(|_| GatewayError::InvalidUrl(base.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(GatewayError::InvalidUrl(base.to_string()));
    }
    Ok(url)
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            // The connect phase gets the same budget as the whole request.
            .connect_timeout(config.timeout())
            .build()
            .map_err(|e| GatewayError::Client(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout()
    }

    /// Fetches status using the URL and token this client was built with.
    pub async fn fetch(&self) -> Result<GatewayStatus, GatewayError> {
        self.fetch_status(&self.config.url, &self.config.auth_token).await
    }

    /// One `sessions_list` round trip against `base_url`.
    ///
    /// Returns `Err` only for setup problems (empty settings, unusable URL). Transport failures,
    /// non-200 replies, malformed bodies and gateway-reported errors all come back as an offline
    /// [`GatewayStatus`] carrying the error text, so polling callers only branch on `is_online`.
    pub async fn fetch_status(
        &self,
        base_url: &str,
        auth_token: &str,
    ) -> Result<GatewayStatus, GatewayError> {
        let endpoint = resolve_endpoint(base_url, auth_token)?;
        let target = redact_url_for_logs(&endpoint);
        log::debug!("gateway status: POST {target}");

        match self.invoke_sessions_list(endpoint, auth_token).await {
            Ok(details) => {
                let status = GatewayStatus::online(aggregate(details.count, &details.sessions));
                log::info!(
                    "gateway online: {} sessions, {} tokens ({target})",
                    status.session_count,
                    status.total_tokens
                );
                Ok(status)
            }
            Err(e) => {
                log::warn!("gateway status failed ({target}): {e}");
                Ok(GatewayStatus::offline(e.to_string()))
            }
        }
    }

    async fn invoke_sessions_list(
        &self,
        endpoint: Url,
        auth_token: &str,
    ) -> Result<SessionListDetails, GatewayError> {
        let resp = self
            .http
            .post(endpoint)
            .header(AUTHORIZATION, format!("Bearer {auth_token}"))
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout())
            .json(&sessions_list_request())
            .send()
            .await
            .map_err(|e| GatewayError::Network(format_reqwest_error(&e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .bytes()
            .await
            .map_err(|e| GatewayError::Network(format_reqwest_error(&e)))?;
        decode_response(status, &body)
    }
}

/// Builds a throwaway client with the default timeout and fetches once.
pub async fn fetch_status(base_url: &str, auth_token: &str) -> Result<GatewayStatus, GatewayError> {
    GatewayClient::new(GatewayConfig::new(base_url, auth_token))?
        .fetch()
        .await
}
