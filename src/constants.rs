pub const PRIMARY_SESSION_KEY: &str = "agent:main:main";
pub const TOOLS_INVOKE_PATH: &str = "/tools/invoke";
pub const SESSIONS_LIST_TOOL: &str = "sessions_list";
pub const MODEL_UNAVAILABLE: &str = "N/A";
pub const GATEWAY_OFFLINE: &str = "Gateway offline";
pub const UNKNOWN_API_ERROR: &str = "Unknown error";
pub const USER_AGENT: &str = "penelope-gateway/0.1";
pub const DEFAULT_GATEWAY_URL: &str = "https://your-hostname.your-tailnet.ts.net";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const MIN_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_REFRESH_MINUTES: u64 = 15;
