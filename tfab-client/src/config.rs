//! Controller connection settings.

use std::time::Duration;

const DEFAULT_CONFIG_API_PORT: u16 = 8082;
const DEFAULT_WEB_API_PORT: u16 = 8143;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for one controller.
///
/// Owned by the invocation and threaded through every call; there is no
/// global session state.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub username: String,
    pub password: String,
    /// Base URL of the config API, e.g. `http://192.168.122.111:8082`.
    pub config_api: String,
    /// Base URL of the web API, e.g. `https://192.168.122.111:8143`.
    pub web_api: String,
    /// Timeout applied to every outbound request.
    pub timeout: Duration,
    /// The web API ships a self-signed certificate on most deployments.
    pub accept_invalid_certs: bool,
}

impl ControllerConfig {
    /// Settings for a controller reachable at `controller_ip` on the
    /// default ports.
    pub fn new(
        controller_ip: impl AsRef<str>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let ip = controller_ip.as_ref();
        Self {
            username: username.into(),
            password: password.into(),
            config_api: format!("http://{}:{}", ip, DEFAULT_CONFIG_API_PORT),
            web_api: format!("https://{}:{}", ip, DEFAULT_WEB_API_PORT),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: true,
        }
    }

    /// Settings with explicit base URLs for both API surfaces.
    pub fn with_endpoints(
        config_api: impl Into<String>,
        web_api: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            config_api: config_api.into(),
            web_api: web_api.into(),
            timeout: DEFAULT_TIMEOUT,
            accept_invalid_certs: true,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
