//! Gateway configuration.

use std::time::Duration;

/// Credentials and endpoint for the external SMS gateway.
///
/// All three values arrive out of band (environment); when any is
/// missing the dispatcher is constructed without a gateway and every
/// dispatch reduces to `Failed` without network I/O.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL, e.g. `https://sms.example.com`.
    pub base_url: String,
    /// Gateway device identifier.
    pub device_id: String,
    /// Value for the `x-api-key` header.
    pub api_key: String,
}

impl GatewayConfig {
    /// Assemble a config only when every part is present.
    pub fn from_parts(
        base_url: Option<String>,
        device_id: Option<String>,
        api_key: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            base_url: base_url?,
            device_id: device_id?,
            api_key: api_key?,
        })
    }

    /// Full send-sms endpoint for this device.
    pub fn send_sms_url(&self) -> String {
        format!(
            "{}/api/v1/gateway/devices/{}/send-sms",
            self.base_url.trim_end_matches('/'),
            self.device_id
        )
    }
}

/// Upper bound on a single dispatch attempt, so a slow or hanging
/// gateway cannot stall the caller.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);
