//! Reqwest-backed SMS gateway adapter.
//!
//! This adapter owns transport details only: request serialisation,
//! timeout, and reduction of every failure mode to a dispatch outcome.

use std::time::Duration;

use hirelink_lifecycle::{DispatchOutcome, LifecycleEvent, Notifier};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::template;

/// Wire payload for the gateway's send-sms endpoint.
#[derive(Debug, Serialize)]
struct SendSmsRequest {
    recipients: Vec<String>,
    message: String,
}

/// SMS dispatcher implementing the workflow's notification port.
pub struct SmsDispatcher {
    client: Client,
    gateway: Option<GatewayConfig>,
}

impl SmsDispatcher {
    /// Build a dispatcher with an explicit per-request timeout.
    ///
    /// `gateway: None` produces a dispatcher that fails every dispatch
    /// immediately, without network I/O — the degraded mode for
    /// deployments without gateway credentials.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn new(gateway: Option<GatewayConfig>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, gateway })
    }

    pub fn is_configured(&self) -> bool {
        self.gateway.is_some()
    }
}

impl Notifier for SmsDispatcher {
    async fn notify(&self, event: LifecycleEvent) -> DispatchOutcome {
        let Some(gateway) = &self.gateway else {
            warn!(
                application_id = %event.application_id,
                "sms gateway not configured, dropping notification"
            );
            return DispatchOutcome::Failed;
        };

        let body = SendSmsRequest {
            recipients: vec![event.recipient_phone.clone()],
            message: template::render_message(&event),
        };

        let response = self
            .client
            .post(gateway.send_sms_url())
            .header("x-api-key", gateway.api_key.as_str())
            .json(&body)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                debug!(
                    application_id = %event.application_id,
                    status = %event.new_status,
                    "sms accepted by gateway"
                );
                DispatchOutcome::Delivered
            }
            Ok(response) => {
                warn!(
                    application_id = %event.application_id,
                    http_status = %response.status(),
                    "sms gateway rejected the message"
                );
                DispatchOutcome::Failed
            }
            // Covers connect errors, timeouts, and malformed replies.
            Err(error) => {
                warn!(
                    application_id = %event.application_id,
                    error = %error,
                    "sms dispatch failed"
                );
                DispatchOutcome::Failed
            }
        }
    }
}
