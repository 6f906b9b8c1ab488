//! Expo push gateway client.
//!
//! Thin HTTP adapter over the Expo push send endpoint. One call submits one
//! batch of at most the provider's batch size; partitioning is the
//! dispatcher's responsibility.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use krishi_core::config::push::PushConfig;
use krishi_core::error::{AppError, ErrorKind};
use krishi_core::result::AppResult;
use krishi_core::traits::push::{PushGateway, PushMessage, PushTicket};

/// Expo push API response envelope.
#[derive(Debug, Deserialize)]
struct ExpoSendResponse {
    data: Vec<PushTicket>,
}

/// Client for an Expo-compatible push delivery API.
#[derive(Debug, Clone)]
pub struct ExpoPushGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl ExpoPushGateway {
    /// Create a new gateway client from configuration.
    ///
    /// The request timeout bounds every batch call; a timeout surfaces as
    /// that batch's failure.
    pub fn new(config: &PushConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build push HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

/// Check whether a token looks like an Expo push token.
///
/// Expo tokens have the shape `ExponentPushToken[xxxxxxxx]` (or the legacy
/// `ExpoPushToken[...]` prefix) with a non-empty body.
pub fn is_expo_push_token(token: &str) -> bool {
    let body = token
        .strip_prefix("ExponentPushToken[")
        .or_else(|| token.strip_prefix("ExpoPushToken["));
    match body {
        Some(rest) => rest.len() > 1 && rest.ends_with(']'),
        None => false,
    }
}

#[async_trait]
impl PushGateway for ExpoPushGateway {
    fn provider_type(&self) -> &str {
        "expo"
    }

    fn is_valid_token(&self, token: &str) -> bool {
        is_expo_push_token(token)
    }

    async fn send_batch(&self, messages: &[PushMessage]) -> AppResult<Vec<PushTicket>> {
        debug!(count = messages.len(), "Submitting push batch");

        let response = self
            .client
            .post(&self.endpoint)
            .json(messages)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Push gateway request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(format!(
                "Push gateway returned {status}: {body}"
            )));
        }

        let parsed: ExpoSendResponse = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Failed to parse push gateway response",
                e,
            )
        })?;

        if parsed.data.len() != messages.len() {
            return Err(AppError::external_service(format!(
                "Push gateway returned {} tickets for {} messages",
                parsed.data.len(),
                messages.len()
            )));
        }

        Ok(parsed.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_expo_tokens() {
        assert!(is_expo_push_token("ExponentPushToken[abc123XYZ]"));
        assert!(is_expo_push_token("ExpoPushToken[abc123XYZ]"));
    }

    #[test]
    fn test_invalid_tokens_rejected() {
        assert!(!is_expo_push_token(""));
        assert!(!is_expo_push_token("abc123"));
        assert!(!is_expo_push_token("ExponentPushToken[]"));
        assert!(!is_expo_push_token("ExponentPushToken[abc"));
        assert!(!is_expo_push_token("FcmToken[abc123]"));
    }

    #[test]
    fn test_ticket_parsing() {
        let body = r#"{"data":[{"status":"ok","id":"XXXX-XXXX"},{"status":"error","message":"DeviceNotRegistered"}]}"#;
        let parsed: ExpoSendResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.len(), 2);
        assert!(parsed.data[0].is_ok());
        assert!(!parsed.data[1].is_ok());
        assert_eq!(parsed.data[1].message.as_deref(), Some("DeviceNotRegistered"));
    }
}
