use crate::config::toml_config::RelayConfig;
use crate::domain::model::RelayPayload;
use crate::domain::ports::MailRelay;
use crate::utils::error::{PortfolioError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;

/// Request body of an EmailJS-compatible `email/send` endpoint.
#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a RelayPayload,
}

pub struct HttpMailRelay {
    client: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
    headers: HashMap<String, String>,
}

impl HttpMailRelay {
    pub fn new(
        endpoint: impl Into<String>,
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            service_id: service_id.into(),
            template_id: template_id.into(),
            public_key: public_key.into(),
            headers: HashMap::new(),
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        let relay = Self::new(
            config.endpoint.clone(),
            config.service_id.clone(),
            config.template_id.clone(),
            config.public_key.clone(),
        );
        config
            .headers
            .iter()
            .flatten()
            .fold(relay, |relay, (key, value)| relay.with_header(key, value))
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl MailRelay for HttpMailRelay {
    async fn send(&self, payload: &RelayPayload) -> Result<()> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: payload,
        };

        // 構建請求
        let mut request = self.client.post(&self.endpoint).json(&body);
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        tracing::debug!("Posting contact message to relay: {}", self.endpoint);
        let response = request
            .send()
            .await
            .map_err(|e| PortfolioError::dispatch(format!("relay unreachable: {}", e)))?;

        let status = response.status();
        tracing::debug!("Relay response status: {}", status);

        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(PortfolioError::dispatch(format!(
                "relay responded with {}: {}",
                status,
                text.trim()
            )))
        }
    }
}

/// Logs the payload instead of sending it.
#[derive(Debug, Default, Clone)]
pub struct DryRunRelay;

#[async_trait]
impl MailRelay for DryRunRelay {
    async fn send(&self, payload: &RelayPayload) -> Result<()> {
        tracing::info!(
            "🔍 DRY RUN - would send '{}' from {} <{}> to {}",
            payload.subject,
            payload.from_name,
            payload.from_email,
            payload.to_email
        );
        Ok(())
    }
}
