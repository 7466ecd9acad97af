//! BuilderBot Cloud messaging client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{Delivery, Notifier, NotifyError};
use crate::core::config::NotifierConfig;

/// Header carrying the api key
const API_KEY_HEADER: &str = "x-api-builderbot";

#[derive(Debug, Serialize)]
struct MessageContent<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessagePayload<'a> {
    messages: MessageContent<'a>,
    number: &'a str,
    check_if_exists: bool,
}

/// HTTP client for `POST {api_url}/{bot_id}/messages`
pub struct BuilderBotNotifier {
    client: Client,
    api_url: String,
    bot_id: Option<String>,
    api_key: Option<String>,
}

impl BuilderBotNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()?;

        if !config.has_credentials() {
            tracing::warn!("BuilderBot credentials not configured, customer notifications disabled");
        }

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            bot_id: config.bot_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, bot_id: &str) -> String {
        format!("{}/{}/messages", self.api_url, bot_id)
    }
}

#[async_trait]
impl Notifier for BuilderBotNotifier {
    async fn send(&self, number: &str, message: &str) -> Result<Delivery, NotifyError> {
        let (Some(bot_id), Some(api_key)) = (self.bot_id.as_deref(), self.api_key.as_deref())
        else {
            tracing::error!("BuilderBot credentials not configured in environment variables");
            return Err(NotifyError::MissingCredentials);
        };

        let payload = MessagePayload {
            messages: MessageContent { content: message },
            number,
            check_if_exists: false,
        };

        let response = self
            .client
            .post(self.endpoint(bot_id))
            .header(API_KEY_HEADER, api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "BuilderBot API error");
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Some deployments answer 200 with an empty body
        let bytes = response.bytes().await?;
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        Ok(Delivery {
            status: status.as_u16(),
            body,
        })
    }
}
