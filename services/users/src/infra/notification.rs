//! Reqwest-backed notification provider adapter.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;

use crate::domain::repository::NotificationPort;
use crate::error::UsersServiceError;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum NotificationRequest<'a> {
    Email {
        to: &'a str,
        subject: &'a str,
        message: &'a str,
    },
    Sms {
        to: &'a str,
        message: &'a str,
    },
}

/// Sends emails and SMS through the notification provider's HTTP API.
#[derive(Clone)]
pub struct HttpNotificationClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl HttpNotificationClient {
    /// `base_url` is the provider root; requests go to `{base_url}/notifications`.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let endpoint = Url::parse(&format!("{}/notifications", base_url.trim_end_matches('/')))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_owned(),
        })
    }

    async fn send(&self, request: &NotificationRequest<'_>) -> Result<(), UsersServiceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| UsersServiceError::NotificationDeliveryFailed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UsersServiceError::NotificationDeliveryFailed(format!(
                "provider responded {status}: {body}"
            )));
        }
        Ok(())
    }
}

impl NotificationPort for HttpNotificationClient {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), UsersServiceError> {
        self.send(&NotificationRequest::Email {
            to,
            subject,
            message,
        })
        .await
    }

    async fn send_sms(&self, to: &str, message: &str) -> Result<(), UsersServiceError> {
        self.send(&NotificationRequest::Sms { to, message }).await
    }
}
