use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

/// Fire-and-forget push sender. Delivery is an external concern: payloads
/// are posted to a configured webhook, failures are logged and never
/// surfaced to the request that triggered them.
#[derive(Clone)]
pub struct NotificationService {
    http: Client,
    webhook_url: Option<String>,
}

impl NotificationService {
    pub fn new(http: Client, webhook_url: Option<String>) -> Self {
        Self { http, webhook_url }
    }

    pub fn notify(&self, recipient_id: Uuid, title: &str, body: &str) {
        let Some(url) = self.webhook_url.clone() else {
            return;
        };
        let http = self.http.clone();
        let payload = json!({
            "recipient_id": recipient_id,
            "title": title,
            "body": body,
        });
        tokio::spawn(async move {
            match http.post(&url).json(&payload).send().await {
                Ok(resp) if !resp.status().is_success() => {
                    tracing::warn!(status = %resp.status(), "push notification rejected");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = ?e, "push notification delivery failed");
                }
            }
        });
    }
}
