//! HTTP mail-API transport.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

use crate::{MailPayload, MailTransport, TransportError};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Posts the rendered report to a JSON mail API.
///
/// Recipient resolution happens here: in test mode every payload is
/// redirected to the sender's own address, regardless of what the payload
/// carries. The pipelines never see this decision.
pub struct HttpMailTransport {
    client: reqwest::Client,
    endpoint: String,
    token: String,
    sender: String,
    test_mode: bool,
}

#[derive(Serialize)]
struct WireMail<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

impl HttpMailTransport {
    pub fn new(
        endpoint: String,
        token: String,
        sender: String,
        test_mode: bool,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            endpoint,
            token,
            sender,
            test_mode,
        })
    }

    /// Effective recipients for a payload: the sender itself in test mode,
    /// otherwise the payload's list.
    fn resolve_recipients(&self, payload: &MailPayload) -> Vec<String> {
        if self.test_mode {
            vec![self.sender.clone()]
        } else {
            payload.recipients.clone()
        }
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn send(&self, payload: &MailPayload) -> Result<(), TransportError> {
        let to = self.resolve_recipients(payload);
        if self.test_mode {
            info!(sender = %self.sender, "test mode: redirecting mail to sender");
        }

        let wire = WireMail {
            from: &self.sender,
            to: &to,
            subject: &payload.subject,
            html: &payload.html_body,
        };

        info!(recipients = to.len(), subject = %payload.subject, "sending report mail");
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&wire)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Server {
                status: status.as_u16(),
                body,
            });
        }

        info!("report mail accepted");
        Ok(())
    }
}
