//! Mail layer: HTML rendering of the weekly report and the outbound
//! transport seam.

use async_trait::async_trait;
use thiserror::Error;

pub mod render;

mod http;
pub use http::HttpMailTransport;

/// Report-pipeline-fatal transport failure. Archiving is withheld when
/// `send` fails, so the window stays available for the next run.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("mail request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail endpoint returned {status}: {body}")]
    Server { status: u16, body: String },
}

/// One outbound email.
///
/// The pipeline constructs exactly one payload per report run with the
/// configured recipient list; final recipient resolution (test-mode
/// redirection) is the transport's concern.
#[derive(Debug, Clone)]
pub struct MailPayload {
    pub subject: String,
    pub html_body: String,
    pub recipients: Vec<String>,
}

impl MailPayload {
    /// Build a payload, splitting a comma-separated recipient list.
    pub fn new(subject: String, html_body: String, recipients_csv: &str) -> Self {
        let recipients = recipients_csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            subject,
            html_body,
            recipients,
        }
    }
}

/// Delivers a rendered report. Implementations resolve the effective
/// recipients and must bound the attempt with a timeout.
#[async_trait]
pub trait MailTransport {
    async fn send(&self, payload: &MailPayload) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_csv_splits_and_trims() {
        let p = MailPayload::new("s".into(), "b".into(), " a@x.com , b@x.com ,, ");
        assert_eq!(p.recipients, ["a@x.com", "b@x.com"]);
    }

    #[test]
    fn empty_csv_gives_no_recipients() {
        let p = MailPayload::new("s".into(), "b".into(), "");
        assert!(p.recipients.is_empty());
    }
}
