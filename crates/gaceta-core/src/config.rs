//! Immutable run configuration.
//!
//! Built once at process start (the CLI maps flags and environment into it)
//! and passed by reference into each pipeline invocation. No ambient state.

use std::path::PathBuf;

use thiserror::Error;

/// Default relevance threshold: a record is persisted only when its score
/// strictly exceeds this.
pub const DEFAULT_THRESHOLD: u8 = 70;
/// At most this many qualifying notices are enriched and persisted per
/// ingest run.
pub const DEFAULT_MAX_PER_RUN: usize = 5;
/// The weekly report mails at most this many rows.
pub const DEFAULT_REPORT_TOP_N: usize = 10;
/// The executive digest covers the top slice of the mailed rows.
pub const DEFAULT_DIGEST_TOP_N: usize = 3;
/// Report window length in days, ending today.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Missing configuration detected before a run starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("api key is required")]
    MissingApiKey,
    #[error("mail sender is required for the report pipeline")]
    MissingSender,
    #[error("mail endpoint is required for the report pipeline")]
    MissingMailEndpoint,
    #[error("recipients are required when not in test mode")]
    MissingRecipients,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backing file of the regulation table.
    pub store_path: PathBuf,
    /// Gazette section endpoint the daily fetch pulls from.
    pub section_url: String,

    /// OpenAI-compatible API base URL.
    pub api_base_url: String,
    pub api_key: String,
    /// Model for the cheap relevance gate.
    pub classification_model: String,
    /// Model for summaries, titles, and the weekly digest.
    pub summary_model: String,
    /// Free-text description of the business the relevance prompt scores
    /// against.
    pub industry_profile: String,

    pub relevance_threshold: u8,
    pub max_per_run: usize,
    pub report_top_n: usize,
    pub digest_top_n: usize,
    pub window_days: u32,

    /// Mail-API endpoint the report posts its payload to.
    pub mail_endpoint: String,
    pub mail_token: String,
    pub sender: String,
    /// Comma-separated recipient list.
    pub recipients: String,
    /// Redirect every mail to the sender instead of the recipient list.
    pub test_mode: bool,
    /// Skip sending when the report window is empty (default: send a
    /// no-data notice).
    pub skip_empty_report: bool,
}

impl Config {
    /// Validate the values a run needs before doing any work.
    ///
    /// `require_mail` is set by the report pipeline; ingest runs do not
    /// touch the transport.
    pub fn validate(&self, require_mail: bool) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if require_mail {
            if self.sender.is_empty() {
                return Err(ConfigError::MissingSender);
            }
            if self.mail_endpoint.is_empty() {
                return Err(ConfigError::MissingMailEndpoint);
            }
            if !self.test_mode && self.recipients.trim().is_empty() {
                return Err(ConfigError::MissingRecipients);
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("gaceta.json"),
            section_url: String::new(),
            api_base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            classification_model: "gpt-4o".to_string(),
            summary_model: "gpt-4o-mini".to_string(),
            industry_profile: default_industry_profile(),
            relevance_threshold: DEFAULT_THRESHOLD,
            max_per_run: DEFAULT_MAX_PER_RUN,
            report_top_n: DEFAULT_REPORT_TOP_N,
            digest_top_n: DEFAULT_DIGEST_TOP_N,
            window_days: DEFAULT_WINDOW_DAYS,
            mail_endpoint: String::new(),
            mail_token: String::new(),
            sender: String::new(),
            recipients: String::new(),
            test_mode: false,
            skip_empty_report: false,
        }
    }
}

/// Profile the relevance prompt scores against when none is configured:
/// a traditional grain-crop producer watching its national official gazette.
pub fn default_industry_profile() -> String {
    "a company dedicated to traditional crop production (wheat, soy, corn, \
     sunflower, sorghum, barley, and pulses) across the country's \
     agricultural region, exposed to rules on seeds, agrochemicals, grain \
     handling, freight, exports, imports, rural contracts, reference \
     prices, and taxes"
        .to_string()
}
