//! `gaceta` — official-gazette relevance pipeline.
//!
//! Two scheduled entry points (`ingest` daily, `report` weekly) plus an
//! inspection command. Exit status is 0 when a run completes, including
//! runs with per-notice failures; run-fatal errors (fetch failure, storage
//! corruption, transport failure) exit non-zero.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gaceta_ai::OpenAiAnalyst;
use gaceta_core::Config;
use gaceta_mail::HttpMailTransport;
use gaceta_pipeline::{run_ingest, run_report};
use gaceta_source::HttpGazetteSource;
use gaceta_store::{JsonTableStore, RegulationStore};

mod display;

#[derive(Parser)]
#[command(name = "gaceta", version, about = "Gazette ingestion and reporting")]
struct Cli {
    /// Backing file of the regulation table.
    #[arg(long, env = "GACETA_STORE", default_value = "gaceta.json", global = true)]
    store: PathBuf,

    /// Gazette section endpoint.
    #[arg(long, env = "GACETA_SECTION_URL", default_value = "", global = true)]
    section_url: String,

    /// OpenAI-compatible API base URL.
    #[arg(
        long,
        env = "GACETA_API_BASE",
        default_value = "https://api.openai.com/v1",
        global = true
    )]
    api_base: String,

    #[arg(long, env = "OPENAI_API_KEY", default_value = "", global = true)]
    api_key: String,

    /// Model for the relevance gate.
    #[arg(
        long,
        env = "GACETA_CLASSIFICATION_MODEL",
        default_value = "gpt-4o",
        global = true
    )]
    classification_model: String,

    /// Model for summaries and the weekly digest.
    #[arg(
        long,
        env = "GACETA_SUMMARY_MODEL",
        default_value = "gpt-4o-mini",
        global = true
    )]
    summary_model: String,

    /// Business profile the relevance prompt scores against.
    #[arg(long, env = "GACETA_INDUSTRY_PROFILE", global = true)]
    industry_profile: Option<String>,

    /// Persist only notices scoring strictly above this.
    #[arg(long, env = "GACETA_THRESHOLD", default_value_t = gaceta_core::config::DEFAULT_THRESHOLD, global = true)]
    threshold: u8,

    /// Enrich at most this many qualifying notices per ingest run.
    #[arg(long, env = "GACETA_MAX_PER_RUN", default_value_t = gaceta_core::config::DEFAULT_MAX_PER_RUN, global = true)]
    max_per_run: usize,

    /// Report window length in days.
    #[arg(long, env = "GACETA_WINDOW_DAYS", default_value_t = gaceta_core::config::DEFAULT_WINDOW_DAYS, global = true)]
    window_days: u32,

    /// Mail at most this many rows per report.
    #[arg(long, env = "GACETA_REPORT_TOP_N", default_value_t = gaceta_core::config::DEFAULT_REPORT_TOP_N, global = true)]
    report_top_n: usize,

    /// Feed this many top rows to the digest.
    #[arg(long, env = "GACETA_DIGEST_TOP_N", default_value_t = gaceta_core::config::DEFAULT_DIGEST_TOP_N, global = true)]
    digest_top_n: usize,

    /// Mail-API endpoint.
    #[arg(long, env = "GACETA_MAIL_ENDPOINT", default_value = "", global = true)]
    mail_endpoint: String,

    #[arg(long, env = "GACETA_MAIL_TOKEN", default_value = "", global = true)]
    mail_token: String,

    /// Sender address for outbound reports.
    #[arg(long, env = "GACETA_SENDER", default_value = "", global = true)]
    sender: String,

    /// Comma-separated recipient list.
    #[arg(long, env = "GACETA_RECIPIENTS", default_value = "", global = true)]
    recipients: String,

    /// Redirect all mail to the sender.
    #[arg(long, env = "GACETA_TEST_MODE", global = true)]
    test_mode: bool,

    /// Skip sending when the report window is empty.
    #[arg(long, env = "GACETA_SKIP_EMPTY_REPORT", global = true)]
    skip_empty_report: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch today's section, classify, and persist relevant notices.
    Ingest,
    /// Mail the recent window and archive everything older.
    Report {
        /// Report date (defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the highest-relevance stored records.
    Top {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            store_path: self.store.clone(),
            section_url: self.section_url.clone(),
            api_base_url: self.api_base.clone(),
            api_key: self.api_key.clone(),
            classification_model: self.classification_model.clone(),
            summary_model: self.summary_model.clone(),
            industry_profile: self
                .industry_profile
                .clone()
                .unwrap_or_else(gaceta_core::config::default_industry_profile),
            relevance_threshold: self.threshold,
            max_per_run: self.max_per_run,
            report_top_n: self.report_top_n,
            digest_top_n: self.digest_top_n,
            window_days: self.window_days,
            mail_endpoint: self.mail_endpoint.clone(),
            mail_token: self.mail_token.clone(),
            sender: self.sender.clone(),
            recipients: self.recipients.clone(),
            test_mode: self.test_mode,
            skip_empty_report: self.skip_empty_report,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = cli.config();
    let store = JsonTableStore::open(&config.store_path);

    match cli.command {
        Command::Ingest => {
            config.validate(false)?;
            let source = HttpGazetteSource::new(config.section_url.clone())?;
            let analyst = OpenAiAnalyst::from_config(&config)?;
            let outcome = run_ingest(&source, &analyst, &store, &config).await?;
            tracing::info!(
                fetched = outcome.fetched,
                classified = outcome.classified,
                relevant = outcome.relevant,
                persisted = outcome.persisted,
                failed = outcome.failed,
                "ingest finished"
            );
        }
        Command::Report { date } => {
            config.validate(true)?;
            let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let analyst = OpenAiAnalyst::from_config(&config)?;
            let transport = HttpMailTransport::new(
                config.mail_endpoint.clone(),
                config.mail_token.clone(),
                config.sender.clone(),
                config.test_mode,
            )?;
            let outcome = run_report(&store, &analyst, &transport, &config, today).await?;
            tracing::info!(
                window_rows = outcome.window_rows,
                mailed_rows = outcome.mailed_rows,
                sent = outcome.sent,
                archived = outcome.archived,
                "report finished"
            );
        }
        Command::Top { count } => {
            let rows = store.read_top_n(count)?;
            if rows.is_empty() {
                println!("regulation table is empty");
            }
            for row in &rows {
                display::print_record_card(row);
            }
        }
    }

    Ok(())
}
