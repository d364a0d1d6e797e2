//! HTML rendering for the weekly report email.
//!
//! Pure functions over stored records: the pipeline injects the analyst's
//! digest (or the local fallback) and mails the result. Inline styles only,
//! for mail-client compatibility.

use chrono::NaiveDate;
use gaceta_core::StoredRecord;

/// Subject line for a report sent on the given date.
pub fn subject(today: NaiveDate) -> String {
    format!("Official gazette highlights — {today}")
}

/// Full report body: header, executive-summary block, one card per record.
pub fn report_html(records: &[StoredRecord], digest_html: &str) -> String {
    let mut html = String::from(
        "<div style=\"font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto;\">\n\
         <h1 style=\"color: #2c3e50; border-bottom: 2px solid #3498db; padding-bottom: 10px;\">\n\
         Official Gazette — Relevant Notices\n</h1>\n",
    );

    if !digest_html.trim().is_empty() {
        html.push_str(&summary_block(digest_html));
    }

    for record in records {
        html.push_str(&card(record));
    }

    html.push_str("</div>\n");
    html
}

/// Body used when the report window is empty and sending is configured on.
pub fn empty_notice_html(period_label: &str) -> String {
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto;\">\n\
         <h1 style=\"color: #2c3e50;\">Official Gazette — Relevant Notices</h1>\n\
         <p style=\"color: #555; line-height: 1.6;\">No relevant regulations were \
         recorded for {period_label}.</p>\n</div>\n"
    )
}

/// Deterministic local digest used when the analyst's digest call fails:
/// a short paragraph plus an ordered list of the top records.
pub fn fallback_digest(records: &[StoredRecord], period_label: &str, total: usize) -> String {
    if records.is_empty() {
        return String::new();
    }

    let items: String = records
        .iter()
        .map(|r| {
            format!(
                "<li style=\"margin-bottom:6px;\"><a href=\"{}\" style=\"text-decoration:none; \
                 font-weight:600; color:#1b73c4;\">{}</a> — {}</li>\n",
                link_or_hash(r),
                r.generated_title,
                r.publication_date,
            )
        })
        .collect();

    format!(
        "<p style=\"margin:0 0 12px 0; line-height:1.6; color:#34495e;\">This report \
         covers {total} relevant notices from {period_label}. The {count} most \
         important:</p>\n<ol style=\"margin:0; padding-left:20px;\">\n{items}</ol>\n",
        count = records.len(),
    )
}

fn summary_block(inner: &str) -> String {
    format!(
        "<div style=\"background:#f7fbff; border:1px solid #d6e9ff; padding:16px; \
         border-radius:8px; margin:16px 0 24px 0;\">\n\
         <h2 style=\"margin:0 0 8px 0; color:#1f3b57; font-size:18px;\">Executive summary</h2>\n\
         {inner}\n</div>\n"
    )
}

fn card(record: &StoredRecord) -> String {
    format!(
        "<div style=\"margin-bottom: 30px; padding: 20px; border: 1px solid #ecf0f1; \
         border-radius: 5px;\">\n\
         <h2 style=\"color: #34495e; margin-top: 0; margin-bottom: 15px; font-size: 18px;\">\n\
         {title} - {date}\n</h2>\n\
         <p style=\"color: #555; line-height: 1.6; margin-bottom: 15px;\">{summary}</p>\n\
         <p style=\"margin-bottom: 0;\"><a href=\"{link}\" style=\"color: #3498db; \
         text-decoration: none; font-weight: bold;\">View full notice</a></p>\n</div>\n",
        title = record.generated_title,
        date = record.publication_date,
        summary = record.summary,
        link = link_or_hash(record),
    )
}

fn link_or_hash(record: &StoredRecord) -> &str {
    if record.link.is_empty() {
        "#"
    } else {
        &record.link
    }
}
