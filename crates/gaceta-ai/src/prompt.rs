//! Prompt construction for the three analyst tasks.
//!
//! Kept as pure functions over the notice/record types so the prompts can
//! be asserted on without a live backend.

use gaceta_core::{RawNotice, StoredRecord};

/// Relevance-gate prompt. Asks for strict scoring against the configured
/// industry profile and a JSON object `{relevance_score, reasoning}`.
pub fn relevance(profile: &str, notice: &RawNotice) -> String {
    format!(
        "Rank the following official-gazette notice from 0 to 100 by how \
         relevant it is to {profile}.\n\
         Consider as fully relevant (100) only measures that directly and \
         significantly impact that business's production, transport, \
         commercialisation, or financing — and give the maximum score only \
         when the economic impact is high. Assign 0 to measures aimed at \
         other sectors or to general policy with no concrete effect on the \
         business. Be strict: high scores only for notices that can really \
         change operations, costs, income, or regulatory context.\n\n\
         Respond with a JSON object: {{\"relevance_score\": <0-100 integer>, \
         \"reasoning\": \"<brief explanation>\"}}.\n\n\
         Title: {title}\n\
         Text: {body}",
        title = notice.title,
        body = body_or_placeholder(notice),
    )
}

/// Enrichment prompt: summary, key points, a descriptive title, and a
/// category, all in one structured response.
pub fn enrichment(notice: &RawNotice) -> String {
    format!(
        "Summarise the following regulatory notice, focusing on the aspects \
         that matter operationally. Then provide a meaningful descriptive \
         title and a short category label (e.g. \"Exports\", \"Seeds\", \
         \"Taxes\").\n\n\
         Respond with a JSON object: {{\"summary\": \"...\", \
         \"key_points\": [\"...\"], \"title\": \"...\", \
         \"category\": \"...\"}}.\n\n\
         Title: {title}\n\
         Text: {body}",
        title = notice.title,
        body = body_or_placeholder(notice),
    )
}

/// Digest prompt: one short executive summary over the top records of the
/// report window, returned as an HTML fragment for the email body.
pub fn digest(records: &[StoredRecord], period_label: &str, total: usize) -> String {
    let items: Vec<String> = records
        .iter()
        .map(|r| {
            format!(
                "- {} ({}, relevance {}): {}\n  link: {}",
                r.generated_title, r.publication_date, r.relevance_score, r.summary, r.link
            )
        })
        .collect();

    format!(
        "Write an executive summary for an internal email covering {total} \
         relevant gazette notices from {period_label}. Be precise and do \
         not invent information; at most 90 words of prose.\n\
         Output HTML only: a single <p> summarising the period, then an \
         <ol> with one <li> per notice below, each as \
         <a href=\"LINK\">Title</a> — date.\n\n\
         Top notices:\n{items}",
        items = items.join("\n"),
    )
}

fn body_or_placeholder(notice: &RawNotice) -> &str {
    if notice.body.trim().is_empty() {
        "(no body text published)"
    } else {
        &notice.body
    }
}
