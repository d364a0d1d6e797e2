//! Terminal rendering of stored records for the `top` subcommand.

use gaceta_core::StoredRecord;

const MAX_KEY_POINTS: usize = 5;

/// Print one record as a vertical card.
pub fn print_record_card(record: &StoredRecord) {
    println!("=== {} ===", record.generated_title);
    println!(
        "  {:<18} {}",
        "published", record.publication_date
    );
    println!("  {:<18} {}", "category", record.category);
    println!("  {:<18} {}", "relevance", record.relevance_score);
    println!("  {:<18} {}", "summary", record.summary);

    if !record.key_points.is_empty() {
        println!("  key points ({}):", record.key_points.len());
        for point in record.key_points.iter().take(MAX_KEY_POINTS) {
            println!("    - {point}");
        }
        if record.key_points.len() > MAX_KEY_POINTS {
            println!("    ... and {} more", record.key_points.len() - MAX_KEY_POINTS);
        }
    }

    if !record.link.is_empty() {
        println!("  {:<18} {}", "link", record.link);
    }
    println!();
}
