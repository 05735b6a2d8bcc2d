use engine_core::metrics::StageMetricsSnapshot;
use model::documents::DocumentMapping;

pub fn print_documents(documents: &[DocumentMapping]) {
    println!("{:<24} {:<28} {:<24} {:>7}", "Kind", "Source", "Destination", "Columns");
    println!("{}", "-".repeat(86));
    for doc in documents {
        println!(
            "{:<24} {:<28} {:<24} {:>7}",
            doc.kind,
            doc.source.as_str(),
            doc.destination.as_str(),
            doc.columns.len()
        );
    }
}

pub fn print_source_check(results: &[(String, bool)]) {
    for (document, exists) in results {
        let status = if *exists { "found" } else { "missing (will be skipped)" };
        println!("{document:<40} {status}");
    }
}

pub fn print_summary(metrics: &StageMetricsSnapshot) {
    println!("Documents migrated: {}", metrics.documents_migrated);
    println!("Documents skipped:  {}", metrics.documents_skipped);
    println!("Rows affected:      {}", metrics.rows_affected);
}
