//! Session completion reporting

/// Counters collected over one harvest session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Pages fetched and processed successfully
    pub pages_fetched: u64,

    /// Pages whose fetch failed (left retryable for future sessions)
    pub pages_failed: u64,

    /// Article records extracted and staged
    pub articles_extracted: u64,

    /// Links that passed all filters and entered the frontier
    pub links_enqueued: u64,

    /// Discovered links rejected by the filters
    pub links_skipped: u64,

    /// URLs newly appended to the durable visited set at flush
    pub visited_flushed: u64,

    /// Total records in the article store after the merge
    pub store_size: u64,

    /// Whether the session was cut short by a shutdown signal
    pub interrupted: bool,
}

/// Prints a session report to stdout
pub fn print_report(report: &SessionReport) {
    println!("=== Harvest Session Report ===\n");

    if report.interrupted {
        println!("Session interrupted by shutdown signal; partial results flushed.\n");
    }

    println!("Pages:");
    println!("  Fetched: {}", report.pages_fetched);
    println!("  Failed (retryable): {}", report.pages_failed);
    println!();

    println!("Articles:");
    println!("  Extracted this session: {}", report.articles_extracted);
    println!("  Total in store: {}", report.store_size);
    println!();

    println!("Frontier:");
    println!("  Links enqueued: {}", report.links_enqueued);
    println!("  Links skipped: {}", report.links_skipped);
    println!();

    println!("Visited URLs newly persisted: {}", report.visited_flushed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_is_zeroed() {
        let report = SessionReport::default();
        assert_eq!(report.pages_fetched, 0);
        assert_eq!(report.articles_extracted, 0);
        assert!(!report.interrupted);
    }
}
