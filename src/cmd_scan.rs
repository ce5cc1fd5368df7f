//! Scan subcommand handler.

use std::path::Path;

use anyhow::bail;
use tracing::{debug, info};

use autocheck_core::{MatcherConfig, PageSession, ScanReport};
use autocheck_dom::Document;
use autocheck_store::{KeywordStore, RunStats, process_keywords};

use crate::input::read_input;

/// Options of one `scan` invocation.
pub(crate) struct ScanOptions<'a> {
    pub input: &'a Path,
    pub keywords: Vec<String>,
    pub json: bool,
    pub show_matches: bool,
}

/// Handle `autocheck scan`.
pub(crate) async fn handle_scan_command(
    store: &dyn KeywordStore,
    config: &MatcherConfig,
    options: ScanOptions<'_>,
) -> anyhow::Result<()> {
    let keywords = resolve_keywords(store, &options.keywords).await?;
    let html = read_input(options.input).await?;
    let report = run_scan(store, config, &html, &keywords).await?;
    print_report(&report, options.json, options.show_matches)
}

/// Keywords for a scan: explicit ones when given, otherwise the stored
/// lists (packages first), which are saved back in processed form.
pub(crate) async fn resolve_keywords(
    store: &dyn KeywordStore,
    explicit: &[String],
) -> anyhow::Result<Vec<String>> {
    let keywords = if explicit.is_empty() {
        let lists = store.load_keywords().await?.normalized();
        store.save_keywords(&lists).await?;
        lists.combined()
    } else {
        process_keywords(&explicit.join("\n"))
    };

    if keywords.is_empty() {
        bail!("Please enter at least one keyword");
    }
    debug!(count = keywords.len(), "Resolved keywords");
    Ok(keywords)
}

/// Parse `html`, scan it once and record the run statistics.
pub(crate) async fn run_scan(
    store: &dyn KeywordStore,
    config: &MatcherConfig,
    html: &str,
    keywords: &[String],
) -> anyhow::Result<ScanReport> {
    let mut session = PageSession::new(Document::parse_html(html), config.clone());
    let report = session.scan(keywords);

    if let Some(error) = &report.summary.error {
        bail!("{}", error);
    }

    let summary = &report.summary;
    store
        .record_run(&RunStats::record(summary.total_checkboxes, summary.selected_count))
        .await?;
    info!(
        selected = summary.selected_count,
        total = summary.total_checkboxes,
        "Scan recorded"
    );
    Ok(report)
}

fn print_report(report: &ScanReport, as_json: bool, show_matches: bool) -> anyhow::Result<()> {
    let summary = &report.summary;

    if as_json {
        let output = if show_matches {
            serde_json::to_value(report)?
        } else {
            serde_json::to_value(summary)?
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Success! Selected {} out of {} checkboxes.",
        summary.selected_count, summary.total_checkboxes
    );
    if show_matches {
        for m in &report.matches {
            println!("  {:<30} {}", m.descriptor, m.matched_keywords.join(", "));
        }
    }
    Ok(())
}
