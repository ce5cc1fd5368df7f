//! Keyword list and statistics subcommand handlers.

use tracing::info;

use autocheck_store::{KeywordLists, KeywordStore, ListKind, RunStats};

use crate::cli::KeywordsAction;
use crate::input::read_input;

/// Handle `autocheck keywords <action>`.
pub(crate) async fn handle_keywords_command(
    store: &dyn KeywordStore,
    action: KeywordsAction,
) -> anyhow::Result<()> {
    match action {
        KeywordsAction::Show { json } => show_keywords(store, json).await,
        KeywordsAction::Set { list, input } => {
            let kind = ListKind::from(list);
            let text = read_input(&input).await?;
            let lists = set_list(store, kind, &text).await?;
            println!("Saved {} {} keywords.", lists.get(kind).len(), kind);
            Ok(())
        }
        KeywordsAction::Add { list, keywords } => {
            let kind = ListKind::from(list);
            let lists = add_to_list(store, kind, keywords).await?;
            println!("{} now holds {} keywords.", kind, lists.get(kind).len());
            Ok(())
        }
        KeywordsAction::Clear { list } => {
            clear_lists(store, list.map(Into::into)).await?;
            println!("Keywords cleared.");
            Ok(())
        }
    }
}

async fn show_keywords(store: &dyn KeywordStore, as_json: bool) -> anyhow::Result<()> {
    let lists = store.load_keywords().await?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&lists)?);
        return Ok(());
    }

    for kind in ListKind::ALL {
        let keywords = lists.get(kind);
        println!("{} ({}):", kind, keywords.len());
        for keyword in keywords {
            println!("  {}", keyword);
        }
    }
    Ok(())
}

pub(crate) async fn set_list(
    store: &dyn KeywordStore,
    kind: ListKind,
    text: &str,
) -> anyhow::Result<KeywordLists> {
    let mut lists = store.load_keywords().await?;
    lists.set(kind, text);
    store.save_keywords(&lists).await?;
    info!(list = %kind, count = lists.get(kind).len(), "Keyword list replaced");
    Ok(lists)
}

pub(crate) async fn add_to_list(
    store: &dyn KeywordStore,
    kind: ListKind,
    keywords: Vec<String>,
) -> anyhow::Result<KeywordLists> {
    let mut lists = store.load_keywords().await?;
    lists.add(kind, keywords.iter().map(|k| k.trim().to_string()));
    store.save_keywords(&lists).await?;
    Ok(lists)
}

/// Empty `kind`, or both lists when `None`.
pub(crate) async fn clear_lists(store: &dyn KeywordStore, kind: Option<ListKind>) -> anyhow::Result<()> {
    let mut lists = store.load_keywords().await?;
    match kind {
        Some(kind) => lists.set(kind, ""),
        None => lists = KeywordLists::default(),
    }
    store.save_keywords(&lists).await?;
    Ok(())
}

/// Handle `autocheck stats`.
pub(crate) async fn handle_stats_command(store: &dyn KeywordStore) -> anyhow::Result<()> {
    let stats = store.load_stats().await?;
    for line in format_stats(&stats) {
        println!("{}", line);
    }
    Ok(())
}

fn format_stats(stats: &RunStats) -> Vec<String> {
    let last_run = stats
        .last_run_local()
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Never".to_string());
    let count = |value: Option<usize>| value.map_or_else(|| "-".to_string(), |v| v.to_string());

    vec![
        format!("Last run:          {}", last_run),
        format!("Checkboxes found:  {}", count(stats.checkboxes_found)),
        format!("Matches selected:  {}", count(stats.matches_selected)),
    ]
}
