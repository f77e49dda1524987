//! quick-pick CLI - run one query against item sources loaded from JSON

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use quick_pick::config::load_config;
use quick_pick::logging;
use quick_pick::{
    FuzzyMatcher, InMemoryPreferences, JsonPreferences, Library, NameOrderAdapter,
    NucleoMatcher, Preferences, SearchItem, SubsequenceMatcher,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MatcherKind {
    Nucleo,
    Subsequence,
}

#[derive(Parser, Debug)]
#[command(name = "quick-pick", version, about = "Fuzzy search over categorized items")]
struct Cli {
    /// JSON file holding an array of sources, each an array of items
    #[arg(long)]
    items: PathBuf,

    /// Tool name; selects the preferences file
    #[arg(long, default_value = "quick-pick")]
    tool: String,

    /// Context that favorites and collapsed categories are stored under
    #[arg(long, default_value = "default")]
    context: String,

    #[arg(long, value_enum, default_value_t = MatcherKind::Nucleo)]
    matcher: MatcherKind,

    /// Mark an item (by full name) as a favorite before searching
    #[arg(long = "favorite", value_name = "FULL_NAME")]
    favorites: Vec<String>,

    /// Keep preferences in memory instead of the preferences file
    #[arg(long)]
    no_persist: bool,

    /// Search query; empty lists everything by priority
    #[arg(default_value = "")]
    query: String,
}

fn load_sources(path: &Path) -> Result<Vec<Vec<SearchItem>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse items file: {}", path.display()))
}

fn main() -> Result<()> {
    let _guard = logging::init();
    let cli = Cli::parse();
    let config = load_config();

    let sources = load_sources(&cli.items)?;
    info!(
        sources = sources.len(),
        items = sources.iter().map(Vec::len).sum::<usize>(),
        "Loaded item sources"
    );

    let preferences: Arc<dyn Preferences> = if cli.no_persist {
        Arc::new(InMemoryPreferences::new())
    } else {
        Arc::new(JsonPreferences::open(&cli.tool, &config))
    };
    let matcher: Arc<dyn FuzzyMatcher> = match cli.matcher {
        MatcherKind::Nucleo => Arc::new(NucleoMatcher::new()),
        MatcherKind::Subsequence => Arc::new(SubsequenceMatcher),
    };

    let mut library = Library::<SearchItem>::with_config(
        sources,
        Arc::new(NameOrderAdapter::new()),
        preferences,
        &cli.context,
        &config,
        matcher,
    );

    if !cli.favorites.is_empty() {
        library.search("")?;
        for full_name in &cli.favorites {
            match library.find(full_name).cloned() {
                Some(item) => library.set_favorite(&item, true),
                None => warn!(full_name = %full_name, "Unknown favorite, skipping"),
            }
        }
    }

    let started = Instant::now();
    let results = library.search(&cli.query)?;
    logging::log_search(
        &cli.context,
        &cli.query,
        results.len(),
        started.elapsed().as_millis() as u64,
    );

    for item in &results {
        let score = library.search_data(item).map(|m| m.score).unwrap_or_default();
        let marker = if library.is_favorite(item.as_ref()) { "*" } else { "" };
        println!("{}\t{}\t{}", item.full_name(), score, marker);
    }
    Ok(())
}
