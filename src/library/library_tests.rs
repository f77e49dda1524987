use super::*;
use crate::filter::FunctorFilter;
use crate::items::SearchItem;
use crate::matcher::FuzzyMatch;
use crate::preferences::InMemoryPreferences;

/// Matcher with fixed scores per candidate string
struct ScoreTable(HashMap<String, i64>);

impl FuzzyMatcher for ScoreTable {
    fn fuzzy_match(&self, _query: &str, candidate: &str) -> Option<FuzzyMatch> {
        self.0.get(candidate).map(|&score| FuzzyMatch {
            score,
            indices: vec![0],
        })
    }
}

fn library(sources: Vec<Vec<SearchItem>>) -> (Library<SearchItem>, Arc<InMemoryPreferences>) {
    let prefs = Arc::new(InMemoryPreferences::new());
    let library = Library::<SearchItem>::new(
        sources,
        Arc::new(NameOrderAdapter::new()),
        Arc::clone(&prefs) as Arc<dyn Preferences>,
        "graph",
    );
    (library, prefs)
}

fn math_library() -> (Library<SearchItem>, Arc<InMemoryPreferences>) {
    library(vec![
        vec![SearchItem::new("Math", "Add")],
        vec![SearchItem::new("Math", "Subtract")],
    ])
}

fn names(items: &[Arc<SearchItem>]) -> Vec<&str> {
    items.iter().map(|i| i.name.as_str()).collect()
}

// ============================================
// ORDERING
// ============================================

#[test]
fn test_empty_query_orders_by_priority() {
    let (mut library, _) = library(vec![vec![
        SearchItem::new("", "Three").with_priority(3),
        SearchItem::new("", "One").with_priority(1),
        SearchItem::new("", "Two").with_priority(2),
    ]]);

    let results = library.search("").unwrap();
    assert_eq!(names(&results), vec!["One", "Two", "Three"]);
}

#[test]
fn test_equal_priority_uses_adapter_order_across_sources() {
    let (mut library, _) = library(vec![
        vec![SearchItem::new("Math", "Multiply")],
        vec![SearchItem::new("Math", "Add"), SearchItem::new("Logic", "Add")],
    ]);

    let results = library.search("").unwrap();
    let full_names: Vec<String> = results.iter().map(|i| i.full_name()).collect();
    assert_eq!(full_names, vec!["Logic/Add", "Math/Add", "Math/Multiply"]);
}

#[test]
fn test_query_orders_by_score_across_sources() {
    let table = ScoreTable(
        [("Alpha", 10), ("Beta", 30), ("Gamma", 20)]
            .into_iter()
            .map(|(name, score)| (name.to_string(), score))
            .collect(),
    );
    let mut library = Library::<SearchItem>::with_config(
        vec![
            vec![SearchItem::new("A", "Alpha")],
            vec![SearchItem::new("B", "Beta"), SearchItem::new("C", "Gamma")],
            vec![SearchItem::new("D", "Delta")],
        ],
        Arc::new(NameOrderAdapter::new()),
        Arc::new(InMemoryPreferences::new()),
        "graph",
        &SearchConfig::default(),
        Arc::new(table),
    );

    let results = library.search("x").unwrap();
    assert_eq!(names(&results), vec!["Beta", "Gamma", "Alpha"]);
    assert_eq!(library.search_data(&results[0]).map(|m| m.score), Some(30));
}

#[test]
fn test_splice_moves_previous_front_to_end() {
    let a = Arc::new(SearchItem::new("", "a"));
    let b = Arc::new(SearchItem::new("", "b"));
    let c = Arc::new(SearchItem::new("", "c"));
    let d = Arc::new(SearchItem::new("", "d"));

    let mut results = vec![Arc::clone(&a), Arc::clone(&b)];
    splice_best_first(&mut results, vec![Arc::clone(&c), Arc::clone(&d)]);
    assert_eq!(names(&results), vec!["c", "b", "a", "d"]);

    let mut empty = Vec::new();
    splice_best_first(&mut empty, vec![a, b]);
    assert_eq!(names(&empty), vec!["a", "b"]);
}

// ============================================
// END TO END
// ============================================

#[test]
fn test_two_sources_end_to_end() {
    let (mut library, _) = math_library();

    assert_eq!(names(&library.search("").unwrap()), vec!["Add", "Subtract"]);

    let added = library.search("add").unwrap();
    assert_eq!(names(&added), vec!["Add"]);
    let data = library.search_data(&added[0]).unwrap();
    assert!(data.score > 0);
    assert!(!data.matched_indices.is_empty());

    assert_eq!(names(&library.search("sub").unwrap()), vec!["Subtract"]);
    assert!(library.search("zzzz").unwrap().is_empty());
}

#[test]
fn test_query_is_case_insensitive() {
    let (mut library, _) = math_library();
    assert_eq!(names(&library.search("ADD").unwrap()), vec!["Add"]);
}

#[test]
fn test_filter_applies_to_every_source() {
    let (mut library, _) = math_library();
    let filter: Arc<dyn Filter<SearchItem>> = Arc::new(
        FunctorFilter::new().with_filter(|item: &SearchItem| item.name != "Subtract"),
    );
    library.set_filter(Some(filter));

    assert_eq!(names(&library.search("").unwrap()), vec!["Add"]);

    library.set_filter(None);
    assert_eq!(library.search("").unwrap().len(), 2);
}

#[test]
fn test_index_mut_sets_filter_on_one_source() {
    let (mut library, _) = math_library();
    let filter: Arc<dyn Filter<SearchItem>> = Arc::new(|_: &SearchItem| false);
    library.index_mut(1).unwrap().set_filter(Some(filter));
    assert!(library.index_mut(2).is_none());

    assert_eq!(names(&library.search("").unwrap()), vec!["Add"]);
    assert!(library.indexes()[1].filter().is_some());
}

#[test]
fn test_build_failure_aborts_search() {
    #[derive(Debug)]
    struct Broken(SearchItem);

    impl Searchable for Broken {
        fn item(&self) -> &SearchItem {
            &self.0
        }

        fn build(&mut self) -> anyhow::Result<()> {
            anyhow::bail!("missing definition")
        }
    }

    let mut library = Library::<Broken>::new(
        vec![vec![Broken(SearchItem::new("Math", "Add"))]],
        Arc::new(NameOrderAdapter::new()),
        Arc::new(InMemoryPreferences::new()),
        "graph",
    );

    let err = library.search("").unwrap_err();
    assert!(!err.is_recoverable());
    assert!(library.favorites().is_empty());
}

// ============================================
// FAVORITES
// ============================================

#[test]
fn test_favorites_resolved_on_first_search() {
    let (mut library, prefs) = math_library();
    prefs.set_favorite("graph", "Math/Subtract", true);
    prefs.set_favorite("graph", "Gone/Missing", true);
    assert!(library.favorites().is_empty());

    library.search("").unwrap();

    assert_eq!(names(library.favorites()), vec!["Subtract"]);
    assert!(library.find("Math/Add").is_some());
    assert!(library.find("Gone/Missing").is_none());
}

#[test]
fn test_first_search_with_query_keeps_its_scores() {
    let (mut library, prefs) = math_library();
    prefs.set_favorite("graph", "Math/Add", true);

    let results = library.search("add").unwrap();
    assert_eq!(names(&results), vec!["Add"]);
    assert_eq!(names(library.favorites()), vec!["Add"]);

    let data = library.search_data(&results[0]).unwrap();
    assert!(data.score > 0);
    let subtract = library.find("Math/Subtract").unwrap();
    assert!(library.search_data(subtract).is_none());
}

#[test]
fn test_lookup_is_built_once() {
    let (mut library, prefs) = math_library();
    library.search("").unwrap();

    prefs.set_favorite("graph", "Math/Add", true);
    library.search("").unwrap();

    assert!(library.favorites().is_empty());
    assert!(library.is_favorite(library.find("Math/Add").unwrap().as_ref()));
}

#[test]
fn test_set_favorite_round_trip() {
    let (mut library, prefs) = math_library();
    let results = library.search("").unwrap();
    let add = &results[0];

    library.set_favorite(add, true);
    library.set_favorite(add, true);
    assert!(library.is_favorite(add.as_ref()));
    assert_eq!(names(library.favorites()), vec!["Add"]);
    assert_eq!(prefs.get_favorites("graph"), vec!["Math/Add"]);

    library.set_favorite(add, false);
    assert!(!library.is_favorite(add.as_ref()));
    assert!(library.favorites().is_empty());
    assert!(prefs.get_favorites("graph").is_empty());
}

#[test]
fn test_clear_favorites_empties_store_and_view() {
    let (mut library, prefs) = math_library();
    prefs.set_favorite("graph", "Math/Add", true);
    prefs.set_favorite("graph", "Math/Subtract", true);
    library.search("").unwrap();
    assert_eq!(library.favorites().len(), 2);

    library.clear_favorites();
    assert!(library.favorites().is_empty());
    assert!(prefs.get_favorites("graph").is_empty());
}

#[test]
fn test_favorites_are_scoped_by_context() {
    let (mut library, prefs) = math_library();
    prefs.set_favorite("shader", "Math/Add", true);
    library.search("").unwrap();

    assert_eq!(library.context(), "graph");
    assert!(library.favorites().is_empty());
}

// ============================================
// COLLAPSED + STYLES
// ============================================

#[test]
fn test_collapsed_state() {
    let (library, prefs) = math_library();
    assert!(!library.is_collapsed("Math"));

    library.set_collapsed("Math", true);
    assert!(library.is_collapsed("Math"));
    assert_eq!(prefs.get_collapsed("graph"), vec!["Math"]);

    library.set_collapsed("Math", false);
    assert!(!library.is_collapsed("Math"));
}

#[test]
fn test_style_name_falls_back_to_parent_category() {
    let library = Library::<SearchItem>::new(
        Vec::<Vec<SearchItem>>::new(),
        Arc::new(NameOrderAdapter::new().with_style("Math", "math-node")),
        Arc::new(InMemoryPreferences::new()),
        "graph",
    );

    let sine = SearchItem::new("Math/Trig", "Sine");
    let styled = SearchItem::new("Math", "Add").with_style_name("custom");
    let logic = SearchItem::new("Logic", "And");

    assert_eq!(library.style_name(&sine), Some("math-node"));
    assert_eq!(library.style_name(&styled), Some("custom"));
    assert_eq!(library.style_name(&logic), None);
}

#[test]
fn test_empty_library_returns_nothing() {
    let (mut library, _) = library(Vec::new());
    assert!(library.search("").unwrap().is_empty());
    assert!(library.search("add").unwrap().is_empty());
}
