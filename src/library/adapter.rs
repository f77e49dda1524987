//! Adapter - tie-breaking and category styling supplied by the host

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::items::Searchable;

/// Host-specific hooks the library consults but doesn't own
pub trait Adapter<T>: Send + Sync {
    /// Order between two items of equal priority when the query is empty
    fn sort_comparison(&self, a: &T, b: &T) -> Ordering;

    /// Style name per category path, for display only
    fn category_path_style_names(&self) -> &HashMap<String, String>;
}

/// Orders by name, then by category path
#[derive(Debug, Default, Clone)]
pub struct NameOrderAdapter {
    styles: HashMap<String, String>,
}

impl NameOrderAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, category_path: impl Into<String>, style: impl Into<String>) -> Self {
        self.styles.insert(category_path.into(), style.into());
        self
    }
}

impl<T: Searchable> Adapter<T> for NameOrderAdapter {
    fn sort_comparison(&self, a: &T, b: &T) -> Ordering {
        let (a, b) = (a.item(), b.item());
        a.name
            .cmp(&b.name)
            .then_with(|| a.category_path.cmp(&b.category_path))
    }

    fn category_path_style_names(&self) -> &HashMap<String, String> {
        &self.styles
    }
}
