use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-headline categories understood by the news API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    General,
    Business,
    Entertainment,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Entertainment,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }

    /// Case-insensitive lookup; `None` for anything that is not a category.
    pub fn lookup(term: &str) -> Option<Self> {
        let term = term.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == term)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The term to fetch for a category name, falling back to `general`.
pub fn default_search_term(category: &str) -> &'static str {
    Category::lookup(category).unwrap_or_default().as_str()
}
