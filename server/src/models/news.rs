use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const NEWS_CATEGORIES: [&str; 5] = [
    "Academic",
    "Infrastructure",
    "Sports",
    "Cultural",
    "General",
];

/// A published news article. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    /// Publication date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewNewsArticle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: String,
    pub category: String,
    pub date: Option<String>,
    pub created_at: Option<String>,
}

impl NewNewsArticle {
    pub fn into_article(
        self,
        today: impl FnOnce() -> String,
        now: impl FnOnce() -> String,
    ) -> NewsArticle {
        NewsArticle {
            title: self.title,
            content: self.content,
            author: self.author,
            category: self.category,
            date: self.date.unwrap_or_else(today),
            created_at: self.created_at.unwrap_or_else(now),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsQuery {
    pub search: Option<String>,
}

impl NewsQuery {
    pub fn matches(&self, article: &NewsArticle) -> bool {
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                article.title.to_lowercase().contains(&term)
                    || article.content.to_lowercase().contains(&term)
            }
        }
    }

    /// Filters and orders articles newest `date` first; equal dates keep insertion order.
    pub fn apply(&self, articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
        let mut matching: Vec<NewsArticle> =
            articles.into_iter().filter(|a| self.matches(a)).collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));
        matching
    }
}
