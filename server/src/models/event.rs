use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const EVENT_CATEGORIES: [&str; 4] = ["Academic", "Cultural", "Sports", "Technical"];

/// A campus event listing. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default)]
    pub organizer: String,
    /// Path to the poster image, as entered by the organizer.
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEvent {
    pub organizer: String,
    #[serde(default)]
    pub poster: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    pub date: String,
    pub venue: String,
    pub category: String,
    pub created_at: Option<String>,
}

impl NewEvent {
    pub fn into_event(self, now: impl FnOnce() -> String) -> Event {
        Event {
            organizer: self.organizer,
            poster: self.poster,
            title: self.title,
            description: self.description,
            link: self.link,
            date: self.date,
            venue: self.venue,
            category: self.category,
            created_at: self.created_at.unwrap_or_else(now),
            extra: Map::new(),
        }
    }
}

/// Listing filter: case-insensitive text search plus an exact category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl EventQuery {
    pub fn matches(&self, event: &Event) -> bool {
        let category_ok = match self.category.as_deref() {
            None | Some("") | Some("All") => true,
            Some(category) => event.category == category,
        };

        category_ok
            && match self.search.as_deref().map(str::trim) {
                None | Some("") => true,
                Some(term) => {
                    let term = term.to_lowercase();
                    [&event.title, &event.organizer, &event.description]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&term))
                }
            }
    }
}
