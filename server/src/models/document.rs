use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Event, NewsArticle, Review, Role, User};

/// The whole persisted store: one JSON object holding every collection.
///
/// Missing collections deserialize as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub news: Vec<NewsArticle>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// The document written the first time a store is created.
    pub fn seeded() -> Self {
        Self {
            users: vec![
                User::new("admin", "password123", Role::Admin),
                User::new("E22CSEU1156", "student123", Role::Student),
            ],
            ..Self::default()
        }
    }

    pub fn find_user(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }
}
