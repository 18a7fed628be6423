//! JSON file store for the whole application.
//!
//! Every operation is a full load, an in-memory change and a full save of one
//! document. Writers are serialized behind a mutex and saves go through a
//! temporary file plus rename, so a crash never leaves a half-written file.

pub mod error;
pub mod stats;
pub mod timestamp;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info, warn};

use crate::models::{
    Document, Event, EventQuery, NewEvent, NewNewsArticle, NewReview, NewsArticle, NewsQuery,
    Review, Role, User,
};

pub use error::StoreError;
pub use stats::{MealAverages, Stats, RECENT_WINDOW_DAYS};

pub struct DataManager {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl DataManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Opens the store at `path`, creating a seeded document when absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let manager = Self::new(path);
        manager.ensure_storage()?;
        Ok(manager)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the seeded document if no file exists yet. Returns whether a
    /// file was created. An existing file is never touched.
    pub fn ensure_storage(&self) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.path.exists() {
            return Ok(false);
        }

        self.save(&Document::seeded())?;
        info!(path = %self.path.display(), "Created data file with seed users");
        Ok(true)
    }

    /// Reads the document. A missing file reads as an empty document; a file
    /// that does not parse is reported as [`StoreError::Corrupt`].
    pub fn load(&self) -> Result<Document, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Data file missing, reading as empty");
                return Ok(Document::default());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_str(&text).map_err(|source| {
            warn!(path = %self.path.display(), error = %source, "Data file is corrupt");
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })
    }

    /// Overwrites the file with `document`, pretty-printed.
    pub fn save(&self, document: &Document) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(document).map_err(StoreError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, text).map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(path = %self.path.display(), "Saved data file");
        Ok(())
    }

    fn update<T>(
        &self,
        change: impl FnOnce(&mut Document) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut document = self.load()?;
        let value = change(&mut document)?;
        self.save(&document)?;
        Ok(value)
    }

    pub fn get_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.load()?.users)
    }

    /// Adds an account unless the username is taken, in which case nothing is
    /// written.
    pub fn add_user(&self, username: &str, password: &str, role: Role) -> Result<User, StoreError> {
        self.update(|document| {
            if document.find_user(username).is_some() {
                return Err(StoreError::UsernameTaken(username.to_string()));
            }

            let user = User::new(username, password, role);
            document.users.push(user.clone());
            info!(username, ?role, "Added user");
            Ok(user)
        })
    }

    /// Exact, case-sensitive match on both username and password.
    pub fn validate_user(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .get_users()?
            .into_iter()
            .find(|u| u.username == username && u.password == password))
    }

    pub fn add_review(&self, review: NewReview) -> Result<Review, StoreError> {
        self.update(|document| {
            let review = review.into_review(|| timestamp::format_timestamp(timestamp::now()));
            document.reviews.push(review.clone());
            Ok(review)
        })
    }

    /// Like [`add_review`](Self::add_review) but refuses a second review from
    /// the same user on the same calendar day. The check and the append happen
    /// under one lock.
    pub fn submit_daily_review(&self, review: NewReview) -> Result<Review, StoreError> {
        self.update(|document| {
            let now = timestamp::now();
            if stats::rated_on(&document.reviews, &review.user, now.date()) {
                return Err(StoreError::AlreadyRatedToday(review.user));
            }

            let review = review.into_review(|| timestamp::format_timestamp(now));
            document.reviews.push(review.clone());
            Ok(review)
        })
    }

    /// All reviews, or the last `limit` in insertion order. A limit of zero
    /// means no limit.
    pub fn get_reviews(&self, limit: Option<usize>) -> Result<Vec<Review>, StoreError> {
        let mut reviews = self.load()?.reviews;

        if let Some(limit) = limit.filter(|&n| n > 0) {
            let skip = reviews.len().saturating_sub(limit);
            reviews.drain(..skip);
        }

        Ok(reviews)
    }

    pub fn add_event(&self, event: NewEvent) -> Result<Event, StoreError> {
        self.update(|document| {
            let event = event.into_event(|| timestamp::format_timestamp(timestamp::now()));
            document.events.push(event.clone());
            Ok(event)
        })
    }

    pub fn get_events(&self, query: &EventQuery) -> Result<Vec<Event>, StoreError> {
        Ok(self
            .load()?
            .events
            .into_iter()
            .filter(|event| query.matches(event))
            .collect())
    }

    pub fn add_news(&self, article: NewNewsArticle) -> Result<NewsArticle, StoreError> {
        self.update(|document| {
            let now = timestamp::now();
            let article = article.into_article(
                || timestamp::format_date(now.date()),
                || timestamp::format_timestamp(now),
            );
            document.news.push(article.clone());
            Ok(article)
        })
    }

    pub fn get_news(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>, StoreError> {
        Ok(query.apply(self.load()?.news))
    }

    pub fn has_rated_today(&self, user: &str) -> Result<bool, StoreError> {
        let reviews = self.get_reviews(None)?;
        Ok(stats::rated_on(&reviews, user, timestamp::now().date()))
    }

    pub fn get_average_ratings(&self, days: u32) -> Result<MealAverages, StoreError> {
        let reviews = self.get_reviews(None)?;
        Ok(stats::average_ratings(&reviews, days, timestamp::now()))
    }

    pub fn get_stats(&self) -> Result<Stats, StoreError> {
        Ok(stats::stats(&self.load()?, timestamp::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, DataManager) {
        let dir = TempDir::new().unwrap();
        let store = DataManager::open(dir.path().join("data").join("reviews.json")).unwrap();
        (dir, store)
    }

    fn rating(user: &str, score: u8) -> NewReview {
        NewReview {
            user: user.to_string(),
            breakfast: Some(score),
            lunch: Some(score),
            snacks: Some(score),
            dinner: Some(score),
            ..NewReview::default()
        }
    }

    #[test]
    fn test_open_creates_seeded_file() {
        let (_dir, store) = temp_store();
        assert!(store.path().exists());

        let users = store.get_users().unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["admin", "E22CSEU1156"]);
    }

    #[test]
    fn test_ensure_storage_leaves_existing_file() {
        let (_dir, store) = temp_store();
        store.add_user("alice", "pw", Role::Student).unwrap();

        assert!(!store.ensure_storage().unwrap());
        assert_eq!(store.get_users().unwrap().len(), 3);
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = DataManager::new(dir.path().join("absent.json"));

        assert_eq!(store.load().unwrap(), Document::default());
        assert_eq!(store.get_stats().unwrap(), Stats::default());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
        assert!(matches!(store.get_reviews(None), Err(StoreError::Corrupt { .. })));
        assert!(matches!(
            store.add_review(rating("alice", 4)),
            Err(StoreError::Corrupt { .. })
        ));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_missing_keys_are_synthesized() {
        let (_dir, store) = temp_store();
        fs::write(store.path(), r#"{"reviews": []}"#).unwrap();

        let document = store.load().unwrap();
        assert!(document.events.is_empty());
        assert!(document.news.is_empty());
    }

    #[test]
    fn test_save_of_load_preserves_content() {
        let (_dir, store) = temp_store();
        let raw = r#"{
  "reviews": [
    {
      "user": "alice",
      "lunch": 4,
      "overall": 4.0,
      "comments": "ok",
      "timestamp": "2024-05-20T12:00:00",
      "tag": 1
    },
    {"user": "bob", "dinner": "great", "overall": "n/a", "timestamp": 1716200000}
  ],
  "events": [],
  "news": [],
  "users": [{"username": "admin", "password": "password123", "role": "admin"}],
  "version_note": "kept"
}"#;
        fs::write(store.path(), raw).unwrap();

        let before: serde_json::Value = serde_json::from_str(raw).unwrap();
        store.save(&store.load().unwrap()).unwrap();
        let after: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();

        assert_eq!(before, after);
    }

    #[test]
    fn test_add_user_rejects_duplicates() {
        let (_dir, store) = temp_store();
        store.add_user("alice", "pw1", Role::Student).unwrap();
        let snapshot = fs::read_to_string(store.path()).unwrap();

        let second = store.add_user("alice", "pw2", Role::Admin);
        assert!(matches!(second, Err(StoreError::UsernameTaken(name)) if name == "alice"));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), snapshot);

        let alices = store
            .get_users()
            .unwrap()
            .into_iter()
            .filter(|u| u.username == "alice")
            .count();
        assert_eq!(alices, 1);
    }

    #[test]
    fn test_validate_user_is_exact() {
        let (_dir, store) = temp_store();

        let admin = store.validate_user("admin", "password123").unwrap().unwrap();
        assert_eq!(admin.role, Role::Admin);

        assert!(store.validate_user("Admin", "password123").unwrap().is_none());
        assert!(store.validate_user("admin", "Password123").unwrap().is_none());
        assert!(store.validate_user("nobody", "").unwrap().is_none());
    }

    #[test]
    fn test_add_review_fills_defaults() {
        let (_dir, store) = temp_store();
        let mut new = rating("alice", 4);
        new.snacks = None;
        new.dinner = Some(1);

        let review = store.add_review(new).unwrap();
        assert_eq!(review.overall_rating(), Some(3.0));
        assert!(timestamp::parse_timestamp(review.timestamp_str()).is_some());
        assert_eq!(store.get_reviews(None).unwrap(), vec![review]);
    }

    #[test]
    fn test_get_reviews_limit_keeps_insertion_order() {
        let (_dir, store) = temp_store();
        for (i, user) in ["a", "b", "c", "d"].iter().enumerate() {
            store.add_review(rating(user, i as u8 + 1)).unwrap();
        }

        let users = |reviews: Vec<Review>| reviews.into_iter().map(|r| r.user).collect::<Vec<_>>();
        assert_eq!(users(store.get_reviews(Some(2)).unwrap()), vec!["c", "d"]);
        assert_eq!(users(store.get_reviews(Some(10)).unwrap()).len(), 4);
        assert_eq!(users(store.get_reviews(Some(0)).unwrap()).len(), 4);
        assert_eq!(users(store.get_reviews(None).unwrap()), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_has_rated_today() {
        let (_dir, store) = temp_store();
        assert!(!store.has_rated_today("alice").unwrap());

        let mut yesterday = rating("alice", 3);
        let a_day_ago = timestamp::now() - Duration::days(1);
        yesterday.timestamp = Some(timestamp::format_timestamp(a_day_ago));
        store.add_review(yesterday).unwrap();
        assert!(!store.has_rated_today("alice").unwrap());

        store.add_review(rating("alice", 4)).unwrap();
        assert!(store.has_rated_today("alice").unwrap());
        assert!(!store.has_rated_today("bob").unwrap());
    }

    #[test]
    fn test_submit_daily_review_once_per_day() {
        let (_dir, store) = temp_store();
        store.submit_daily_review(rating("alice", 4)).unwrap();

        let again = store.submit_daily_review(rating("alice", 2));
        assert!(matches!(again, Err(StoreError::AlreadyRatedToday(_))));
        assert_eq!(store.get_reviews(None).unwrap().len(), 1);

        store.submit_daily_review(rating("bob", 2)).unwrap();
        assert_eq!(store.get_reviews(None).unwrap().len(), 2);
    }

    #[test]
    fn test_average_ratings_and_stats() {
        let (_dir, store) = temp_store();
        store.add_review(rating("alice", 4)).unwrap();
        store.add_review(rating("bob", 2)).unwrap();

        let averages = store.get_average_ratings(7).unwrap();
        assert_eq!(averages.lunch, 3.0);
        assert_eq!(averages.overall, 3.0);

        let stats = store.get_stats().unwrap();
        assert_eq!(stats.total_reviews, 2);
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.recent_reviews, 2);
        assert_eq!(stats.avg_rating, 3.0);
    }

    #[test]
    fn test_huge_average_window_does_not_panic() {
        let (_dir, store) = temp_store();
        store.add_review(rating("alice", 4)).unwrap();

        let averages = store.get_average_ratings(200_000_000).unwrap();
        assert_eq!(averages.overall, 4.0);
        assert_eq!(store.get_average_ratings(u32::MAX).unwrap().lunch, 4.0);
    }

    #[test]
    fn test_mistyped_record_keeps_store_usable() {
        let (_dir, store) = temp_store();
        fs::write(
            store.path(),
            r#"{
  "reviews": [{"user": "bob", "lunch": "n/a", "overall": null, "timestamp": 1716200000}],
  "events": [],
  "news": [],
  "users": [{"username": "admin", "password": "password123", "role": "admin"}]
}"#,
        )
        .unwrap();

        let stats = store.get_stats().unwrap();
        assert_eq!(stats.total_reviews, 1);
        assert_eq!(stats.recent_reviews, 0);
        assert_eq!(stats.avg_rating, 0.0);
        assert_eq!(store.get_average_ratings(7).unwrap(), MealAverages::default());
        assert!(!store.has_rated_today("bob").unwrap());

        store.add_user("alice", "pw", Role::Student).unwrap();
        store.add_review(rating("alice", 5)).unwrap();

        let reviews = store.get_reviews(None).unwrap();
        assert_eq!(reviews.len(), 2);
        let kept = serde_json::to_value(&reviews[0]).unwrap();
        assert_eq!(kept["timestamp"], 1716200000);
        assert_eq!(kept["lunch"], "n/a");
    }

    #[test]
    fn test_events_and_news_get_created_at() {
        let (_dir, store) = temp_store();

        let event = store
            .add_event(NewEvent {
                organizer: "GFG".into(),
                title: "SPIN THE CODE".into(),
                date: "2024-06-01".into(),
                venue: "ALH-002".into(),
                category: "Technical".into(),
                ..NewEvent::default()
            })
            .unwrap();
        assert!(!event.created_at.is_empty());

        let article = store
            .add_news(NewNewsArticle {
                title: "Library Wing".into(),
                content: "Opening soon".into(),
                author: "admin".into(),
                category: "Infrastructure".into(),
                ..NewNewsArticle::default()
            })
            .unwrap();
        assert_eq!(article.date.len(), 10);
        assert!(article.created_at.starts_with(&article.date));

        assert_eq!(store.get_events(&EventQuery::default()).unwrap(), vec![event]);
        assert_eq!(store.get_news(&NewsQuery::default()).unwrap(), vec![article]);
    }

    #[test]
    fn test_concurrent_writers_keep_every_record() {
        use std::sync::Arc;
        use std::thread;

        let (_dir, store) = temp_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.add_review(rating(&format!("user{i}"), 3)).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get_reviews(None).unwrap().len(), 8);
    }
}
