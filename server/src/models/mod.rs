pub mod document;
pub mod event;
pub mod lenient;
pub mod news;
pub mod review;
pub mod user;

pub use document::Document;
pub use event::{Event, EventQuery, NewEvent, EVENT_CATEGORIES};
pub use lenient::Lenient;
pub use news::{NewNewsArticle, NewsArticle, NewsQuery, NEWS_CATEGORIES};
pub use review::{Meal, NewReview, Review};
pub use user::{Role, User, UserProfile};
