use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::timestamp::{has_date_prefix, parse_timestamp};
use crate::models::{Document, Meal, Review};

/// Window used by the dashboard's "recent" counters.
pub const RECENT_WINDOW_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MealAverages {
    pub breakfast: f64,
    pub lunch: f64,
    pub snacks: f64,
    pub dinner: f64,
    pub overall: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total_reviews: usize,
    pub total_events: usize,
    pub total_news: usize,
    pub active_users: usize,
    pub recent_reviews: usize,
    pub avg_rating: f64,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Reviews stamped at or after `now - days`. Unparseable timestamps are skipped.
/// A window reaching past the earliest representable date has no lower bound.
pub fn within_window(reviews: &[Review], days: u32, now: NaiveDateTime) -> Vec<&Review> {
    let cutoff = Duration::try_days(i64::from(days))
        .and_then(|span| now.checked_sub_signed(span));

    reviews
        .iter()
        .filter(|review| match (parse_timestamp(review.timestamp_str()), cutoff) {
            (Some(stamped), Some(cutoff)) => stamped >= cutoff,
            (Some(_), None) => true,
            (None, _) => false,
        })
        .collect()
}

pub fn average_ratings(reviews: &[Review], days: u32, now: NaiveDateTime) -> MealAverages {
    let recent = within_window(reviews, days, now);
    let meal_mean =
        |meal: Meal| mean(recent.iter().filter_map(|r| r.rating(meal).map(f64::from)));

    MealAverages {
        breakfast: meal_mean(Meal::Breakfast),
        lunch: meal_mean(Meal::Lunch),
        snacks: meal_mean(Meal::Snacks),
        dinner: meal_mean(Meal::Dinner),
        overall: mean(recent.iter().filter_map(|r| r.overall_rating())),
    }
}

pub fn rated_on(reviews: &[Review], user: &str, day: NaiveDate) -> bool {
    reviews
        .iter()
        .any(|review| review.user == user && has_date_prefix(review.timestamp_str(), day))
}

/// Dashboard counters. `avg_rating` covers every review, not just the window.
pub fn stats(document: &Document, now: NaiveDateTime) -> Stats {
    let reviews = &document.reviews;

    let active_users: HashSet<&str> = reviews
        .iter()
        .map(|r| r.user.as_str())
        .filter(|user| !user.is_empty())
        .collect();

    Stats {
        total_reviews: reviews.len(),
        total_events: document.events.len(),
        total_news: document.news.len(),
        active_users: active_users.len(),
        recent_reviews: within_window(reviews, RECENT_WINDOW_DAYS, now).len(),
        avg_rating: mean(reviews.iter().map(|r| r.overall_rating().unwrap_or(0.0))),
    }
}
