use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Lenient;

/// The four rated meals of a mess day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Snacks,
    Dinner,
}

impl Meal {
    pub const ALL: [Meal; 4] = [Meal::Breakfast, Meal::Lunch, Meal::Snacks, Meal::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            Meal::Breakfast => "breakfast",
            Meal::Lunch => "lunch",
            Meal::Snacks => "snacks",
            Meal::Dinner => "dinner",
        }
    }
}

/// A stored mess review. Append-only once written.
///
/// Ratings, `overall` and `timestamp` are [`Lenient`]: a record written with
/// the wrong types is still loaded, and is skipped where the value is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<Lenient<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Lenient<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snacks: Option<Lenient<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<Lenient<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall: Option<Lenient<f64>>,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub timestamp: Lenient<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Review {
    pub fn rating(&self, meal: Meal) -> Option<u8> {
        let field = match meal {
            Meal::Breakfast => &self.breakfast,
            Meal::Lunch => &self.lunch,
            Meal::Snacks => &self.snacks,
            Meal::Dinner => &self.dinner,
        };
        field.as_ref().and_then(Lenient::valid).copied()
    }

    /// `None` when the record has no usable overall rating.
    pub fn overall_rating(&self) -> Option<f64> {
        self.overall.as_ref().and_then(Lenient::valid).copied()
    }

    /// The stored timestamp, or an empty string when it is not a string.
    pub fn timestamp_str(&self) -> &str {
        self.timestamp.valid().map_or("", String::as_str)
    }
}

/// A review as submitted, before `timestamp` and `overall` are filled in.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewReview {
    pub user: String,
    pub breakfast: Option<u8>,
    pub lunch: Option<u8>,
    pub snacks: Option<u8>,
    pub dinner: Option<u8>,
    pub overall: Option<f64>,
    #[serde(default)]
    pub comments: String,
    pub timestamp: Option<String>,
}

impl NewReview {
    pub fn ratings(&self) -> [(Meal, Option<u8>); 4] {
        [
            (Meal::Breakfast, self.breakfast),
            (Meal::Lunch, self.lunch),
            (Meal::Snacks, self.snacks),
            (Meal::Dinner, self.dinner),
        ]
    }

    /// Mean of the meal ratings that were supplied, or 0 when none were.
    pub fn mean_rating(&self) -> f64 {
        let supplied: Vec<f64> = self
            .ratings()
            .iter()
            .filter_map(|(_, rating)| rating.map(f64::from))
            .collect();

        if supplied.is_empty() {
            0.0
        } else {
            supplied.iter().sum::<f64>() / supplied.len() as f64
        }
    }

    /// Completes the submission. `now` is used when no timestamp was given.
    pub fn into_review(self, now: impl FnOnce() -> String) -> Review {
        let overall = self.overall.unwrap_or_else(|| self.mean_rating());
        let timestamp = self.timestamp.unwrap_or_else(now);

        Review {
            user: self.user,
            breakfast: self.breakfast.map(Lenient::Valid),
            lunch: self.lunch.map(Lenient::Valid),
            snacks: self.snacks.map(Lenient::Valid),
            dinner: self.dinner.map(Lenient::Valid),
            overall: Some(Lenient::Valid(overall)),
            comments: self.comments,
            timestamp: Lenient::Valid(timestamp),
            extra: Map::new(),
        }
    }
}
