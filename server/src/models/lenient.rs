use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored field that tolerates the wrong JSON type.
///
/// A value of the expected type reads as `Valid`; anything else is kept
/// verbatim as `Invalid` so it is written back unchanged and one bad record
/// never makes the whole document unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Invalid(Value),
}

impl<T> Lenient<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            Lenient::Valid(value) => Some(value),
            Lenient::Invalid(_) => None,
        }
    }
}

impl<T: Default> Default for Lenient<T> {
    fn default() -> Self {
        Lenient::Valid(T::default())
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Valid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_type_is_kept_raw() {
        let field: Lenient<String> = serde_json::from_str("1716200000").unwrap();
        assert_eq!(field.valid(), None);
        assert_eq!(serde_json::to_string(&field).unwrap(), "1716200000");
    }

    #[test]
    fn test_integers_read_as_floats() {
        let field: Lenient<f64> = serde_json::from_str("4").unwrap();
        assert_eq!(field.valid(), Some(&4.0));
    }

    #[test]
    fn test_out_of_range_rating_is_invalid() {
        let field: Lenient<u8> = serde_json::from_str("300").unwrap();
        assert_eq!(field.valid(), None);

        let field: Lenient<u8> = serde_json::from_str("4.5").unwrap();
        assert_eq!(field.valid(), None);
    }
}
