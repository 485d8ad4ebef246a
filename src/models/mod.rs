use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

pub mod product;
pub mod signal;

pub use product::{Product, ScoredProduct};
pub use signal::{TagSuggestions, UserSignal};

/// Identifier of an authenticated user, as issued by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Response body of the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    /// Ranked products, best match first, at most six
    pub recommendations: Vec<Product>,
    /// Style tags inferred for the user and used for scoring
    pub suggested_tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_display() {
        let id = Uuid::parse_str("7c9e6679-7425-40de-944b-e07fc1f90ae7").unwrap();
        assert_eq!(
            format!("{}", UserId(id)),
            "7c9e6679-7425-40de-944b-e07fc1f90ae7"
        );
    }

    #[test]
    fn test_user_id_serializes_as_plain_string() {
        let id = Uuid::parse_str("7c9e6679-7425-40de-944b-e07fc1f90ae7").unwrap();
        let json = serde_json::to_string(&UserId(id)).unwrap();
        assert_eq!(json, r#""7c9e6679-7425-40de-944b-e07fc1f90ae7""#);
    }

    #[test]
    fn test_recommendations_wire_format() {
        let body = Recommendations {
            recommendations: vec![],
            suggested_tags: vec!["boho".to_string()],
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["recommendations"], serde_json::json!([]));
        assert_eq!(json["suggestedTags"], serde_json::json!(["boho"]));
    }
}
