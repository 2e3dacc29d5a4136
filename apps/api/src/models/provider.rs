use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Legacy document key some provider records still carry for the image hint.
const LEGACY_AI_HINT_KEY: &str = "data-ai-hint";

/// A service professional in the directory. Read-only from the service's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub service: String,
    pub description: String,
    pub rating: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ai_hint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub rating: f64,
    pub comment: String,
    pub author: String,
}

impl Provider {
    /// Builds a provider from a stored document keyed by `id`.
    ///
    /// The document key wins over any `id` field inside the body, and the legacy
    /// `data-ai-hint` key is folded into `aiHint` when the latter is missing.
    pub fn from_document(id: &str, mut doc: Value) -> Result<Self, serde_json::Error> {
        if let Some(fields) = doc.as_object_mut() {
            if let Some(legacy) = fields.remove(LEGACY_AI_HINT_KEY) {
                let has_hint = fields
                    .get("aiHint")
                    .and_then(Value::as_str)
                    .is_some_and(|s| !s.is_empty());
                if !has_hint {
                    fields.insert("aiHint".to_string(), legacy);
                }
            }
            fields.insert("id".to_string(), Value::String(id.to_string()));
        }
        serde_json::from_value(doc)
    }

    /// Case-insensitive substring match on the service category.
    pub fn offers_service(&self, query: &str) -> bool {
        self.service
            .to_lowercase()
            .contains(&query.to_lowercase())
    }

    /// Case-insensitive substring match on name or service category.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.service.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_document_takes_id_from_key() {
        let doc = json!({
            "id": "stale",
            "name": "Ace Plumbing",
            "service": "Plumbing",
            "description": "Pipes and drains",
            "rating": 4.5,
            "image": "https://placehold.co/600x400.png",
            "aiHint": "plumber"
        });
        let provider = Provider::from_document("p1", doc).unwrap();
        assert_eq!(provider.id, "p1");
        assert_eq!(provider.ai_hint, "plumber");
        assert!(provider.reviews.is_empty());
        assert!(provider.location.is_none());
    }

    #[test]
    fn test_from_document_folds_legacy_hint() {
        let doc = json!({
            "name": "Green Thumb",
            "service": "Gardening",
            "description": "Lawns",
            "rating": 4.0,
            "data-ai-hint": "garden"
        });
        let provider = Provider::from_document("g1", doc).unwrap();
        assert_eq!(provider.ai_hint, "garden");
    }

    #[test]
    fn test_from_document_prefers_current_hint() {
        let doc = json!({
            "name": "Green Thumb",
            "service": "Gardening",
            "description": "Lawns",
            "rating": 4.0,
            "aiHint": "lawn",
            "data-ai-hint": "garden"
        });
        let provider = Provider::from_document("g1", doc).unwrap();
        assert_eq!(provider.ai_hint, "lawn");
    }

    #[test]
    fn test_from_document_rejects_missing_required_fields() {
        let doc = json!({"name": "No Service"});
        assert!(Provider::from_document("x", doc).is_err());
    }

    #[test]
    fn test_serializes_camel_case_and_skips_absent_options() {
        let provider = Provider::from_document(
            "p1",
            json!({"name": "A", "service": "B", "description": "C", "rating": 5, "aiHint": "h"}),
        )
        .unwrap();
        let value = serde_json::to_value(&provider).unwrap();
        assert_eq!(value["aiHint"], "h");
        assert!(value.get("location").is_none());
        assert!(value.get("skills").is_none());
        assert_eq!(value["reviews"], json!([]));
    }

    #[test]
    fn test_offers_service_is_case_insensitive_substring() {
        let provider = Provider::from_document(
            "p1",
            json!({"name": "Ace", "service": "Plumbing", "description": "", "rating": 4}),
        )
        .unwrap();
        assert!(provider.offers_service("plumb"));
        assert!(provider.offers_service("PLUMB"));
        assert!(!provider.offers_service("electric"));
    }

    #[test]
    fn test_matches_search_checks_name_and_service() {
        let provider = Provider::from_document(
            "p1",
            json!({"name": "Sparky Bros", "service": "Electrical", "description": "", "rating": 4}),
        )
        .unwrap();
        assert!(provider.matches_search("sparky"));
        assert!(provider.matches_search("ELECTR"));
        assert!(!provider.matches_search("garden"));
    }
}
