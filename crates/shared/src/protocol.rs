use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub query: String,
}

/// One entry of `related_treatments` as the backend sends it. Every field is
/// nullable on the wire, and a field of any non-string type reads as absent;
/// see [`crate::domain::TreatmentRecord`] for the validated form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentPayload {
    #[serde(default, deserialize_with = "string_or_none")]
    pub treatment: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub technology: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub concern: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub benefit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendation_text: String,
    /// Entries that are not objects decode as an empty payload, so one bad
    /// element never costs the rest of the reply.
    #[serde(default, deserialize_with = "lenient_treatments")]
    pub related_treatments: Vec<TreatmentPayload>,
}

impl RecommendResponse {
    /// Only the first related treatment is ever displayed.
    pub fn first_treatment(&self) -> Option<&TreatmentPayload> {
        self.related_treatments.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

fn lenient_treatments<'de, D>(deserializer: D) -> Result<Vec<TreatmentPayload>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Value> = null_as_default(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| TreatmentPayload::deserialize(entry).unwrap_or_default())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_query_field() {
        let body = serde_json::to_value(RecommendRequest {
            query: "dry scalp".into(),
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({ "query": "dry scalp" }));
    }

    #[test]
    fn missing_or_null_treatments_decode_as_empty() {
        let missing: RecommendResponse =
            serde_json::from_str(r#"{"recommendation_text":"hi"}"#).expect("decode");
        assert!(missing.related_treatments.is_empty());

        let null: RecommendResponse = serde_json::from_str(
            r#"{"recommendation_text":null,"related_treatments":null}"#,
        )
        .expect("decode");
        assert_eq!(null.recommendation_text, "");
        assert!(null.first_treatment().is_none());
    }

    #[test]
    fn decodes_treatment_without_technology() {
        let decoded: RecommendResponse = serde_json::from_str(
            r#"{
                "recommendation_text": "Here's a plan",
                "related_treatments": [
                    {"treatment": "PRP Therapy", "concern": "Thinning", "benefit": "Regrowth"},
                    {"treatment": "GFC", "concern": "Thinning", "benefit": "Density"}
                ]
            }"#,
        )
        .expect("decode");
        let first = decoded.first_treatment().expect("first treatment");
        assert_eq!(first.treatment.as_deref(), Some("PRP Therapy"));
        assert_eq!(first.technology, None);
    }

    #[test]
    fn malformed_entries_do_not_fail_the_response() {
        let decoded: RecommendResponse = serde_json::from_str(
            r#"{
                "recommendation_text": "Here's a plan",
                "related_treatments": [
                    {"treatment": "PRP Therapy", "concern": "Thinning", "benefit": "Regrowth"},
                    null,
                    42
                ]
            }"#,
        )
        .expect("decode");
        assert_eq!(decoded.related_treatments.len(), 3);
        assert_eq!(
            decoded.first_treatment().and_then(|t| t.treatment.as_deref()),
            Some("PRP Therapy")
        );
        assert_eq!(decoded.related_treatments[1], TreatmentPayload::default());
    }

    #[test]
    fn wrong_typed_fields_read_as_absent() {
        let decoded: RecommendResponse = serde_json::from_str(
            r#"{
                "recommendation_text": "Book a consultation",
                "related_treatments": [
                    {"treatment": "Laser", "technology": ["CO2"], "concern": 5, "benefit": "Even tone"}
                ]
            }"#,
        )
        .expect("decode");
        let first = decoded.first_treatment().expect("first treatment");
        assert_eq!(first.treatment.as_deref(), Some("Laser"));
        assert_eq!(first.technology, None);
        assert_eq!(first.concern, None);
        assert_eq!(first.benefit.as_deref(), Some("Even tone"));
    }
}
