use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocol::TreatmentPayload;

/// A treatment the backend matched against the user's concern, with every
/// field the prescription card needs already present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    pub treatment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    pub concern: String,
    pub benefit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("treatment payload is missing required field `{0}`")]
pub struct MissingTreatmentField(pub &'static str);

fn required(
    value: Option<String>,
    field: &'static str,
) -> Result<String, MissingTreatmentField> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MissingTreatmentField(field)),
    }
}

impl TryFrom<TreatmentPayload> for TreatmentRecord {
    type Error = MissingTreatmentField;

    fn try_from(value: TreatmentPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            treatment: required(value.treatment, "treatment")?,
            technology: value.technology.filter(|t| !t.trim().is_empty()),
            concern: required(value.concern, "concern")?,
            benefit: required(value.benefit, "benefit")?,
        })
    }
}
