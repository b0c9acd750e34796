use exoscope_types::Value;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const CONFIRMED_LABEL: &str = "confirmed";
pub const HABITABLE_STATUS: &str = "habitable";

/// Renders a `[0, 1]` confidence as a percentage with two decimals.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Disposition, e.g. `confirmed`, `candidate`, `false positive`
    pub label: String,
    pub confidence: f64,
}

impl ClassificationResult {
    pub fn is_confirmed(&self) -> bool {
        self.label == CONFIRMED_LABEL
    }

    pub fn display_label(&self) -> String {
        self.label.to_uppercase()
    }

    pub fn display_confidence(&self) -> String {
        format_confidence(self.confidence)
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct HabitabilityResult {
    /// e.g. `habitable`, `not habitable`
    pub status: String,
    pub confidence: f64,
}

impl HabitabilityResult {
    pub fn is_habitable(&self) -> bool {
        self.status == HABITABLE_STATUS
    }

    pub fn display_status(&self) -> String {
        self.status.to_uppercase()
    }

    pub fn display_confidence(&self) -> String {
        format_confidence(self.confidence)
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct PredictRequest<'a> {
    pub features: &'a [f64],
}

/// Body of a non-success answer. FastAPI puts a string here for handled
/// errors and a list for request validation failures.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorPayload {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorPayload {
    pub fn detail_text(&self) -> Option<String> {
        self.detail.as_str().map(str::to_owned)
    }
}
