use exoscope_types::reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::error::ExplanationError;
use crate::features::{EXOPLANET_ARITY, FeatureVector, HABITABILITY_ARITY};
use crate::handoff::Handoff;
use crate::prediction::format_confidence;

/// Shown in place of the explanation when the service fails in any way.
pub const FALLBACK_EXPLANATION: &str = "⚠️ Failed to get an explanation from the explanation service.";

const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize, Debug)]
struct ExplanationRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize, Debug)]
struct ExplanationResponse {
    explanation: String,
}

/// Removes the emphasis markers the language model sprinkles into its text.
pub fn clean_explanation(text: &str) -> String {
    text.replace('*', "")
}

fn append_features(prompt: &mut String, vector: &FeatureVector) {
    for (descriptor, value) in vector.labelled() {
        let _ = writeln!(prompt, "{}: {}", descriptor.report_label, value);
    }
}

/// Builds the prompt for a report, or `None` unless both vectors are present
/// with their full arity.
pub fn compose_prompt(handoff: &Handoff) -> Option<String> {
    let exoplanet = handoff
        .exoplanet_features()
        .filter(|v| v.len() == EXOPLANET_ARITY)?;
    let habitability = handoff
        .habitability_features()
        .filter(|v| v.len() == HABITABILITY_ARITY)?;

    let classification = handoff
        .classification()
        .map(|r| format!("{}, {}", r.label, format_confidence(r.confidence)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let assessment = handoff
        .habitability()
        .map(|r| format!("{}, {}", r.status, format_confidence(r.confidence)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut prompt = String::new();
    prompt.push_str(
        "Summarize the following exoplanet and habitability inputs in a concise manner.\n\n",
    );
    prompt.push_str("Include:\n");
    prompt.push_str("1. Key feature highlights and their meaning.\n");
    let _ = writeln!(
        prompt,
        "2. A short reason for the classification result ({classification})."
    );
    let _ = writeln!(
        prompt,
        "3. A short reason for the habitability status ({assessment})."
    );
    prompt.push_str("4. Two-paragraph summary on potential for life.\n\n");
    prompt.push_str("Exoplanet Features:\n");
    append_features(&mut prompt, exoplanet);
    prompt.push_str("\nHabitability Features:\n");
    append_features(&mut prompt, habitability);

    Some(prompt)
}

/// Client for the natural-language explanation endpoint.
#[derive(Debug, Clone)]
pub struct ExplanationClient {
    client: Client,
    url: String,
}

impl ExplanationClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn explain(&self, message: &str) -> Result<String, ExplanationError> {
        tracing::debug!(url = %self.url, "Requesting explanation");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&ExplanationRequest { message })
            .send()
            .await
            .map_err(|e| ExplanationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExplanationError::Status(status.as_u16()));
        }

        let body: ExplanationResponse = response
            .json()
            .await
            .map_err(|e| ExplanationError::Parse(e.to_string()))?;
        Ok(clean_explanation(&body.explanation))
    }

    /// One explanation for one report render. `None` when the report lacks
    /// the inputs to ask about; any failure becomes the fallback notice.
    pub async fn explain_report(&self, handoff: &Handoff) -> Option<String> {
        let prompt = compose_prompt(handoff)?;
        match self.explain(&prompt).await {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!("Explanation unavailable: {}", err);
                Some(FALLBACK_EXPLANATION.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureKind;
    use crate::intake::parse_vector;
    use crate::prediction::{ClassificationResult, HabitabilityResult};

    fn full_handoff() -> Handoff {
        let exoplanet = parse_vector(
            &(1..=19).map(|v| v.to_string()).collect::<Vec<_>>().join(" "),
            FeatureKind::Exoplanet,
        )
        .unwrap();
        let habitability = parse_vector(
            &(1..=15).map(|v| format!("{v}.5")).collect::<Vec<_>>().join(" "),
            FeatureKind::Habitability,
        )
        .unwrap();
        Handoff::classified(
            exoplanet,
            ClassificationResult {
                label: "confirmed".into(),
                confidence: 0.92,
            },
        )
        .assessed(
            habitability,
            HabitabilityResult {
                status: "habitable".into(),
                confidence: 0.81,
            },
        )
    }

    #[test]
    fn prompt_lists_results_and_every_feature() {
        let prompt = compose_prompt(&full_handoff()).unwrap();
        assert!(prompt.contains("classification result (confirmed, 92.00%)"));
        assert!(prompt.contains("habitability status (habitable, 81.00%)"));
        assert!(prompt.contains("Declination (degrees): 1\n"));
        assert!(prompt.contains("Transit epoch (BKJD): 19\n"));
        assert!(prompt.contains("Planetary zone class (encoded): 1.5\n"));
        assert!(prompt.contains("Star size from planet (deg): 15.5\n"));
        assert_eq!(prompt.lines().filter(|l| l.contains(": ")).count(), 34);
    }

    #[test]
    fn prompt_requires_both_vectors() {
        assert!(compose_prompt(&Handoff::Fresh).is_none());

        let handoff = full_handoff();
        let Handoff::Carried(mut snapshot) = handoff else {
            unreachable!()
        };
        snapshot.habitability_features = None;
        assert!(compose_prompt(&Handoff::Carried(snapshot)).is_none());
    }

    #[test]
    fn missing_results_read_as_not_available() {
        let Handoff::Carried(mut snapshot) = full_handoff() else {
            unreachable!()
        };
        snapshot.classification = None;
        let prompt = compose_prompt(&Handoff::Carried(snapshot)).unwrap();
        assert!(prompt.contains("classification result (N/A)"));
    }

    #[test]
    fn emphasis_markers_are_stripped() {
        assert_eq!(
            clean_explanation("**Bold** claim with *italics*"),
            "Bold claim with italics"
        );
    }
}
