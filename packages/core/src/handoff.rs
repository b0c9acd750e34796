//! Results carried from one page to the next.
//!
//! A [`Handoff`] is built at the moment of a transition and travels with it as
//! an opaque token (query parameter or hidden form field). Nothing is stored on
//! the server between pages.

use exoscope_types::base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use exoscope_types::json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::HandoffError;
use crate::features::{FeatureKind, FeatureVector};
use crate::prediction::{ClassificationResult, HabitabilityResult};

pub const HANDOFF_VERSION: u32 = 1;

/// Everything accumulated so far. Produced once and never mutated.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
pub struct NavigationSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exoplanet_features: Option<FeatureVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitability_features: Option<FeatureVector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub habitability: Option<HabitabilityResult>,
}

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq, Default)]
#[serde(tag = "kind", content = "snapshot", rename_all = "snake_case")]
pub enum Handoff {
    /// Page was reached directly, or the carried token was unusable
    #[default]
    Fresh,
    Carried(NavigationSnapshot),
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    handoff: Handoff,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl Handoff {
    /// Built by the classification page.
    pub fn classified(features: FeatureVector, result: ClassificationResult) -> Self {
        Handoff::Carried(NavigationSnapshot {
            exoplanet_features: Some(features),
            classification: Some(result),
            ..Default::default()
        })
    }

    /// Built by the habitability page from what it received. Fields it does
    /// not own are forwarded unchanged.
    pub fn assessed(&self, features: FeatureVector, result: HabitabilityResult) -> Self {
        let received = self.snapshot().cloned().unwrap_or_default();
        Handoff::Carried(NavigationSnapshot {
            habitability_features: Some(features),
            habitability: Some(result),
            ..received
        })
    }

    pub fn snapshot(&self) -> Option<&NavigationSnapshot> {
        match self {
            Handoff::Fresh => None,
            Handoff::Carried(snapshot) => Some(snapshot),
        }
    }

    pub fn exoplanet_features(&self) -> Option<&FeatureVector> {
        self.snapshot()?.exoplanet_features.as_ref()
    }

    pub fn habitability_features(&self) -> Option<&FeatureVector> {
        self.snapshot()?.habitability_features.as_ref()
    }

    pub fn classification(&self) -> Option<&ClassificationResult> {
        self.snapshot()?.classification.as_ref()
    }

    pub fn habitability(&self) -> Option<&HabitabilityResult> {
        self.snapshot()?.habitability.as_ref()
    }

    pub fn encode(&self) -> Result<String, HandoffError> {
        let envelope = Envelope {
            version: HANDOFF_VERSION,
            handoff: self.clone(),
        };
        let bytes = json::to_vec(&envelope).map_err(|e| HandoffError::Payload(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn decode(token: &str) -> Result<Self, HandoffError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| HandoffError::Encoding(e.to_string()))?;

        let probe: VersionProbe =
            json::from_slice(&bytes).map_err(|e| HandoffError::Payload(e.to_string()))?;
        if probe.version != HANDOFF_VERSION {
            return Err(HandoffError::UnsupportedVersion {
                found: probe.version,
                expected: HANDOFF_VERSION,
            });
        }

        let envelope: Envelope =
            json::from_slice(&bytes).map_err(|e| HandoffError::Payload(e.to_string()))?;
        envelope.handoff.check_vectors()?;
        Ok(envelope.handoff)
    }

    /// What a destination page works with. A missing or unusable token is
    /// treated as a direct visit.
    pub fn receive(token: Option<&str>) -> Self {
        match token.filter(|t| !t.trim().is_empty()) {
            None => Handoff::Fresh,
            Some(token) => Handoff::decode(token).unwrap_or_else(|err| {
                tracing::warn!("Discarding received handoff: {}", err);
                Handoff::Fresh
            }),
        }
    }

    fn check_vectors(&self) -> Result<(), HandoffError> {
        let checks = [
            (self.exoplanet_features(), FeatureKind::Exoplanet),
            (self.habitability_features(), FeatureKind::Habitability),
        ];
        for (vector, kind) in checks {
            if let Some(vector) = vector
                && (vector.kind() != kind || !vector.is_well_formed())
            {
                return Err(HandoffError::MalformedVector(kind));
            }
        }
        Ok(())
    }
}

/// Where a form page goes after a successful prediction.
#[derive(Debug, Clone, PartialEq)]
pub enum NextStep {
    /// No continuation is offered
    Stay,
    /// A button continues with this handoff
    Offer(Handoff),
    /// The page moves on by itself
    Automatic(Handoff),
}

impl NextStep {
    /// The classification page never moves on by itself and only offers the
    /// habitability check for confirmed planets.
    pub fn after_classification(features: &FeatureVector, result: &ClassificationResult) -> Self {
        if result.is_confirmed() {
            NextStep::Offer(Handoff::classified(features.clone(), result.clone()))
        } else {
            NextStep::Stay
        }
    }

    /// A habitable planet goes straight to the report; anything else offers
    /// the report behind a button.
    pub fn after_assessment(
        received: &Handoff,
        features: &FeatureVector,
        result: &HabitabilityResult,
    ) -> Self {
        let handoff = received.assessed(features.clone(), result.clone());
        if result.is_habitable() {
            NextStep::Automatic(handoff)
        } else {
            NextStep::Offer(handoff)
        }
    }

    pub fn handoff(&self) -> Option<&Handoff> {
        match self {
            NextStep::Stay => None,
            NextStep::Offer(handoff) | NextStep::Automatic(handoff) => Some(handoff),
        }
    }
}
