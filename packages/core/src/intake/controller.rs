use std::marker::PhantomData;

use crate::error::{FormError, FormatError, ValidationError};
use crate::features::{FeatureKind, FeatureSet, FeatureVector};
use crate::intake::parser::{parse_number, parse_vector};
use crate::prediction::Predict;

/// What the form shows below its fields.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeStatus<T> {
    Editing,
    Rejected(FormError),
    Completed { features: FeatureVector, outcome: T },
}

/// Owns the text slots of one prediction form.
///
/// Slots hold raw text until submission so partially typed numbers such as
/// `-` or `1.` survive editing. The number of slots is fixed by the feature
/// set and never changes.
#[derive(Debug, Clone)]
pub struct FeatureIntake<S: FeatureSet> {
    slots: Vec<String>,
    status: IntakeStatus<S::Outcome>,
    _set: PhantomData<fn() -> S>,
}

impl<S: FeatureSet> Default for FeatureIntake<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FeatureSet> FeatureIntake<S> {
    pub fn new() -> Self {
        Self {
            slots: vec![String::new(); S::KIND.arity()],
            status: IntakeStatus::Editing,
            _set: PhantomData,
        }
    }

    pub fn kind(&self) -> FeatureKind {
        S::KIND
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn status(&self) -> &IntakeStatus<S::Outcome> {
        &self.status
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.status {
            IntakeStatus::Rejected(err) => Some(err.to_string()),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<&S::Outcome> {
        match &self.status {
            IntakeStatus::Completed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// The vector that produced the current outcome.
    pub fn submitted(&self) -> Option<&FeatureVector> {
        match &self.status {
            IntakeStatus::Completed { features, .. } => Some(features),
            _ => None,
        }
    }

    pub fn set_at(&mut self, index: usize, raw: impl Into<String>) -> Result<(), ValidationError> {
        let arity = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ValidationError::OutOfRange { index, arity })?;
        *slot = raw.into();
        Ok(())
    }

    /// Replaces every slot and clears any previous result or error.
    pub fn replace_all(&mut self, vector: &FeatureVector) -> Result<(), FormatError> {
        if vector.kind() != S::KIND || vector.len() != self.slots.len() {
            return Err(FormatError::WrongCount {
                expected: self.slots.len(),
                found: vector.len(),
            });
        }
        self.slots = vector.to_slots();
        self.status = IntakeStatus::Editing;
        Ok(())
    }

    /// Parses uploaded text into the slots. On failure the slots keep their
    /// previous contents and the error becomes the form status.
    pub fn load_file(&mut self, text: &str) -> Result<(), FormatError> {
        let parsed = parse_vector(text, S::KIND).and_then(|vector| self.replace_all(&vector));
        if let Err(err) = &parsed {
            tracing::debug!(kind = ?S::KIND, "Rejected uploaded features: {}", err);
            self.status = IntakeStatus::Rejected(err.clone().into());
        }
        parsed
    }

    /// Empty slots are reported before non-numeric ones.
    pub fn validate(&self) -> Result<FeatureVector, ValidationError> {
        let descriptors = S::KIND.descriptors();

        if let Some(index) = self.slots.iter().position(|raw| raw.trim().is_empty()) {
            return Err(ValidationError::Empty {
                index,
                name: descriptors[index].name,
            });
        }

        let mut values = Vec::with_capacity(self.slots.len());
        for (index, raw) in self.slots.iter().enumerate() {
            match parse_number(raw) {
                Some(value) => values.push(value),
                None => {
                    return Err(ValidationError::NotNumeric {
                        index,
                        name: descriptors[index].name,
                        value: raw.clone(),
                    });
                }
            }
        }

        Ok(FeatureVector::new_unchecked(S::KIND, values))
    }

    /// Clears the previous status, validates, and only then calls the
    /// predictor with the vector captured at this moment.
    pub async fn submit<P>(&mut self, predictor: &P) -> Result<S::Outcome, FormError>
    where
        P: Predict<S> + ?Sized,
    {
        self.status = IntakeStatus::Editing;

        let features = match self.validate() {
            Ok(features) => features,
            Err(err) => {
                self.status = IntakeStatus::Rejected(err.clone().into());
                return Err(err.into());
            }
        };

        match predictor.predict(&features).await {
            Ok(outcome) => {
                self.status = IntakeStatus::Completed {
                    features,
                    outcome: outcome.clone(),
                };
                Ok(outcome)
            }
            Err(err) => {
                self.status = IntakeStatus::Rejected(err.clone().into());
                Err(err.into())
            }
        }
    }
}
