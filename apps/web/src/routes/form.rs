//! Pieces shared by the two prediction forms.

use axum::extract::Multipart;
use exoscope::{FeatureIntake, FeatureSet};
use serde::Serialize;

use crate::error::AppError;

/// Which button submitted the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    Upload,
    #[default]
    Predict,
}

/// A decoded multipart form post.
#[derive(Debug, Default)]
pub struct Submission {
    pub slots: Vec<(usize, String)>,
    pub file: Option<String>,
    pub action: Action,
    pub state: Option<String>,
}

impl Submission {
    /// Fields are `f{index}` for slots plus `file`, `action` and `state`.
    /// Unknown fields are skipped.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = Submission::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => submission.file = Some(field.text().await?),
                "state" => submission.state = Some(field.text().await?),
                "action" => {
                    submission.action = match field.text().await?.as_str() {
                        "upload" => Action::Upload,
                        _ => Action::Predict,
                    }
                }
                other => match other.strip_prefix('f').and_then(|i| i.parse().ok()) {
                    Some(index) => submission.slots.push((index, field.text().await?)),
                    None => tracing::debug!("Ignoring form field {}", other),
                },
            }
        }

        Ok(submission)
    }

    /// Copies the posted slot text into a fresh intake.
    pub fn intake<S: FeatureSet>(&self) -> FeatureIntake<S> {
        let mut intake = FeatureIntake::<S>::new();
        for (index, raw) in &self.slots {
            if let Err(err) = intake.set_at(*index, raw.as_str()) {
                tracing::debug!("Dropping posted slot: {}", err);
            }
        }
        intake
    }

    /// Runs the upload on `intake`. The outcome is recorded in its status.
    pub fn apply_upload<S: FeatureSet>(&self, intake: &mut FeatureIntake<S>) {
        let text = self.file.as_deref().unwrap_or_default();
        if intake.load_file(text).is_ok() {
            tracing::debug!(kind = ?intake.kind(), "Loaded features from file");
        }
    }
}

/// Fixed wording of one form page.
pub struct FormCopy {
    pub heading: &'static str,
    pub lead: &'static str,
    pub action: &'static str,
    pub submit_label: &'static str,
}

#[derive(Serialize)]
pub struct FieldView {
    index: usize,
    name: &'static str,
    description: &'static str,
    value: String,
}

#[derive(Serialize)]
pub struct ResultView {
    pub title: &'static str,
    pub field: &'static str,
    pub value: String,
    pub confidence: String,
    pub positive: bool,
}

#[derive(Serialize)]
pub struct NextView {
    pub href: String,
    pub label: &'static str,
}

#[derive(Serialize)]
pub struct FormPage {
    heading: &'static str,
    lead: &'static str,
    action: &'static str,
    submit_label: &'static str,
    state: Option<String>,
    fields: Vec<FieldView>,
    error: Option<String>,
    pub result: Option<ResultView>,
    pub next: Option<NextView>,
}

impl FormPage {
    /// Renders the slots and any error of `intake`. Results and the
    /// continuation are filled in by the page.
    pub fn new<S: FeatureSet>(copy: &FormCopy, intake: &FeatureIntake<S>) -> Self {
        let fields = intake
            .kind()
            .descriptors()
            .iter()
            .zip(intake.slots())
            .enumerate()
            .map(|(index, (descriptor, value))| FieldView {
                index,
                name: descriptor.name,
                description: descriptor.description,
                value: value.clone(),
            })
            .collect();

        Self {
            heading: copy.heading,
            lead: copy.lead,
            action: copy.action,
            submit_label: copy.submit_label,
            state: None,
            fields,
            error: intake.error_message(),
            result: None,
            next: None,
        }
    }

    /// Token posted back with the form so the handoff survives a round trip.
    pub fn carrying(mut self, state: Option<String>) -> Self {
        self.state = state;
        self
    }
}
