use axum::{
    extract::{Multipart, State},
    response::Html,
};
use exoscope::{Exoplanet, FeatureIntake, NextStep};

use crate::routes::form::{Action, FormCopy, FormPage, NextView, ResultView, Submission};
use crate::{error::AppError, state::AppState, templates};

const COPY: FormCopy = FormCopy {
    heading: "Exoplanet Detection System",
    lead: "Enter or upload parameters to predict exoplanet classification.",
    action: "/predict",
    submit_label: "Predict",
};

#[tracing::instrument(name = "GET /predict", skip(state))]
pub async fn form(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let intake = FeatureIntake::<Exoplanet>::new();
    templates::render(&state.templates, "form.html", &FormPage::new(&COPY, &intake))
}

#[tracing::instrument(name = "POST /predict", skip(state, multipart))]
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let submission = Submission::read(multipart).await?;
    let mut intake = submission.intake::<Exoplanet>();

    if submission.action == Action::Upload {
        submission.apply_upload(&mut intake);
        return templates::render(&state.templates, "form.html", &FormPage::new(&COPY, &intake));
    }

    let step = match intake.submit(&state.classifier).await {
        Ok(result) => intake
            .submitted()
            .map(|features| NextStep::after_classification(features, &result))
            .unwrap_or(NextStep::Stay),
        Err(err) => {
            tracing::info!("Classification not available: {}", err);
            NextStep::Stay
        }
    };

    let mut page = FormPage::new(&COPY, &intake);
    page.result = intake.outcome().map(|result| ResultView {
        title: "Model Prediction",
        field: "Disposition",
        value: result.display_label(),
        confidence: result.display_confidence(),
        positive: result.is_confirmed(),
    });
    if let Some(handoff) = step.handoff() {
        page.next = Some(NextView {
            href: format!("/habitability?state={}", handoff.encode()?),
            label: "Check Habitability",
        });
    }

    templates::render(&state.templates, "form.html", &page)
}
