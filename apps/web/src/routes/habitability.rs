use axum::{
    extract::{Multipart, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use exoscope::{FeatureIntake, Habitability, Handoff, NextStep};
use serde::Deserialize;

use crate::routes::form::{Action, FormCopy, FormPage, NextView, ResultView, Submission};
use crate::{error::AppError, state::AppState, templates};

const COPY: FormCopy = FormCopy {
    heading: "Habitability Prediction Form",
    lead: "Provide planetary and stellar data to estimate habitability potential.",
    action: "/habitability",
    submit_label: "Evaluate Habitability",
};

#[derive(Deserialize, Debug, Default)]
pub struct HandoffQuery {
    pub state: Option<String>,
}

/// Token to post back with the form. A direct visit carries nothing.
fn carried_token(received: &Handoff) -> Result<Option<String>, AppError> {
    match received {
        Handoff::Fresh => Ok(None),
        Handoff::Carried(_) => Ok(Some(received.encode()?)),
    }
}

#[tracing::instrument(name = "GET /habitability", skip(state, query))]
pub async fn form(
    State(state): State<AppState>,
    Query(query): Query<HandoffQuery>,
) -> Result<Html<String>, AppError> {
    let received = Handoff::receive(query.state.as_deref());
    let intake = FeatureIntake::<Habitability>::new();
    let page = FormPage::new(&COPY, &intake).carrying(carried_token(&received)?);
    templates::render(&state.templates, "form.html", &page)
}

#[tracing::instrument(name = "POST /habitability", skip(state, multipart))]
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = Submission::read(multipart).await?;
    let received = Handoff::receive(submission.state.as_deref());
    let carried = carried_token(&received)?;
    let mut intake = submission.intake::<Habitability>();

    if submission.action == Action::Upload {
        submission.apply_upload(&mut intake);
        let page = FormPage::new(&COPY, &intake).carrying(carried);
        return Ok(templates::render(&state.templates, "form.html", &page)?.into_response());
    }

    let step = match intake.submit(&state.assessor).await {
        Ok(result) => intake
            .submitted()
            .map(|features| NextStep::after_assessment(&received, features, &result))
            .unwrap_or(NextStep::Stay),
        Err(err) => {
            tracing::info!("Habitability not available: {}", err);
            NextStep::Stay
        }
    };

    if let NextStep::Automatic(handoff) = &step {
        let location = format!("/planet-report?state={}", handoff.encode()?);
        return Ok(Redirect::to(&location).into_response());
    }

    let mut page = FormPage::new(&COPY, &intake).carrying(carried);
    page.result = intake.outcome().map(|result| ResultView {
        title: "Habitability Assessment",
        field: "Status",
        value: result.display_status(),
        confidence: result.display_confidence(),
        positive: result.is_habitable(),
    });
    if let NextStep::Offer(handoff) = &step {
        page.next = Some(NextView {
            href: format!("/planet-report?state={}", handoff.encode()?),
            label: "Generate Full Report",
        });
    }

    Ok(templates::render(&state.templates, "form.html", &page)?.into_response())
}
