use axum::{
    extract::{Query, State},
    response::Html,
};
use exoscope::{FeatureVector, Handoff, prediction::format_confidence};
use serde::Serialize;

use crate::routes::habitability::HandoffQuery;
use crate::{error::AppError, state::AppState, templates};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Serialize)]
struct Row {
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct Section {
    title: &'static str,
    field: &'static str,
    value: String,
    confidence: String,
    rows: Vec<Row>,
}

#[derive(Serialize)]
struct ReportPage {
    sections: [Section; 2],
    explanation: Option<String>,
}

fn rows(vector: Option<&FeatureVector>) -> Vec<Row> {
    vector
        .map(|vector| {
            vector
                .labelled()
                .map(|(descriptor, value)| Row {
                    label: descriptor.report_label,
                    value: value.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn or_not_available(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn sections(handoff: &Handoff) -> [Section; 2] {
    let classification = handoff.classification();
    let habitability = handoff.habitability();
    [
        Section {
            title: "Exoplanet Classification Result",
            field: "Prediction",
            value: or_not_available(classification.map(|r| r.label.clone())),
            confidence: or_not_available(classification.map(|r| format_confidence(r.confidence))),
            rows: rows(handoff.exoplanet_features()),
        },
        Section {
            title: "Habitability Prediction",
            field: "Status",
            value: or_not_available(habitability.map(|r| r.status.clone())),
            confidence: or_not_available(habitability.map(|r| format_confidence(r.confidence))),
            rows: rows(handoff.habitability_features()),
        },
    ]
}

/// Result sections come from the handoff alone; the explanation is asked for
/// once per render and falls back to a notice on failure.
#[tracing::instrument(name = "GET /planet-report", skip(state, query))]
pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<HandoffQuery>,
) -> Result<Html<String>, AppError> {
    let handoff = Handoff::receive(query.state.as_deref());
    let explanation = state.explainer.explain_report(&handoff).await;

    let page = ReportPage {
        sections: sections(&handoff),
        explanation,
    };
    templates::render(&state.templates, "report.html", &page)
}
