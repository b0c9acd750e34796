//! Prediction and explanation clients against stub services.
//!
//! Each test spawns an axum server on an ephemeral port that answers the way
//! the real model backend does, and records every request body it receives.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use exoscope::exoscope_types::{Value, json, json::json};
use exoscope::{
    Exoplanet, ExplanationClient, FALLBACK_EXPLANATION, FeatureIntake, FeatureKind, FormError,
    Habitability, Handoff, Predict, PredictionClient, RemoteErrorKind, intake::parse_vector,
};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<Value>>>,
}

async fn answer(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.seen.lock().unwrap().push(body);
    (
        stub.status,
        [("content-type", "application/json")],
        stub.body.clone(),
    )
        .into_response()
}

/// Spawns a stub that answers every POST with `status` and `body`.
async fn spawn_stub(status: StatusCode, body: &str) -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        body: body.to_string(),
        seen: seen.clone(),
    };
    let app = Router::new().route("/", post(answer)).with_state(stub);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/", addr), seen)
}

/// An address nothing listens on.
async fn closed_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

fn sequence(n: usize) -> String {
    (1..=n).map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

fn full_handoff() -> Handoff {
    let exoplanet = parse_vector(&sequence(19), FeatureKind::Exoplanet).unwrap();
    let habitability = parse_vector(&sequence(15), FeatureKind::Habitability).unwrap();
    Handoff::classified(
        exoplanet,
        exoscope::ClassificationResult {
            label: "confirmed".into(),
            confidence: 0.92,
        },
    )
    .assessed(
        habitability,
        exoscope::HabitabilityResult {
            status: "habitable".into(),
            confidence: 0.81,
        },
    )
}

#[tokio::test]
async fn classification_posts_feature_array() {
    let (url, seen) = spawn_stub(
        StatusCode::OK,
        r#"{"prediction":"CONFIRMED","label":"confirmed","confidence":0.92}"#,
    )
    .await;
    let client = PredictionClient::<Exoplanet>::new(url);
    let features = parse_vector(&sequence(19), FeatureKind::Exoplanet).unwrap();

    let result = client.predict(&features).await.unwrap();
    assert_eq!(result.label, "confirmed");
    assert_eq!(result.display_confidence(), "92.00%");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let sent: Vec<f64> = json::from_value(seen[0]["features"].clone()).unwrap();
    assert_eq!(sent, (1..=19).map(|v| v as f64).collect::<Vec<_>>());
    assert_eq!(seen[0].as_object().map(|o| o.len()), Some(1));
}

#[tokio::test]
async fn resubmission_sends_identical_body() {
    let (url, seen) = spawn_stub(
        StatusCode::OK,
        r#"{"status":"not habitable","confidence":0.3}"#,
    )
    .await;
    let client = PredictionClient::<Habitability>::new(url);
    let mut intake = FeatureIntake::<Habitability>::new();
    intake.load_file(&sequence(15)).unwrap();

    intake.submit(&client).await.unwrap();
    intake.submit(&client).await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
}

#[tokio::test]
async fn server_detail_is_surfaced() {
    let (url, _) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"detail":"Exactly 19 features are required."}"#,
    )
    .await;
    let client = PredictionClient::<Exoplanet>::new(url);
    let features = parse_vector(&sequence(19), FeatureKind::Exoplanet).unwrap();

    let err = client.predict(&features).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Status(500));
    assert_eq!(err.detail, "Exactly 19 features are required.");
}

#[tokio::test]
async fn unreadable_error_body_is_generic() {
    let (url, _) = spawn_stub(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;
    let client = PredictionClient::<Habitability>::new(url);
    let features = parse_vector(&sequence(15), FeatureKind::Habitability).unwrap();

    let err = client.predict(&features).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Status(502));
    assert_eq!(err.to_string(), "Prediction failed");
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let (url, _) = spawn_stub(StatusCode::OK, r#"{"unexpected":true}"#).await;
    let client = PredictionClient::<Exoplanet>::new(url);
    let features = parse_vector(&sequence(19), FeatureKind::Exoplanet).unwrap();

    let err = client.predict(&features).await.unwrap_err();
    assert_eq!(err.kind, RemoteErrorKind::Decode);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let client = PredictionClient::<Exoplanet>::new(closed_url().await);
    let mut intake = FeatureIntake::<Exoplanet>::new();
    intake.load_file(&sequence(19)).unwrap();

    let err = intake.submit(&client).await.unwrap_err();
    match err {
        FormError::Remote(remote) => {
            assert_eq!(remote.kind, RemoteErrorKind::Transport);
            assert!(!remote.detail.is_empty());
        }
        other => panic!("expected a remote error, got {other:?}"),
    }
    assert!(intake.error_message().is_some());
}

#[tokio::test]
async fn explanation_prompt_is_posted_and_markers_stripped() {
    let (url, seen) = spawn_stub(
        StatusCode::OK,
        &json!({"explanation": "**Kepler-22b** is *likely* temperate."}).to_string(),
    )
    .await;
    let client = ExplanationClient::new(url);

    let text = client.explain_report(&full_handoff()).await.unwrap();
    assert_eq!(text, "Kepler-22b is likely temperate.");

    let seen = seen.lock().unwrap();
    let message = seen[0]["message"].as_str().unwrap();
    assert!(message.contains("Exoplanet Features:"));
    assert!(message.contains("Habitability Features:"));
}

#[tokio::test]
async fn explanation_failures_fall_back() {
    let (error_url, _) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"detail":"Gemini Error: quota"}"#,
    )
    .await;
    let (malformed_url, _) = spawn_stub(StatusCode::OK, r#"{"text":"wrong field"}"#).await;
    let closed = closed_url().await;

    for url in [error_url, malformed_url, closed] {
        let client = ExplanationClient::new(url);
        assert_eq!(
            client.explain_report(&full_handoff()).await.as_deref(),
            Some(FALLBACK_EXPLANATION)
        );
    }
}

#[tokio::test]
async fn incomplete_report_does_not_call_the_service() {
    let (url, seen) = spawn_stub(StatusCode::OK, r#"{"explanation":"x"}"#).await;
    let client = ExplanationClient::new(url);

    assert_eq!(client.explain_report(&Handoff::Fresh).await, None);
    assert!(seen.lock().unwrap().is_empty());
}
