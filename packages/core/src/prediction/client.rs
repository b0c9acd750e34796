use exoscope_types::{async_trait, reqwest::Client};
use std::marker::PhantomData;

use crate::error::RemoteError;
use crate::features::{FeatureSet, FeatureVector};
use crate::prediction::models::{ErrorPayload, PredictRequest};

/// Anything that turns a validated vector into a prediction.
#[async_trait]
pub trait Predict<S: FeatureSet>: Send + Sync {
    async fn predict(&self, features: &FeatureVector) -> Result<S::Outcome, RemoteError>;
}

/// POSTs `{features: [...]}` to one prediction endpoint.
///
/// No timeout, retry or backoff is applied; a call resolves when the
/// endpoint answers or the connection fails.
#[derive(Debug, Clone)]
pub struct PredictionClient<S: FeatureSet> {
    client: Client,
    url: String,
    _set: PhantomData<fn() -> S>,
}

impl<S: FeatureSet> PredictionClient<S> {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            _set: PhantomData,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl<S: FeatureSet> Predict<S> for PredictionClient<S> {
    async fn predict(&self, features: &FeatureVector) -> Result<S::Outcome, RemoteError> {
        debug_assert_eq!(features.kind(), S::KIND);
        tracing::debug!(url = %self.url, kind = ?S::KIND, "Requesting prediction");

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&PredictRequest {
                features: features.values(),
            })
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Prediction request to {} failed: {}", self.url, e);
                RemoteError::transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            response.json::<S::Outcome>().await.map_err(|e| {
                tracing::warn!("Prediction response from {} did not decode: {}", self.url, e);
                RemoteError::decode(e.to_string())
            })
        } else {
            let detail = response
                .json::<ErrorPayload>()
                .await
                .ok()
                .and_then(|payload| payload.detail_text());
            tracing::warn!(
                "Prediction endpoint {} answered {}: {:?}",
                self.url,
                status,
                detail
            );
            Err(RemoteError::status(status.as_u16(), detail))
        }
    }
}
