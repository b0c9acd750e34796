use exoscope::{EndpointConfig, Exoplanet, ExplanationClient, Habitability, PredictionClient};
use exoscope_types::{Result, minijinja::Environment, reqwest::Client};
use std::sync::Arc;

use crate::templates;

pub type AppState = Arc<State>;

/// Immutable for the lifetime of the process. Page state lives in requests.
pub struct State {
    pub classifier: PredictionClient<Exoplanet>,
    pub assessor: PredictionClient<Habitability>,
    pub explainer: ExplanationClient,
    pub templates: Environment<'static>,
}

impl State {
    pub fn new(endpoints: &EndpointConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            classifier: PredictionClient::with_client(
                client.clone(),
                &endpoints.classification_url,
            ),
            assessor: PredictionClient::with_client(client.clone(), &endpoints.habitability_url),
            explainer: ExplanationClient::with_client(client, &endpoints.explanation_url),
            templates: templates::environment()?,
        })
    }
}
