use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Where the three remote services live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointConfig {
    pub classification_url: String,
    pub habitability_url: String,
    pub explanation_url: String,
}

impl EndpointConfig {
    /// Derives all three endpoints from one prediction API base URL.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            classification_url: format!("{}/predict", base),
            habitability_url: format!("{}/habitability-predict", base),
            explanation_url: format!("{}/gemini-explanation", base),
        }
    }

    /// `PREDICTION_API_URL` sets the base; `CLASSIFICATION_URL`,
    /// `HABITABILITY_URL` and `EXPLANATION_URL` override single endpoints.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = lookup("PREDICTION_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let defaults = Self::from_base(&base);
        Self {
            classification_url: lookup("CLASSIFICATION_URL").unwrap_or(defaults.classification_url),
            habitability_url: lookup("HABITABILITY_URL").unwrap_or(defaults.habitability_url),
            explanation_url: lookup("EXPLANATION_URL").unwrap_or(defaults.explanation_url),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = EndpointConfig::from_lookup(|_| None);
        assert_eq!(config.classification_url, "http://localhost:8000/predict");
        assert_eq!(
            config.habitability_url,
            "http://localhost:8000/habitability-predict"
        );
        assert_eq!(
            config.explanation_url,
            "http://localhost:8000/gemini-explanation"
        );
        assert_eq!(config, EndpointConfig::default());
    }

    #[test]
    fn single_endpoint_override_keeps_the_rest() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PREDICTION_API_URL", "https://models.example.org/"),
            ("EXPLANATION_URL", "https://llm.example.org/explain"),
        ]);
        let config = EndpointConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(
            config.classification_url,
            "https://models.example.org/predict"
        );
        assert_eq!(config.explanation_url, "https://llm.example.org/explain");
    }
}
