//! Feature intake, prediction calls and page-to-page handoff for the exoscope
//! planet workflow.
//!
//! A classification form collects 19 transit features, a habitability form
//! collects 15 planetary features, and a report combines both results with a
//! generated explanation.

pub mod config;
pub mod error;
pub mod explain;
pub mod features;
pub mod handoff;
pub mod intake;
pub mod prediction;

pub use exoscope_types;

pub use config::EndpointConfig;
pub use error::{
    ExplanationError, FormError, FormatError, HandoffError, RemoteError, RemoteErrorKind,
    ValidationError,
};
pub use explain::{ExplanationClient, FALLBACK_EXPLANATION};
pub use features::{Exoplanet, FeatureKind, FeatureSet, FeatureVector, Habitability};
pub use handoff::{Handoff, NavigationSnapshot, NextStep};
pub use intake::{FeatureIntake, IntakeStatus};
pub use prediction::{ClassificationResult, HabitabilityResult, Predict, PredictionClient};
