pub mod client;
pub mod models;

pub use client::{Predict, PredictionClient};
pub use models::{ClassificationResult, HabitabilityResult, format_confidence};
