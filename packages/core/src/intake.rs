pub mod controller;
pub mod parser;

pub use controller::{FeatureIntake, IntakeStatus};
pub use parser::{parse_number, parse_vector};
