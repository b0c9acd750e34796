use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;

use crate::prediction::models::{ClassificationResult, HabitabilityResult};

pub const EXOPLANET_ARITY: usize = 19;
pub const HABITABILITY_ARITY: usize = 15;

/// One input of a prediction form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDescriptor {
    /// Column name the model was trained on
    pub name: &'static str,
    /// Help text shown next to the form field
    pub description: &'static str,
    /// Label used in the report tables and the explanation prompt
    pub report_label: &'static str,
}

const fn feature(
    name: &'static str,
    description: &'static str,
    report_label: &'static str,
) -> FeatureDescriptor {
    FeatureDescriptor {
        name,
        description,
        report_label,
    }
}

pub static EXOPLANET_FEATURES: [FeatureDescriptor; EXOPLANET_ARITY] = [
    feature("dec", "Declination (degrees)", "Declination (degrees)"),
    feature("ra", "Right ascension (degrees)", "Right ascension (degrees)"),
    feature("koi_depth", "Transit depth (ppm)", "Transit depth (ppm)"),
    feature("koi_duration", "Transit duration (hours)", "Transit duration (hours)"),
    feature("koi_fpflag_co", "Centroid offset flag (0/1)", "Centroid offset flag (0/1)"),
    feature(
        "koi_fpflag_ec",
        "Ephemeris match indicates contamination flag (0/1)",
        "Ephemeris match contamination flag (0/1)",
    ),
    feature("koi_fpflag_nt", "Non-transit-like flag (0/1)", "Non-transit-like flag (0/1)"),
    feature("koi_fpflag_ss", "Stellar eclipse flag (0/1)", "Stellar eclipse flag (0/1)"),
    feature("koi_impact", "Impact parameter", "Impact parameter"),
    feature("koi_insol", "Insolation flux (Earth flux)", "Insolation flux (Earth flux)"),
    feature("koi_kepmag", "Kepler-band magnitude", "Kepler-band magnitude"),
    feature(
        "koi_model_snr",
        "Signal-to-noise ratio of transit model",
        "Transit model SNR",
    ),
    feature("koi_period", "Orbital period (days)", "Orbital period (days)"),
    feature("koi_prad", "Planetary radius (Earth radii)", "Planet radius (Earth radii)"),
    feature(
        "koi_slogg",
        "Stellar surface gravity (log10(cm/s²))",
        "Stellar surface gravity",
    ),
    feature("koi_srad", "Stellar radius (Solar radii)", "Stellar radius (Solar radii)"),
    feature(
        "koi_steff",
        "Stellar effective temperature (K)",
        "Stellar effective temperature (K)",
    ),
    feature("koi_teq", "Equilibrium temperature (K)", "Equilibrium temperature (K)"),
    feature(
        "koi_time0bk",
        "Transit epoch (Barycentric Kepler Julian Day)",
        "Transit epoch (BKJD)",
    ),
];

pub static HABITABILITY_FEATURES: [FeatureDescriptor; HABITABILITY_ARITY] = [
    feature(
        "P. Zone Class",
        "Planetary zone classification (coded numerically)",
        "Planetary zone class (encoded)",
    ),
    feature("P. Mag", "Apparent magnitude of the planet", "Planet magnitude"),
    feature(
        "P. Radius (EU)",
        "Planetary radius in Earth units",
        "Planet radius (Earth units)",
    ),
    feature(
        "S. No. Planets HZ",
        "Number of planets in the star's habitable zone",
        "No. of planets in habitable zone",
    ),
    feature(
        "P. Sem Major Axis (AU)",
        "Semi-major axis of the planet's orbit (in AU)",
        "Semi-major axis (AU)",
    ),
    feature(
        "P. Teq Min (K)",
        "Minimum equilibrium temperature of the planet (Kelvin)",
        "Min equilibrium temperature (K)",
    ),
    feature(
        "P. SFlux Max (EU)",
        "Maximum stellar flux received by planet (in Earth units)",
        "Max stellar flux (EU)",
    ),
    feature(
        "P. SFlux Min (EU)",
        "Minimum stellar flux received (in Earth units)",
        "Min stellar flux (EU)",
    ),
    feature(
        "S. Mag from Planet",
        "Apparent magnitude of the star as seen from the planet",
        "Star magnitude from planet",
    ),
    feature(
        "P. SFlux Mean (EU)",
        "Mean stellar flux received (in Earth units)",
        "Mean stellar flux (EU)",
    ),
    feature("P. Mass (EU)", "Planetary mass in Earth units", "Planet mass (Earth units)"),
    feature("S. Mass (SU)", "Stellar mass in Solar units", "Star mass (Solar units)"),
    feature(
        "P. Period (days)",
        "Orbital period of the planet (in days)",
        "Planet period (days)",
    ),
    feature(
        "S. Luminosity (SU)",
        "Stellar luminosity in Solar units",
        "Star luminosity (SU)",
    ),
    feature(
        "S. Size from Planet (deg)",
        "Star's angular size from the planet (in degrees)",
        "Star size from planet (deg)",
    ),
];

#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Exoplanet,
    Habitability,
}

impl FeatureKind {
    pub const fn arity(self) -> usize {
        match self {
            FeatureKind::Exoplanet => EXOPLANET_ARITY,
            FeatureKind::Habitability => HABITABILITY_ARITY,
        }
    }

    pub fn descriptors(self) -> &'static [FeatureDescriptor] {
        match self {
            FeatureKind::Exoplanet => &EXOPLANET_FEATURES,
            FeatureKind::Habitability => &HABITABILITY_FEATURES,
        }
    }

    pub fn descriptor(self, index: usize) -> Option<&'static FeatureDescriptor> {
        self.descriptors().get(index)
    }
}

/// Binds a feature kind to the result type its endpoint answers with.
pub trait FeatureSet: Send + Sync + 'static {
    const KIND: FeatureKind;
    type Outcome: Serialize + DeserializeOwned + Clone + Debug + Send + Sync;
}

#[derive(Debug, Clone, Copy)]
pub struct Exoplanet;

#[derive(Debug, Clone, Copy)]
pub struct Habitability;

impl FeatureSet for Exoplanet {
    const KIND: FeatureKind = FeatureKind::Exoplanet;
    type Outcome = ClassificationResult;
}

impl FeatureSet for Habitability {
    const KIND: FeatureKind = FeatureKind::Habitability;
    type Outcome = HabitabilityResult;
}

/// A validated, fixed-arity vector of finite numbers.
///
/// Built by the parser and the intake controller. Vectors carried in a
/// handoff are re-checked with [`FeatureVector::is_well_formed`] on decode.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct FeatureVector {
    kind: FeatureKind,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn new_unchecked(kind: FeatureKind, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), kind.arity());
        Self { kind, values }
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Arity and finiteness hold. Used after deserializing a carried vector.
    pub fn is_well_formed(&self) -> bool {
        self.values.len() == self.kind.arity() && self.values.iter().all(|v| v.is_finite())
    }

    /// Values paired with their descriptors, in form order.
    pub fn labelled(&self) -> impl Iterator<Item = (&'static FeatureDescriptor, f64)> + '_ {
        self.kind
            .descriptors()
            .iter()
            .zip(self.values.iter().copied())
    }

    /// Values rendered back into form text.
    pub fn to_slots(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_matches_descriptor_tables() {
        assert_eq!(FeatureKind::Exoplanet.descriptors().len(), 19);
        assert_eq!(FeatureKind::Habitability.descriptors().len(), 15);
        assert_eq!(FeatureKind::Exoplanet.arity(), 19);
        assert_eq!(FeatureKind::Habitability.arity(), 15);
    }

    #[test]
    fn descriptor_order_follows_the_model_columns() {
        let names: Vec<_> = EXOPLANET_FEATURES.iter().map(|d| d.name).collect();
        assert_eq!(names.first(), Some(&"dec"));
        assert_eq!(names.get(4), Some(&"koi_fpflag_co"));
        assert_eq!(names.last(), Some(&"koi_time0bk"));
        assert_eq!(
            FeatureKind::Habitability.descriptor(14).map(|d| d.report_label),
            Some("Star size from planet (deg)")
        );
        assert!(FeatureKind::Habitability.descriptor(15).is_none());
    }

    #[test]
    fn slots_render_whole_numbers_without_fraction() {
        let vector = FeatureVector::new_unchecked(
            FeatureKind::Habitability,
            (1..=15).map(|v| v as f64).collect(),
        );
        let slots = vector.to_slots();
        assert_eq!(slots[0], "1");
        assert_eq!(slots[14], "15");
        assert!(vector.is_well_formed());
    }

    #[test]
    fn deserialized_vector_with_wrong_arity_is_not_well_formed() {
        let vector: FeatureVector =
            exoscope_types::json::from_str(r#"{"kind":"exoplanet","values":[1.0,2.0]}"#)
                .unwrap();
        assert!(!vector.is_well_formed());
    }
}
