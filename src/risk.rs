//! Risk scorer
//!
//! Maps (property type, community) to a (likelihood, consequence) pair.
//! Pure function over the immutable dataset: two fixed lookup tables plus
//! the summed crime count for the community.

use crate::dataset::Dataset;

/// Numeric column aggregated per community
pub const CRIME_COLUMN: &str = "Crime Count";

/// Divisor applied to the summed crime count before it boosts likelihood
const CRIME_DIVISOR: f64 = 50.0;

/// Consequence is base severity scaled onto the 0-100 axis
const SEVERITY_FACTOR: f64 = 10.0;

/// Score used for property types outside the table (open enumeration)
pub const DEFAULT_SCORE: u32 = 5;

/// Closed lookup table: (label, severity 1-10, frequency 1-10).
/// Labels not listed here fall back to `DEFAULT_SCORE` for both axes.
const PROPERTY_SCORES: [(&str, u32, u32); 22] = [
    ("Bank", 9, 3),
    ("Grocery Store", 6, 6),
    ("Flower Shop", 2, 1),
    ("Gas Station", 7, 7),
    ("Pharmacy", 8, 5),
    ("Restaurant", 5, 4),
    ("Retail Store", 4, 5),
    ("Convenience Store", 7, 8),
    ("Shopping Mall", 7, 6),
    ("Office Building", 8, 3),
    ("Warehouse", 7, 4),
    ("Factory", 6, 3),
    ("Park", 3, 2),
    ("Parking Lot", 6, 6),
    ("Residential House", 5, 5),
    ("Gym", 3, 3),
    ("Library", 2, 1),
    ("Church", 2, 1),
    ("Bar", 7, 7),
    ("Hotel", 6, 6),
    ("School", 4, 4),
    ("Medical Clinic", 6, 5),
];

/// Property-type labels offered in the risk form
pub fn property_types() -> Vec<&'static str> {
    PROPERTY_SCORES.iter().map(|(label, _, _)| *label).collect()
}

fn base_severity(property_type: &str) -> u32 {
    PROPERTY_SCORES
        .iter()
        .find(|(label, _, _)| *label == property_type)
        .map_or(DEFAULT_SCORE, |(_, severity, _)| *severity)
}

fn base_frequency(property_type: &str) -> u32 {
    PROPERTY_SCORES
        .iter()
        .find(|(label, _, _)| *label == property_type)
        .map_or(DEFAULT_SCORE, |(_, _, frequency)| *frequency)
}

/// Computed risk pair, both axes clamped to [0, 100]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScore {
    pub likelihood: f64,
    pub consequence: f64,
}

/// Score a property type within a community.
///
/// A community absent from the dataset yields (0, 0) - a defined
/// degenerate result, not an error.
pub fn score(dataset: &Dataset, property_type: &str, community: &str) -> RiskScore {
    let severity = base_severity(property_type);
    let frequency = base_frequency(property_type);

    let rows = dataset.rows_for(community);
    if rows.is_empty() {
        return RiskScore {
            likelihood: 0.0,
            consequence: 0.0,
        };
    }

    let total_crime = dataset.column_sum(&rows, CRIME_COLUMN);
    let likelihood = (f64::from(frequency) + total_crime / CRIME_DIVISOR).clamp(0.0, 100.0);
    let consequence = (f64::from(severity) * SEVERITY_FACTOR).min(100.0);

    RiskScore {
        likelihood,
        consequence,
    }
}
