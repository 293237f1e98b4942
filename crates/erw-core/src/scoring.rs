//! ERW viability scoring
//!
//! Converts one plot's soil chemistry plus a climate context into a 0-100
//! viability score built from five independent sub-scores:
//!
//! - pH (max 30): acidic soils dissolve basalt faster, so lower pH scores
//!   higher
//! - organic matter (max 20): organic acids and microbial respiration
//!   enhance weathering
//! - magnesium deficit (max 15): deficient soils give farmers an agronomic
//!   reason to apply basalt
//! - CEC (max 10): higher exchange capacity retains released cations
//! - climate (max 25): rainfall plus temperature components
//!
//! Each sub-score is a discrete step function over ordered bands rather than
//! a continuous curve. The bands deliberately flatten the underlying
//! kinetics into a rubric that is comparable across plots.

use crate::climate::ClimateContext;
use crate::errors::ErwResult;
use crate::soil::SoilPlot;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum attainable pH sub-score.
pub const PH_SCORE_MAX: f64 = 30.0;
/// Maximum attainable organic-matter sub-score.
pub const OM_SCORE_MAX: f64 = 20.0;
/// Maximum attainable magnesium-deficit sub-score.
pub const MG_DEFICIT_SCORE_MAX: f64 = 15.0;
/// Maximum attainable CEC sub-score.
pub const CEC_SCORE_MAX: f64 = 10.0;
/// Maximum attainable climate sub-score.
pub const CLIMATE_SCORE_MAX: f64 = 25.0;

/// `(upper bound, score)` bands for pH, most acidic first.
const PH_BANDS: &[(f64, f64)] = &[
    (5.2, 30.0),
    (5.5, 29.0),
    (5.8, 27.0),
    (6.0, 25.0),
    (6.5, 20.0),
    (7.0, 15.0),
];
const PH_FLOOR: f64 = 5.0;

/// `(lower bound, score)` bands for organic matter (%), richest first.
const OM_BANDS: &[(f64, f64)] = &[
    (12.0, 20.0),
    (10.0, 18.0),
    (8.0, 15.0),
    (6.0, 12.0),
    (4.0, 8.0),
];
const OM_FLOOR: f64 = 3.0;

/// `(lower bound, score)` bands for Mg deficit (cmol/kg), largest first.
const MG_DEFICIT_BANDS: &[(f64, f64)] = &[
    (1.5, 15.0),
    (1.2, 13.0),
    (1.0, 11.0),
    (0.8, 9.0),
    (0.5, 6.0),
];
const MG_DEFICIT_FLOOR: f64 = 2.0;

/// `(lower bound, score)` bands for CEC (cmol/kg), highest first.
const CEC_BANDS: &[(f64, f64)] = &[(20.0, 10.0), (15.0, 9.0), (10.0, 8.0), (8.0, 6.0)];
const CEC_FLOOR: f64 = 3.0;

/// `(lower bound, score)` bands for annual rainfall (mm), wettest first.
const RAINFALL_BANDS: &[(f64, f64)] = &[(1500.0, 15.0), (1000.0, 12.0), (750.0, 9.0)];
const RAINFALL_FLOOR: f64 = 5.0;

/// First band whose upper bound the value does not exceed wins; values above
/// every bound take `floor`.
fn score_by_upper_bound(value: f64, bands: &[(f64, f64)], floor: f64) -> f64 {
    for &(bound, score) in bands {
        if value <= bound {
            return score;
        }
    }
    floor
}

/// First band whose lower bound the value meets or exceeds wins; values below
/// every bound take `floor`.
fn score_by_lower_bound(value: f64, bands: &[(f64, f64)], floor: f64) -> f64 {
    for &(bound, score) in bands {
        if value >= bound {
            return score;
        }
    }
    floor
}

/// pH sub-score (0-30), non-increasing in pH.
pub fn ph_score(ph: f64) -> f64 {
    score_by_upper_bound(ph, PH_BANDS, PH_FLOOR)
}

/// Organic-matter sub-score (0-20), non-decreasing in OM%.
pub fn organic_matter_score(om_percent: f64) -> f64 {
    score_by_lower_bound(om_percent, OM_BANDS, OM_FLOOR)
}

/// Magnesium-deficit sub-score (0-15), non-decreasing in the deficit.
pub fn mg_deficit_score(deficit: f64) -> f64 {
    score_by_lower_bound(deficit, MG_DEFICIT_BANDS, MG_DEFICIT_FLOOR)
}

/// CEC sub-score (0-10), non-decreasing in CEC.
pub fn cec_score(cec: f64) -> f64 {
    score_by_lower_bound(cec, CEC_BANDS, CEC_FLOOR)
}

/// Rainfall component of the climate sub-score (0-15).
pub fn rainfall_score(annual_rainfall_mm: f64) -> f64 {
    score_by_lower_bound(annual_rainfall_mm, RAINFALL_BANDS, RAINFALL_FLOOR)
}

/// Temperature component of the climate sub-score (0-10).
///
/// The 15-20 °C optimum balances dissolution kinetics against
/// evapotranspiration losses.
pub fn temperature_score(mean_temperature_c: f64) -> f64 {
    if (15.0..=20.0).contains(&mean_temperature_c) {
        10.0
    } else if (12.0..=23.0).contains(&mean_temperature_c) {
        8.0
    } else {
        5.0
    }
}

/// Climate sub-score (0-25): rainfall plus temperature components.
pub fn climate_score(climate: &ClimateContext) -> f64 {
    rainfall_score(climate.annual_rainfall_mm) + temperature_score(climate.mean_temperature_c)
}

/// Qualitative tier for a total viability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Exceptional,
    Excellent,
    VeryGood,
    Good,
    Moderate,
    Marginal,
}

impl Rating {
    /// Tier for a total score (≥90 exceptional down to <50 marginal).
    pub fn from_total(total: f64) -> Self {
        if total >= 90.0 {
            Rating::Exceptional
        } else if total >= 80.0 {
            Rating::Excellent
        } else if total >= 70.0 {
            Rating::VeryGood
        } else if total >= 60.0 {
            Rating::Good
        } else if total >= 50.0 {
            Rating::Moderate
        } else {
            Rating::Marginal
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Exceptional => "exceptional",
            Rating::Excellent => "excellent",
            Rating::VeryGood => "very good",
            Rating::Good => "good",
            Rating::Moderate => "moderate",
            Rating::Marginal => "marginal",
        };
        f.write_str(label)
    }
}

/// Five named sub-scores for one (plot, climate) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViabilityScore {
    /// pH sub-score (0-30)
    pub ph: f64,
    /// Organic-matter sub-score (0-20)
    pub organic_matter: f64,
    /// Magnesium-deficit sub-score (0-15)
    pub mg_deficit: f64,
    /// CEC sub-score (0-10)
    pub cec: f64,
    /// Climate sub-score (0-25)
    pub climate: f64,
}

impl ViabilityScore {
    /// Sum of the five sub-scores (at most 100).
    pub fn total(&self) -> f64 {
        self.ph + self.organic_matter + self.mg_deficit + self.cec + self.climate
    }

    /// Qualitative tier for the total.
    pub fn rating(&self) -> Rating {
        Rating::from_total(self.total())
    }
}

/// Score one plot against a climate context.
///
/// Both inputs are validated; an invalid plot yields an error rather than a
/// nonsense score, so callers surveying many plots can skip it and continue.
pub fn score(plot: &SoilPlot, climate: &ClimateContext) -> ErwResult<ViabilityScore> {
    plot.validate()?;
    climate.validate()?;
    Ok(ViabilityScore {
        ph: ph_score(plot.ph),
        organic_matter: organic_matter_score(plot.organic_matter),
        mg_deficit: mg_deficit_score(plot.mg_deficit()),
        cec: cec_score(plot.cec),
        climate: climate_score(climate),
    })
}
