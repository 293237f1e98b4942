//! Soil chemistry value objects
//!
//! A [`SoilPlot`] holds one agricultural plot's lab measurements. Plots are
//! plain records with public fields; model entry points call
//! [`SoilPlot::validate`] before using one, so invalid measurements are
//! rejected rather than silently clamped.

use crate::errors::{ErwError, ErwResult};
use serde::{Deserialize, Serialize};

/// Lower edge of the agronomic optimum for exchangeable magnesium (cmol/kg).
///
/// Plots below this level have a magnesium deficit that crushed basalt can
/// supply, which is what makes them attractive ERW candidates.
pub const MG_OPTIMAL_MIN: f64 = 1.5;

/// Soil analysis results for a single agricultural plot.
///
/// Concentration fields must be non-negative, CEC and area strictly
/// positive. A plot is immutable for the duration of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilPlot {
    /// Plot label, e.g. a farmer/parcel identifier
    pub plot_id: String,
    /// Soil pH (unitless, typically 3-9 for agricultural soils)
    pub ph: f64,
    /// Organic matter content (%)
    pub organic_matter: f64,
    /// Exchangeable calcium (cmol/kg)
    pub exchangeable_ca: f64,
    /// Exchangeable magnesium (cmol/kg)
    pub exchangeable_mg: f64,
    /// Exchangeable potassium (cmol/kg)
    pub exchangeable_k: f64,
    /// Cation exchange capacity (cmol/kg)
    pub cec: f64,
    /// Base saturation (%)
    pub base_saturation: f64,
    /// Extractable phosphorus (mg/kg)
    pub p_extractable: f64,
    /// Extractable potassium (mg/kg)
    pub k_extractable: f64,
    /// Plot area (ha)
    pub area_ha: f64,
}

impl SoilPlot {
    /// Check the plot's invariants.
    ///
    /// Rejects non-finite or negative concentrations, non-positive CEC and
    /// non-positive area with a descriptive error.
    pub fn validate(&self) -> ErwResult<()> {
        if !self.ph.is_finite() {
            return Err(ErwError::invalid_input("ph", self.ph, "a finite value"));
        }
        let non_negative = [
            ("organic_matter", self.organic_matter),
            ("exchangeable_ca", self.exchangeable_ca),
            ("exchangeable_mg", self.exchangeable_mg),
            ("exchangeable_k", self.exchangeable_k),
            ("base_saturation", self.base_saturation),
            ("p_extractable", self.p_extractable),
            ("k_extractable", self.k_extractable),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ErwError::invalid_input(field, value, ">= 0"));
            }
        }
        if !self.cec.is_finite() || self.cec <= 0.0 {
            return Err(ErwError::invalid_input("cec", self.cec, "> 0"));
        }
        if !self.area_ha.is_finite() || self.area_ha <= 0.0 {
            return Err(ErwError::invalid_input("area_ha", self.area_ha, "> 0"));
        }
        Ok(())
    }

    /// Mg/Ca ratio of the exchange complex.
    ///
    /// Defined as 0 when no exchangeable calcium is present.
    pub fn mg_ca_ratio(&self) -> f64 {
        if self.exchangeable_ca > 0.0 {
            self.exchangeable_mg / self.exchangeable_ca
        } else {
            0.0
        }
    }

    /// Magnesium deficit relative to the agronomic optimum (cmol/kg).
    ///
    /// `max(0, MG_OPTIMAL_MIN - exchangeable_mg)`; 0 for well-supplied soils.
    pub fn mg_deficit(&self) -> f64 {
        (MG_OPTIMAL_MIN - self.exchangeable_mg).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_plot() -> SoilPlot {
        SoilPlot {
            plot_id: "test".to_string(),
            ph: 5.6,
            organic_matter: 10.0,
            exchangeable_ca: 7.2,
            exchangeable_mg: 0.6,
            exchangeable_k: 0.7,
            cec: 14.4,
            base_saturation: 58.0,
            p_extractable: 45.0,
            k_extractable: 180.0,
            area_ha: 2.0,
        }
    }

    #[test]
    fn test_valid_plot_passes_validation() {
        assert!(sample_plot().validate().is_ok());
    }

    #[test]
    fn test_negative_concentration_rejected() {
        let mut plot = sample_plot();
        plot.exchangeable_mg = -0.1;
        let err = plot.validate().unwrap_err();
        assert!(
            matches!(err, ErwError::InvalidInput { field: "exchangeable_mg", .. }),
            "expected rejection of negative Mg, got {err:?}"
        );
    }

    #[test]
    fn test_non_positive_area_rejected() {
        let mut plot = sample_plot();
        plot.area_ha = 0.0;
        assert!(plot.validate().is_err(), "zero area should be rejected");
    }

    #[test]
    fn test_non_finite_ph_rejected() {
        let mut plot = sample_plot();
        plot.ph = f64::NAN;
        assert!(plot.validate().is_err(), "NaN pH should be rejected");
    }

    #[test]
    fn test_mg_ca_ratio() {
        let plot = sample_plot();
        assert_relative_eq!(plot.mg_ca_ratio(), 0.6 / 7.2);
    }

    #[test]
    fn test_mg_ca_ratio_zero_calcium() {
        let mut plot = sample_plot();
        plot.exchangeable_ca = 0.0;
        // Defined fallback, not a division-by-zero failure
        assert_eq!(plot.mg_ca_ratio(), 0.0);
    }

    #[test]
    fn test_mg_deficit() {
        let plot = sample_plot();
        assert_relative_eq!(plot.mg_deficit(), 0.9);
    }

    #[test]
    fn test_mg_deficit_clamped_at_zero() {
        let mut plot = sample_plot();
        plot.exchangeable_mg = 2.0;
        assert_eq!(plot.mg_deficit(), 0.0, "well-supplied soils have no deficit");
    }

    #[test]
    fn test_serde_round_trip() {
        let plot = sample_plot();
        let json = serde_json::to_string(&plot).expect("serialization failed");
        let parsed: SoilPlot = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(plot, parsed);
    }
}
