//! Uncertainty propagation for net CO₂ estimates
//!
//! The four dominant error sources are treated as independent and
//! uncorrelated, so their relative uncertainties combine in quadrature:
//!
//! $$u = \sqrt{u_w^2 + u_e^2 + u_x^2 + u_r^2}$$
//!
//! A plain sum would overstate the combined uncertainty; quadrature addition
//! is the standard treatment for independent error sources and must not be
//! replaced. The 95 % confidence interval uses the two-sided normal
//! approximation (±1.96 σ).

use crate::errors::{ErwError, ErwResult};
use crate::mass_balance::MassBalanceResult;
use serde::{Deserialize, Serialize};

/// Two-sided 95 % coverage factor for a normal distribution.
pub const Z_95: f64 = 1.96;

/// Relative (fractional) uncertainties of the independent error sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyComponents {
    /// Weathering-rate uncertainty
    /// default: 0.30
    pub weathering_rate: f64,
    /// Upstream-emissions uncertainty
    /// default: 0.15
    pub upstream_emissions: f64,
    /// Alkalinity-export uncertainty
    /// default: 0.20
    pub alkalinity_export: f64,
    /// Interannual rainfall variability
    /// default: 0.20
    pub rainfall_variability: f64,
}

impl Default for UncertaintyComponents {
    fn default() -> Self {
        Self {
            weathering_rate: 0.30,
            upstream_emissions: 0.15,
            alkalinity_export: 0.20,
            rainfall_variability: 0.20,
        }
    }
}

impl UncertaintyComponents {
    /// Combined relative uncertainty (quadrature sum of the components).
    pub fn combined(&self) -> f64 {
        (self.weathering_rate.powi(2)
            + self.upstream_emissions.powi(2)
            + self.alkalinity_export.powi(2)
            + self.rainfall_variability.powi(2))
        .sqrt()
    }

    /// Check the components' invariants (finite, non-negative fractions).
    pub fn validate(&self) -> ErwResult<()> {
        for (field, value) in [
            ("weathering_rate", self.weathering_rate),
            ("upstream_emissions", self.upstream_emissions),
            ("alkalinity_export", self.alkalinity_export),
            ("rainfall_variability", self.rainfall_variability),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ErwError::invalid_input(field, value, ">= 0"));
            }
        }
        Ok(())
    }
}

/// 95 % confidence interval around a central net CO₂ estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyResult {
    /// Central estimate (t CO₂/ha/yr)
    pub central_estimate_t_ha_yr: f64,
    /// Combined relative uncertainty (fraction)
    pub combined_uncertainty: f64,
    /// Half-width of the 95 % CI (t CO₂/ha/yr)
    pub margin_t_ha_yr: f64,
    /// Lower bound of the 95 % CI (t CO₂/ha/yr)
    pub lower_bound_t_ha_yr: f64,
    /// Upper bound of the 95 % CI (t CO₂/ha/yr)
    pub upper_bound_t_ha_yr: f64,
    /// Lower bound as a percent deviation from the central estimate
    /// (0 when the central estimate is 0)
    pub percent_change_lower: f64,
    /// Upper bound as a percent deviation from the central estimate
    pub percent_change_upper: f64,
}

/// Propagate component uncertainties through a mass-balance result.
pub fn propagate(
    result: &MassBalanceResult,
    components: &UncertaintyComponents,
) -> ErwResult<UncertaintyResult> {
    components.validate()?;

    let central = result.net_co2_t_ha_yr;
    let combined = components.combined();
    // Margin on the magnitude so bounds stay ordered for negative nets
    let margin = central.abs() * combined * Z_95;

    let lower = central - margin;
    let upper = central + margin;

    let (percent_change_lower, percent_change_upper) = if central == 0.0 {
        (0.0, 0.0)
    } else {
        ((lower / central - 1.0) * 100.0, (upper / central - 1.0) * 100.0)
    };

    Ok(UncertaintyResult {
        central_estimate_t_ha_yr: central,
        combined_uncertainty: combined,
        margin_t_ha_yr: margin,
        lower_bound_t_ha_yr: lower,
        upper_bound_t_ha_yr: upper,
        percent_change_lower,
        percent_change_upper,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mass_balance::{compute_balance, ErwScenario};
    use approx::assert_relative_eq;

    fn base_result() -> MassBalanceResult {
        let scenario = ErwScenario::new("base", 2.7, 0.45, 1750.0);
        compute_balance(&scenario, 10.0, 2.0).unwrap()
    }

    #[test]
    fn test_default_combined_uncertainty() {
        // sqrt(0.30^2 + 0.15^2 + 0.20^2 + 0.20^2) = sqrt(0.1925)
        let combined = UncertaintyComponents::default().combined();
        assert_relative_eq!(combined, 0.1925_f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(combined, 0.4387, epsilon = 5e-5);
    }

    #[test]
    fn test_quadrature_not_plain_sum() {
        let components = UncertaintyComponents::default();
        let plain_sum = 0.30 + 0.15 + 0.20 + 0.20;
        assert!(
            components.combined() < plain_sum,
            "quadrature must be below the plain sum"
        );
    }

    #[test]
    fn test_interval_symmetric_around_central() {
        let result = base_result();
        let u = propagate(&result, &UncertaintyComponents::default()).unwrap();
        assert_relative_eq!(
            u.central_estimate_t_ha_yr - u.lower_bound_t_ha_yr,
            u.upper_bound_t_ha_yr - u.central_estimate_t_ha_yr,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            u.margin_t_ha_yr,
            u.central_estimate_t_ha_yr.abs() * u.combined_uncertainty * Z_95,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_percent_changes() {
        let result = base_result();
        let u = propagate(&result, &UncertaintyComponents::default()).unwrap();
        assert_relative_eq!(
            u.percent_change_upper,
            u.combined_uncertainty * Z_95 * 100.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(u.percent_change_lower, -u.percent_change_upper, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_central_estimate() {
        let mut result = base_result();
        result.net_co2_t_ha_yr = 0.0;
        let u = propagate(&result, &UncertaintyComponents::default()).unwrap();
        assert_eq!(u.margin_t_ha_yr, 0.0);
        assert_eq!(u.percent_change_lower, 0.0);
        assert_eq!(u.percent_change_upper, 0.0);
    }

    #[test]
    fn test_negative_central_keeps_bounds_ordered() {
        let mut result = base_result();
        result.net_co2_t_ha_yr = -0.05;
        let u = propagate(&result, &UncertaintyComponents::default()).unwrap();
        assert!(u.lower_bound_t_ha_yr < u.upper_bound_t_ha_yr);
        assert!(u.margin_t_ha_yr > 0.0);
    }

    #[test]
    fn test_negative_component_rejected() {
        let mut components = UncertaintyComponents::default();
        components.alkalinity_export = -0.1;
        assert!(propagate(&base_result(), &components).is_err());
    }
}
