//! CO₂ mass balance for an ERW application scenario
//!
//! Implements the accounting identity
//!
//! $$CO_{2,net} = CO_{2,gross} - E_{upstream} - L_{secondary}$$
//!
//! # Algorithm
//!
//! For a scenario applied over a horizon of `years`:
//!
//! 1. Annualised weathered basalt mass:
//!    `application_rate × 1000 × efficiency / years` (kg/ha/yr)
//! 2. Weathered oxide masses from the rock's MgO and CaO fractions
//! 3. Gross CO₂ via exact carbonation stoichiometry
//!    (MgO → MgCO₃: 44/40 kg CO₂ per kg MgO;
//!    CaO → CaCO₃: 44/56 kg CO₂ per kg CaO), scaled by
//!    `rainfall / 1750`, the weathering-rate sensitivity to moisture
//!    relative to the 1750 mm reference climate
//! 4. Upstream emissions from grinding and transport, linear in the
//!    annualised application rate
//! 5. Secondary carbonate loss, a scenario field defaulting to 0
//!    (conservative; alkaline soils can re-precipitate 5-15 %)
//! 6. Net = gross − upstream − secondary. A negative net is a valid,
//!    reportable outcome, not an error.

use crate::errors::{ErwError, ErwResult};
use serde::{Deserialize, Serialize};

/// Exact stoichiometric CO₂ yield per kg of weathered MgO (44/40).
pub const CO2_PER_KG_MGO: f64 = 44.0 / 40.0;
/// Exact stoichiometric CO₂ yield per kg of weathered CaO (44/56).
pub const CO2_PER_KG_CAO: f64 = 44.0 / 56.0;
/// Reference rainfall (mm/yr) at which the moisture scaling is 1.
pub const REFERENCE_RAINFALL_MM: f64 = 1750.0;

/// Parameters for one ERW application scenario.
///
/// [`ErwScenario::new`] fills typical ocean-island basalt values for the
/// rock composition and upstream emission intensities; override the fields
/// for site-specific assays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErwScenario {
    /// Scenario label
    pub name: String,
    /// Basalt application rate (t/ha over the horizon)
    pub application_rate_t_ha: f64,
    /// Fraction of applied basalt that weathers over the horizon (0-1)
    pub weathering_efficiency: f64,
    /// Annual rainfall (mm/yr)
    pub annual_rainfall_mm: f64,
    /// MgO mass fraction of the rock (0-1)
    /// default: 0.08
    pub basalt_mgo_fraction: f64,
    /// CaO mass fraction of the rock (0-1)
    /// default: 0.10
    pub basalt_cao_fraction: f64,
    /// Grinding emission intensity (kg CO₂ per tonne basalt)
    /// default: 50.0
    pub grinding_emissions_kg_per_t: f64,
    /// Transport emission intensity (kg CO₂ per tonne basalt)
    /// default: 10.0
    pub transport_emissions_kg_per_t: f64,
    /// Secondary carbonate re-precipitation loss (t CO₂/ha/yr)
    /// default: 0.0 (conservative)
    pub secondary_loss_t_ha_yr: f64,
}

impl ErwScenario {
    /// Create a scenario with typical basalt composition and emission
    /// intensities.
    pub fn new(
        name: impl Into<String>,
        application_rate_t_ha: f64,
        weathering_efficiency: f64,
        annual_rainfall_mm: f64,
    ) -> Self {
        Self {
            name: name.into(),
            application_rate_t_ha,
            weathering_efficiency,
            annual_rainfall_mm,
            basalt_mgo_fraction: 0.08,
            basalt_cao_fraction: 0.10,
            grinding_emissions_kg_per_t: 50.0,
            transport_emissions_kg_per_t: 10.0,
            secondary_loss_t_ha_yr: 0.0,
        }
    }

    /// Check the scenario's invariants.
    pub fn validate(&self) -> ErwResult<()> {
        if !self.application_rate_t_ha.is_finite() || self.application_rate_t_ha < 0.0 {
            return Err(ErwError::invalid_input(
                "application_rate_t_ha",
                self.application_rate_t_ha,
                ">= 0",
            ));
        }
        if !self.weathering_efficiency.is_finite()
            || !(0.0..=1.0).contains(&self.weathering_efficiency)
        {
            return Err(ErwError::invalid_input(
                "weathering_efficiency",
                self.weathering_efficiency,
                "within [0, 1]",
            ));
        }
        if !self.annual_rainfall_mm.is_finite() || self.annual_rainfall_mm < 0.0 {
            return Err(ErwError::invalid_input(
                "annual_rainfall_mm",
                self.annual_rainfall_mm,
                ">= 0",
            ));
        }
        for (field, value) in [
            ("basalt_mgo_fraction", self.basalt_mgo_fraction),
            ("basalt_cao_fraction", self.basalt_cao_fraction),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ErwError::invalid_input(field, value, "within [0, 1]"));
            }
        }
        for (field, value) in [
            (
                "grinding_emissions_kg_per_t",
                self.grinding_emissions_kg_per_t,
            ),
            (
                "transport_emissions_kg_per_t",
                self.transport_emissions_kg_per_t,
            ),
            ("secondary_loss_t_ha_yr", self.secondary_loss_t_ha_yr),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ErwError::invalid_input(field, value, ">= 0"));
            }
        }
        Ok(())
    }
}

/// Full CO₂ mass balance for one scenario evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassBalanceResult {
    /// Scenario label the balance was computed for
    pub scenario: String,
    /// Gross CO₂ from MgO weathering (kg/ha/yr)
    pub co2_from_mgo_kg_ha_yr: f64,
    /// Gross CO₂ from CaO weathering (kg/ha/yr)
    pub co2_from_cao_kg_ha_yr: f64,
    /// Total gross CO₂ (kg/ha/yr)
    pub gross_co2_kg_ha_yr: f64,
    /// Total gross CO₂ (t/ha/yr)
    pub gross_co2_t_ha_yr: f64,
    /// Total gross CO₂ over the horizon (t/ha)
    pub gross_co2_t_ha_total: f64,
    /// Grinding emissions (kg CO₂/ha/yr)
    pub grinding_emissions_kg_ha_yr: f64,
    /// Transport emissions (kg CO₂/ha/yr)
    pub transport_emissions_kg_ha_yr: f64,
    /// Total upstream emissions (kg CO₂/ha/yr)
    pub upstream_kg_ha_yr: f64,
    /// Total upstream emissions (t CO₂/ha/yr)
    pub upstream_t_ha_yr: f64,
    /// Secondary carbonate loss (t CO₂/ha/yr)
    pub secondary_loss_t_ha_yr: f64,
    /// Net CO₂ removal (t/ha/yr); negative when upstream exceeds gross
    pub net_co2_t_ha_yr: f64,
    /// Net CO₂ removal over the horizon (t/ha)
    pub net_co2_t_ha_total: f64,
    /// Net CO₂ removal over the horizon and plot area (t)
    pub net_co2_t_total: f64,
    /// Upstream emissions as a percentage of gross CO₂ (0 when gross is 0)
    pub upstream_pct_of_gross: f64,
}

/// Compute the CO₂ mass balance for a scenario.
///
/// # Arguments
///
/// * `scenario` - Application parameters
/// * `years` - Analysis horizon (> 0)
/// * `plot_area_ha` - Plot size (> 0)
pub fn compute_balance(
    scenario: &ErwScenario,
    years: f64,
    plot_area_ha: f64,
) -> ErwResult<MassBalanceResult> {
    scenario.validate()?;
    if !years.is_finite() || years <= 0.0 {
        return Err(ErwError::invalid_input("years", years, "> 0"));
    }
    if !plot_area_ha.is_finite() || plot_area_ha <= 0.0 {
        return Err(ErwError::invalid_input("plot_area_ha", plot_area_ha, "> 0"));
    }
    Ok(balance_unchecked(scenario, years, plot_area_ha))
}

/// The balance arithmetic, assuming already-validated inputs.
///
/// Kept separate so bulk evaluators (sweeps) that validate their grids up
/// front can iterate infallibly.
pub(crate) fn balance_unchecked(
    scenario: &ErwScenario,
    years: f64,
    plot_area_ha: f64,
) -> MassBalanceResult {
    // Annualised weathered basalt mass (kg/ha/yr)
    let basalt_weathered_kg_ha_yr =
        scenario.application_rate_t_ha * 1000.0 * scenario.weathering_efficiency / years;

    let mgo_weathered_kg_ha_yr = basalt_weathered_kg_ha_yr * scenario.basalt_mgo_fraction;
    let cao_weathered_kg_ha_yr = basalt_weathered_kg_ha_yr * scenario.basalt_cao_fraction;

    // Moisture scaling relative to the reference climate, not a unit
    // conversion
    let rainfall_factor = scenario.annual_rainfall_mm / REFERENCE_RAINFALL_MM;

    let co2_from_mgo_kg_ha_yr = mgo_weathered_kg_ha_yr * CO2_PER_KG_MGO * rainfall_factor;
    let co2_from_cao_kg_ha_yr = cao_weathered_kg_ha_yr * CO2_PER_KG_CAO * rainfall_factor;

    let gross_co2_kg_ha_yr = co2_from_mgo_kg_ha_yr + co2_from_cao_kg_ha_yr;
    let gross_co2_t_ha_yr = gross_co2_kg_ha_yr / 1000.0;

    // Upstream emissions, linear in the annualised application rate
    let annual_basalt_kg_ha = scenario.application_rate_t_ha * 1000.0 / years;
    let grinding_emissions_kg_ha_yr =
        annual_basalt_kg_ha * scenario.grinding_emissions_kg_per_t / 1000.0;
    let transport_emissions_kg_ha_yr =
        annual_basalt_kg_ha * scenario.transport_emissions_kg_per_t / 1000.0;
    let upstream_kg_ha_yr = grinding_emissions_kg_ha_yr + transport_emissions_kg_ha_yr;
    let upstream_t_ha_yr = upstream_kg_ha_yr / 1000.0;

    let secondary_loss_t_ha_yr = scenario.secondary_loss_t_ha_yr;

    let net_co2_t_ha_yr = gross_co2_t_ha_yr - upstream_t_ha_yr - secondary_loss_t_ha_yr;

    let upstream_pct_of_gross = if gross_co2_t_ha_yr > 0.0 {
        upstream_t_ha_yr / gross_co2_t_ha_yr * 100.0
    } else {
        0.0
    };

    MassBalanceResult {
        scenario: scenario.name.clone(),
        co2_from_mgo_kg_ha_yr,
        co2_from_cao_kg_ha_yr,
        gross_co2_kg_ha_yr,
        gross_co2_t_ha_yr,
        gross_co2_t_ha_total: gross_co2_t_ha_yr * years,
        grinding_emissions_kg_ha_yr,
        transport_emissions_kg_ha_yr,
        upstream_kg_ha_yr,
        upstream_t_ha_yr,
        secondary_loss_t_ha_yr,
        net_co2_t_ha_yr,
        net_co2_t_ha_total: net_co2_t_ha_yr * years,
        net_co2_t_total: net_co2_t_ha_yr * years * plot_area_ha,
        upstream_pct_of_gross,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base_scenario() -> ErwScenario {
        ErwScenario::new("Lime Replacement (2.7 t/ha/yr)", 2.7, 0.45, 1750.0)
    }

    #[test]
    fn test_stoichiometric_constants() {
        assert_relative_eq!(CO2_PER_KG_MGO, 1.1, epsilon = 1e-12);
        assert_relative_eq!(CO2_PER_KG_CAO, 0.7857, epsilon = 5e-5);
    }

    #[test]
    fn test_base_case_gross_co2() {
        // 2.7 t/ha at 45% efficiency over 10 years weathers 121.5 kg/ha/yr;
        // at the reference rainfall the moisture factor is exactly 1
        let result = compute_balance(&base_scenario(), 10.0, 2.0).unwrap();
        let expected_kg = 121.5 * (0.08 * CO2_PER_KG_MGO + 0.10 * CO2_PER_KG_CAO);
        assert_relative_eq!(result.gross_co2_kg_ha_yr, expected_kg, max_relative = 1e-12);
        assert_relative_eq!(result.gross_co2_t_ha_yr, 0.020238, epsilon = 5e-7);
    }

    #[test]
    fn test_base_case_upstream() {
        // 270 kg basalt/ha/yr at 60 kg CO2/t upstream intensity
        let result = compute_balance(&base_scenario(), 10.0, 2.0).unwrap();
        assert_relative_eq!(result.grinding_emissions_kg_ha_yr, 13.5, max_relative = 1e-12);
        assert_relative_eq!(result.transport_emissions_kg_ha_yr, 2.7, max_relative = 1e-12);
        assert_relative_eq!(result.upstream_t_ha_yr, 0.0162, max_relative = 1e-12);
    }

    #[test]
    fn test_base_case_net() {
        let result = compute_balance(&base_scenario(), 10.0, 2.0).unwrap();
        let expected_net = result.gross_co2_t_ha_yr - 0.0162;
        assert_relative_eq!(result.net_co2_t_ha_yr, expected_net, max_relative = 1e-12);
        assert_relative_eq!(result.net_co2_t_ha_total, expected_net * 10.0, max_relative = 1e-12);
        assert_relative_eq!(result.net_co2_t_total, expected_net * 20.0, max_relative = 1e-12);
    }

    #[test]
    fn test_single_year_horizon_matches_annual_rate() {
        // With years = 1 the full application weathers within the year
        let result = compute_balance(&base_scenario(), 1.0, 2.0).unwrap();
        assert_relative_eq!(result.gross_co2_t_ha_yr, 0.2024, epsilon = 5e-5);
    }

    #[test]
    fn test_net_identity_over_parameter_grid() {
        // net = gross - upstream - secondary, exactly, for all valid inputs
        for rate in [0.0, 2.7, 10.0, 50.0] {
            for eff in [0.0, 0.2, 0.45, 1.0] {
                for rain in [0.0, 1000.0, 1750.0, 2500.0] {
                    for loss in [0.0, 0.05] {
                        let mut scenario = ErwScenario::new("grid", rate, eff, rain);
                        scenario.secondary_loss_t_ha_yr = loss;
                        let r = compute_balance(&scenario, 10.0, 2.0).unwrap();
                        assert_relative_eq!(
                            r.net_co2_t_ha_yr,
                            r.gross_co2_t_ha_yr - r.upstream_t_ha_yr - r.secondary_loss_t_ha_yr,
                            epsilon = 1e-15
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_rainfall_scaling_is_linear() {
        let mut wet = base_scenario();
        wet.annual_rainfall_mm = 3500.0;
        let reference = compute_balance(&base_scenario(), 10.0, 2.0).unwrap();
        let doubled = compute_balance(&wet, 10.0, 2.0).unwrap();
        assert_relative_eq!(
            doubled.gross_co2_t_ha_yr,
            reference.gross_co2_t_ha_yr * 2.0,
            max_relative = 1e-12
        );
        // Upstream emissions do not depend on rainfall
        assert_relative_eq!(doubled.upstream_t_ha_yr, reference.upstream_t_ha_yr);
    }

    #[test]
    fn test_negative_net_is_reportable() {
        // Heavy grinding emissions on a barely-weathering application
        let mut scenario = ErwScenario::new("uphill", 10.0, 0.01, 1750.0);
        scenario.grinding_emissions_kg_per_t = 500.0;
        let result = compute_balance(&scenario, 10.0, 2.0).unwrap();
        assert!(
            result.net_co2_t_ha_yr < 0.0,
            "upstream-dominated scenario should report a negative net, got {}",
            result.net_co2_t_ha_yr
        );
    }

    #[test]
    fn test_zero_gross_percentage_fallback() {
        // Zero application: gross is 0, percentage must not divide by zero
        let scenario = ErwScenario::new("nothing", 0.0, 0.45, 1750.0);
        let result = compute_balance(&scenario, 10.0, 2.0).unwrap();
        assert_eq!(result.gross_co2_t_ha_yr, 0.0);
        assert_eq!(result.upstream_pct_of_gross, 0.0);
    }

    #[test]
    fn test_secondary_loss_reduces_net() {
        let mut scenario = base_scenario();
        scenario.secondary_loss_t_ha_yr = 0.002;
        let with_loss = compute_balance(&scenario, 10.0, 2.0).unwrap();
        let without = compute_balance(&base_scenario(), 10.0, 2.0).unwrap();
        assert_relative_eq!(
            with_loss.net_co2_t_ha_yr,
            without.net_co2_t_ha_yr - 0.002,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_invalid_efficiency_rejected() {
        let scenario = ErwScenario::new("bad", 2.7, 1.5, 1750.0);
        assert!(compute_balance(&scenario, 10.0, 2.0).is_err());
        let scenario = ErwScenario::new("bad", 2.7, -0.1, 1750.0);
        assert!(compute_balance(&scenario, 10.0, 2.0).is_err());
    }

    #[test]
    fn test_non_positive_horizon_rejected() {
        assert!(compute_balance(&base_scenario(), 0.0, 2.0).is_err());
        assert!(compute_balance(&base_scenario(), -5.0, 2.0).is_err());
    }

    #[test]
    fn test_non_positive_area_rejected() {
        assert!(compute_balance(&base_scenario(), 10.0, 0.0).is_err());
    }

    #[test]
    fn test_scenario_toml_round_trip() {
        let scenario = base_scenario();
        let serialised = toml::to_string(&scenario).expect("serialization failed");
        let parsed: ErwScenario = toml::from_str(&serialised).expect("deserialization failed");
        assert_eq!(scenario, parsed);
    }
}
