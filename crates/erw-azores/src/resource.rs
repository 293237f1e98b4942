//! Island-scale basalt resource assessment
//!
//! Sao Miguel is built of basalt; the question is how much is practically
//! quarryable and how long it would last under different extraction rates.
//! The assessment is deliberately coarse: a volumetric estimate from island
//! area, volcanic coverage and an accessible depth, discounted by a recovery
//! factor.

use erw_core::errors::{ErwError, ErwResult};
use serde::{Deserialize, Serialize};

/// Geological and recovery parameters for the resource estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceParameters {
    /// Island area (km²)
    /// default: 744.0
    pub island_area_km2: f64,
    /// Fraction of the island with quarryable volcanic cover (0-1)
    /// default: 0.70
    pub volcanic_coverage: f64,
    /// Accessible extraction depth (m)
    /// default: 5.0
    pub accessible_depth_m: f64,
    /// Basalt density (kg/m³)
    /// default: 2875.0
    pub basalt_density_kg_m3: f64,
    /// Fraction of the in-situ rock recoverable by quarrying (0-1)
    /// default: 0.50
    pub recovery_factor: f64,
    /// Lifetime CO₂ removal per tonne of applied basalt (t CO₂/t)
    /// default: 0.30
    pub co2_per_t_basalt: f64,
}

impl Default for ResourceParameters {
    fn default() -> Self {
        Self {
            island_area_km2: 744.0,
            volcanic_coverage: 0.70,
            accessible_depth_m: 5.0,
            basalt_density_kg_m3: 2875.0,
            recovery_factor: 0.50,
            co2_per_t_basalt: 0.30,
        }
    }
}

impl ResourceParameters {
    /// Check the parameters' invariants.
    pub fn validate(&self) -> ErwResult<()> {
        for (field, value) in [
            ("island_area_km2", self.island_area_km2),
            ("accessible_depth_m", self.accessible_depth_m),
            ("basalt_density_kg_m3", self.basalt_density_kg_m3),
            ("co2_per_t_basalt", self.co2_per_t_basalt),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ErwError::invalid_input(field, value, "> 0"));
            }
        }
        for (field, value) in [
            ("volcanic_coverage", self.volcanic_coverage),
            ("recovery_factor", self.recovery_factor),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ErwError::invalid_input(field, value, "within [0, 1]"));
            }
        }
        Ok(())
    }
}

/// Volumetric resource estimate and its CO₂ removal ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceAssessment {
    /// In-situ basalt mass within the accessible depth (Mt)
    pub in_situ_mt: f64,
    /// Recoverable basalt after the recovery factor (Mt)
    pub accessible_mt: f64,
    /// Lifetime CO₂ removal ceiling of the accessible resource (Mt CO₂)
    pub cdr_potential_mt_co2: f64,
}

/// Compute the resource estimate.
pub fn assess_resource(parameters: &ResourceParameters) -> ErwResult<ResourceAssessment> {
    parameters.validate()?;

    let volcanic_area_m2 = parameters.island_area_km2 * parameters.volcanic_coverage * 1e6;
    let in_situ_kg =
        volcanic_area_m2 * parameters.accessible_depth_m * parameters.basalt_density_kg_m3;
    let in_situ_mt = in_situ_kg / 1e9;
    let accessible_mt = in_situ_mt * parameters.recovery_factor;

    Ok(ResourceAssessment {
        in_situ_mt,
        accessible_mt,
        cdr_potential_mt_co2: accessible_mt * parameters.co2_per_t_basalt,
    })
}

/// An annual extraction rate to compare against the resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionScenario {
    /// Scenario label
    pub name: String,
    /// Annual extraction rate (t/yr)
    pub extraction_t_yr: f64,
}

/// Depletion outlook of one extraction scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutlook {
    /// Scenario label
    pub name: String,
    /// Annual extraction rate (t/yr)
    pub extraction_t_yr: f64,
    /// Annual CO₂ removal at that rate (t CO₂/yr)
    pub annual_cdr_t_co2: f64,
    /// Years until the accessible resource is exhausted
    pub depletion_years: f64,
}

impl ExtractionScenario {
    /// Depletion outlook against an assessed resource.
    pub fn outlook(
        &self,
        assessment: &ResourceAssessment,
        parameters: &ResourceParameters,
    ) -> ErwResult<ExtractionOutlook> {
        if !self.extraction_t_yr.is_finite() || self.extraction_t_yr <= 0.0 {
            return Err(ErwError::invalid_input(
                "extraction_t_yr",
                self.extraction_t_yr,
                "> 0",
            ));
        }
        Ok(ExtractionOutlook {
            name: self.name.clone(),
            extraction_t_yr: self.extraction_t_yr,
            annual_cdr_t_co2: self.extraction_t_yr * parameters.co2_per_t_basalt,
            depletion_years: assessment.accessible_mt * 1e6 / self.extraction_t_yr,
        })
    }
}

/// The three reference extraction rates for Sao Miguel.
pub fn default_extraction_scenarios() -> Vec<ExtractionScenario> {
    vec![
        ExtractionScenario {
            name: "Conservative".to_string(),
            extraction_t_yr: 50_000.0,
        },
        ExtractionScenario {
            name: "Moderate".to_string(),
            extraction_t_yr: 75_000.0,
        },
        ExtractionScenario {
            name: "Aggressive".to_string(),
            extraction_t_yr: 100_000.0,
        },
    ]
}
