//! Island emissions context and agricultural integration ceiling
//!
//! Puts island-scale ERW deployment in perspective: how much of Sao
//! Miguel's own CO₂ emissions a given removal rate offsets, and how much
//! basalt the island's suitable farmland can absorb on a sustained
//! re-application cycle.

use erw_core::errors::{ErwError, ErwResult};
use serde::{Deserialize, Serialize};

/// Island population and per-capita emissions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionsContext {
    /// Resident population
    /// default: 140000
    pub population: f64,
    /// Per-capita CO₂ emissions (t/yr)
    /// default: 5.0
    pub per_capita_t_co2_yr: f64,
}

impl Default for EmissionsContext {
    fn default() -> Self {
        Self {
            population: 140_000.0,
            per_capita_t_co2_yr: 5.0,
        }
    }
}

impl EmissionsContext {
    /// Total island emissions (t CO₂/yr).
    pub fn island_emissions_t_co2_yr(&self) -> f64 {
        self.population * self.per_capita_t_co2_yr
    }

    /// Share of island emissions offset by an annual removal (percent).
    pub fn erw_share_pct(&self, annual_cdr_t_co2: f64) -> ErwResult<f64> {
        let emissions = self.island_emissions_t_co2_yr();
        if emissions <= 0.0 {
            return Err(ErwError::invalid_input(
                "island_emissions_t_co2_yr",
                emissions,
                "> 0",
            ));
        }
        Ok(annual_cdr_t_co2 / emissions * 100.0)
    }
}

/// How much basalt the island's farmland can take on a sustained cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgriculturalIntegration {
    /// Total agricultural area (km²)
    /// default: 250.0
    pub agricultural_area_km2: f64,
    /// Area suitable for basalt application (km²)
    /// default: 200.0
    pub suitable_area_km2: f64,
    /// Application rate per cycle (t/ha)
    /// default: 50.0
    pub application_t_ha: f64,
    /// Re-application cycle length (yr)
    /// default: 5.0
    pub cycle_years: f64,
    /// Lifetime CO₂ removal per tonne of applied basalt (t CO₂/t)
    /// default: 0.30
    pub co2_per_t_basalt: f64,
}

impl Default for AgriculturalIntegration {
    fn default() -> Self {
        Self {
            agricultural_area_km2: 250.0,
            suitable_area_km2: 200.0,
            application_t_ha: 50.0,
            cycle_years: 5.0,
            co2_per_t_basalt: 0.30,
        }
    }
}

impl AgriculturalIntegration {
    /// Check the invariants (suitable area within the total, positive
    /// cycle).
    pub fn validate(&self) -> ErwResult<()> {
        for (field, value) in [
            ("agricultural_area_km2", self.agricultural_area_km2),
            ("application_t_ha", self.application_t_ha),
            ("cycle_years", self.cycle_years),
            ("co2_per_t_basalt", self.co2_per_t_basalt),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ErwError::invalid_input(field, value, "> 0"));
            }
        }
        if !self.suitable_area_km2.is_finite()
            || self.suitable_area_km2 < 0.0
            || self.suitable_area_km2 > self.agricultural_area_km2
        {
            return Err(ErwError::invalid_input(
                "suitable_area_km2",
                self.suitable_area_km2,
                "within [0, agricultural_area_km2]",
            ));
        }
        Ok(())
    }

    /// Suitable area in hectares.
    pub fn suitable_area_ha(&self) -> f64 {
        self.suitable_area_km2 * 100.0
    }

    /// Sustained annual basalt demand with applications staggered across
    /// the cycle (t/yr).
    pub fn annual_basalt_demand_t(&self) -> ErwResult<f64> {
        self.validate()?;
        Ok(self.suitable_area_ha() * self.application_t_ha / self.cycle_years)
    }

    /// Sustained annual CO₂ removal at full coverage (t CO₂/yr).
    pub fn annual_cdr_t_co2(&self) -> ErwResult<f64> {
        Ok(self.annual_basalt_demand_t()? * self.co2_per_t_basalt)
    }
}
