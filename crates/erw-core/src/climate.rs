//! Climate context for weathering calculations
//!
//! Rainfall and temperature travel together as an explicit value rather
//! than analysis-wide constants, so different climates can be evaluated
//! side by side in one run.

use crate::errors::{ErwError, ErwResult};
use serde::{Deserialize, Serialize};

/// Climate inputs shared by the scoring and weathering-rate models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateContext {
    /// Annual rainfall (mm/yr)
    pub annual_rainfall_mm: f64,
    /// Mean annual temperature (°C)
    pub mean_temperature_c: f64,
}

impl ClimateContext {
    pub fn new(annual_rainfall_mm: f64, mean_temperature_c: f64) -> Self {
        Self {
            annual_rainfall_mm,
            mean_temperature_c,
        }
    }

    /// Check the context's invariants (finite values, non-negative rainfall).
    pub fn validate(&self) -> ErwResult<()> {
        if !self.annual_rainfall_mm.is_finite() || self.annual_rainfall_mm < 0.0 {
            return Err(ErwError::invalid_input(
                "annual_rainfall_mm",
                self.annual_rainfall_mm,
                ">= 0",
            ));
        }
        if !self.mean_temperature_c.is_finite() {
            return Err(ErwError::invalid_input(
                "mean_temperature_c",
                self.mean_temperature_c,
                "a finite value",
            ));
        }
        Ok(())
    }
}
