//! Weathering-rate multiplier
//!
//! Maps soil pH, organic matter and rainfall to a dimensionless multiplier
//! on the baseline basalt dissolution rate:
//!
//! $$m = \left(10^{7 - pH}\right)^a \times \left(1 + (OM - 2) \times 0.15\right) \times \left(\frac{P}{1000} \times 1.2\right)^b$$
//!
//! - the pH term models exponential acceleration of dissolution with acidity
//!   relative to a neutral (pH 7) baseline
//! - the organic-matter term is a linear enhancement centred on a 2 % OM
//!   baseline
//! - the rainfall term scales dissolution with moisture availability
//!
//! Two exponent conventions exist for $(a, b)$. The default here is the
//! **normalised** convention $(a, b) = (0.3, 0.5)$, which damps the raw pH
//! term into a plausible range for field soils;
//! [`WeatheringRateParameters::unscaled`] gives the plain-multiplier
//! convention $(1.0, 1.0)$. The exponents are parameters, so a single
//! evaluation always uses one convention throughout.

use crate::climate::ClimateContext;
use crate::errors::{ErwError, ErwResult};
use crate::soil::SoilPlot;
use serde::{Deserialize, Serialize};

/// Tuning parameters for the weathering-rate multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatheringRateParameters {
    /// Exponent on the pH acidity term
    /// default: 0.3 (normalised convention)
    pub ph_exponent: f64,
    /// Exponent on the rainfall term
    /// default: 0.5 (normalised convention)
    pub rainfall_exponent: f64,
    /// Linear enhancement per % organic matter above the baseline
    /// default: 0.15
    pub om_slope: f64,
    /// Organic-matter baseline (%) at which the OM term is 1
    /// default: 2.0
    pub om_baseline: f64,
    /// Scale applied to rainfall (in metres/yr) before exponentiation
    /// default: 1.2
    pub rainfall_scale: f64,
}

impl Default for WeatheringRateParameters {
    fn default() -> Self {
        Self {
            ph_exponent: 0.3,
            rainfall_exponent: 0.5,
            om_slope: 0.15,
            om_baseline: 2.0,
            rainfall_scale: 1.2,
        }
    }
}

impl WeatheringRateParameters {
    /// Plain-multiplier convention: the pH and rainfall terms enter
    /// unattenuated. Produces much larger multipliers for acidic soils.
    pub fn unscaled() -> Self {
        Self {
            ph_exponent: 1.0,
            rainfall_exponent: 1.0,
            ..Self::default()
        }
    }
}

/// Weathering-rate model with a fixed exponent convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatheringRateModel {
    parameters: WeatheringRateParameters,
}

impl WeatheringRateModel {
    /// Create a model with the default (normalised) parameters.
    pub fn new() -> Self {
        Self::from_parameters(WeatheringRateParameters::default())
    }

    /// Create a model from explicit parameters.
    pub fn from_parameters(parameters: WeatheringRateParameters) -> Self {
        Self { parameters }
    }

    /// Get the parameters.
    pub fn parameters(&self) -> &WeatheringRateParameters {
        &self.parameters
    }

    /// Dimensionless rate multiplier for a plot in a climate.
    ///
    /// The result is guaranteed finite and strictly positive; rainfall must
    /// be strictly positive for the moisture term to be meaningful.
    pub fn rate_multiplier(&self, plot: &SoilPlot, climate: &ClimateContext) -> ErwResult<f64> {
        plot.validate()?;
        climate.validate()?;
        if climate.annual_rainfall_mm <= 0.0 {
            return Err(ErwError::invalid_input(
                "annual_rainfall_mm",
                climate.annual_rainfall_mm,
                "> 0 for a weathering-rate estimate",
            ));
        }

        let p = &self.parameters;
        let ph_term = 10f64.powf(7.0 - plot.ph).powf(p.ph_exponent);
        let om_term = 1.0 + (plot.organic_matter - p.om_baseline) * p.om_slope;
        let rainfall_term =
            (climate.annual_rainfall_mm / 1000.0 * p.rainfall_scale).powf(p.rainfall_exponent);

        let multiplier = ph_term * om_term * rainfall_term;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ErwError::Error(format!(
                "degenerate weathering-rate multiplier {multiplier} for plot {}",
                plot.plot_id
            )));
        }
        Ok(multiplier)
    }
}

impl Default for WeatheringRateModel {
    fn default() -> Self {
        Self::new()
    }
}
