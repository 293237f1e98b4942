//! Farmer economics of basalt application
//!
//! Computes the per-hectare benefit of applying basalt instead of a
//! conventional input (agricultural lime), plus carbon-credit revenue on the
//! net CO₂ removed. Two structurally different application schemes exist and
//! are kept distinct:
//!
//! - [`ApplicationScheme::Recurring`]: basalt displaces an annual lime
//!   application; costs and revenue are both per year.
//! - [`ApplicationScheme::OneTimeBulk`]: a single heavy application whose
//!   cost is amortised over a fixed [`BULK_AMORTISATION_YEARS`] horizon and
//!   whose CO₂ benefit is the per-year average over that horizon.

use crate::errors::{ErwError, ErwResult};
use serde::{Deserialize, Serialize};

/// Amortisation horizon (years) for the one-time bulk scheme.
///
/// Fixed by the scheme's definition, independent of the analysis horizon
/// used elsewhere in the model.
pub const BULK_AMORTISATION_YEARS: f64 = 10.0;

/// Unit costs and carbon-credit price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostParameters {
    /// Agricultural lime price (EUR/t)
    /// default: 40.0
    pub lime_eur_per_t: f64,
    /// Crushed basalt price, delivered (EUR/t)
    /// default: 13.0
    pub basalt_eur_per_t: f64,
    /// Carbon-credit price (EUR/t CO₂)
    /// default: 80.0
    pub carbon_credit_eur_per_t_co2: f64,
}

impl Default for CostParameters {
    fn default() -> Self {
        Self {
            lime_eur_per_t: 40.0,
            basalt_eur_per_t: 13.0,
            carbon_credit_eur_per_t_co2: 80.0,
        }
    }
}

impl CostParameters {
    /// Check the parameters' invariants (finite, non-negative prices).
    pub fn validate(&self) -> ErwResult<()> {
        for (field, value) in [
            ("lime_eur_per_t", self.lime_eur_per_t),
            ("basalt_eur_per_t", self.basalt_eur_per_t),
            (
                "carbon_credit_eur_per_t_co2",
                self.carbon_credit_eur_per_t_co2,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ErwError::invalid_input(field, value, ">= 0"));
            }
        }
        Ok(())
    }
}

/// How the basalt is applied, which determines the amortisation policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ApplicationScheme {
    /// Annual basalt application displacing an annual lime application.
    Recurring {
        /// Lime no longer applied (t/ha/yr)
        lime_displaced_t_ha_yr: f64,
        /// Basalt applied instead (t/ha/yr)
        basalt_t_ha_yr: f64,
    },
    /// Single bulk application amortised over [`BULK_AMORTISATION_YEARS`].
    OneTimeBulk {
        /// Basalt applied once (t/ha)
        basalt_t_ha: f64,
    },
}

impl ApplicationScheme {
    /// Check the scheme's invariants (finite, non-negative rates).
    pub fn validate(&self) -> ErwResult<()> {
        fn check(field: &'static str, value: f64) -> ErwResult<()> {
            if !value.is_finite() || value < 0.0 {
                return Err(ErwError::invalid_input(field, value, ">= 0"));
            }
            Ok(())
        }
        match *self {
            ApplicationScheme::Recurring {
                lime_displaced_t_ha_yr,
                basalt_t_ha_yr,
            } => {
                check("lime_displaced_t_ha_yr", lime_displaced_t_ha_yr)?;
                check("basalt_t_ha_yr", basalt_t_ha_yr)
            }
            ApplicationScheme::OneTimeBulk { basalt_t_ha } => check("basalt_t_ha", basalt_t_ha),
        }
    }
}

/// Per-hectare, per-year economic outcome of an application scheme.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicBenefit {
    /// Cost of the displaced lime (EUR/ha/yr)
    pub lime_cost_eur_ha_yr: f64,
    /// Cost of the basalt, annualised for bulk schemes (EUR/ha/yr)
    pub basalt_cost_eur_ha_yr: f64,
    /// Lime cost minus basalt cost (EUR/ha/yr)
    pub cost_savings_eur_ha_yr: f64,
    /// Carbon-credit revenue (EUR/ha/yr)
    pub carbon_revenue_eur_ha_yr: f64,
    /// Savings plus revenue (EUR/ha/yr)
    pub total_benefit_eur_ha_yr: f64,
}

/// Evaluate a scheme's per-hectare benefit.
///
/// `net_co2_t_ha_yr` is the creditable net CO₂ removal: the per-year value
/// for a recurring scheme, the per-year average over the amortisation
/// horizon for a bulk scheme. Negative nets produce negative revenue rather
/// than an error.
pub fn evaluate(
    scheme: &ApplicationScheme,
    net_co2_t_ha_yr: f64,
    costs: &CostParameters,
) -> ErwResult<EconomicBenefit> {
    scheme.validate()?;
    costs.validate()?;
    if !net_co2_t_ha_yr.is_finite() {
        return Err(ErwError::invalid_input(
            "net_co2_t_ha_yr",
            net_co2_t_ha_yr,
            "a finite value",
        ));
    }

    let carbon_revenue_eur_ha_yr = net_co2_t_ha_yr * costs.carbon_credit_eur_per_t_co2;

    let (lime_cost_eur_ha_yr, basalt_cost_eur_ha_yr) = match *scheme {
        ApplicationScheme::Recurring {
            lime_displaced_t_ha_yr,
            basalt_t_ha_yr,
        } => (
            lime_displaced_t_ha_yr * costs.lime_eur_per_t,
            basalt_t_ha_yr * costs.basalt_eur_per_t,
        ),
        ApplicationScheme::OneTimeBulk { basalt_t_ha } => (
            // No recurring lime programme to displace
            0.0,
            basalt_t_ha * costs.basalt_eur_per_t / BULK_AMORTISATION_YEARS,
        ),
    };

    let cost_savings_eur_ha_yr = lime_cost_eur_ha_yr - basalt_cost_eur_ha_yr;

    Ok(EconomicBenefit {
        lime_cost_eur_ha_yr,
        basalt_cost_eur_ha_yr,
        cost_savings_eur_ha_yr,
        carbon_revenue_eur_ha_yr,
        total_benefit_eur_ha_yr: cost_savings_eur_ha_yr + carbon_revenue_eur_ha_yr,
    })
}
