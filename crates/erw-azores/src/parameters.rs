//! Reference climate and application scenarios for Sao Miguel
//!
//! Values are drawn from the Sanguinho field campaign: long-term mean
//! rainfall of 1750 mm/yr and a mean annual temperature of 18 °C, with two
//! reference ways of applying basalt to pasture.

use erw_core::climate::ClimateContext;
use erw_core::mass_balance::ErwScenario;

/// Long-term mean climate for the Sanguinho area of Sao Miguel.
pub fn sao_miguel_climate() -> ClimateContext {
    ClimateContext::new(1750.0, 18.0)
}

/// Annual basalt application sized to displace the conventional liming
/// programme (2.7 t/ha/yr of basalt for 3 t/ha/yr of lime).
pub fn lime_replacement_scenario() -> ErwScenario {
    ErwScenario::new("Lime Replacement (2.7 t/ha/yr)", 2.7, 0.45, 1750.0)
}

/// One-time bulk application of 50 t/ha, assessed over a decade.
pub fn full_erw_scenario() -> ErwScenario {
    ErwScenario::new("Full ERW (50 t/ha once)", 50.0, 0.45, 1750.0)
}
