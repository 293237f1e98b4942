//! Per-plot viability assessment and survey-wide aggregation
//!
//! Ties the core components together for one surveyed plot: a viability
//! score, a weathering-rate multiplier, multiplier-scaled CO₂ removal for
//! both application schemes and the farmer economics of each. A survey runs
//! the assessment across a plot set, skipping records that fail validation,
//! and aggregates to survey-wide statistics and area-weighted totals.

use erw_core::climate::ClimateContext;
use erw_core::economics::{
    evaluate, ApplicationScheme, CostParameters, EconomicBenefit, BULK_AMORTISATION_YEARS,
};
use erw_core::errors::{ErwError, ErwResult};
use erw_core::mass_balance::{CO2_PER_KG_CAO, CO2_PER_KG_MGO};
use erw_core::scoring::{score, Rating, ViabilityScore};
use erw_core::soil::SoilPlot;
use erw_core::weathering::{WeatheringRateModel, WeatheringRateParameters};
use log::warn;
use serde::{Deserialize, Serialize};

/// Survey-level configuration: climate, application rates, rock assay and
/// prices.
///
/// All fields default to the Sanguinho campaign values, so a TOML file only
/// needs to name what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Annual rainfall (mm/yr)
    pub annual_rainfall_mm: f64,
    /// Mean annual temperature (°C)
    pub mean_temperature_c: f64,
    /// Recurring basalt application (t/ha/yr)
    pub recurring_basalt_t_ha_yr: f64,
    /// Lime programme the recurring scheme displaces (t/ha/yr)
    pub lime_displaced_t_ha_yr: f64,
    /// One-time bulk basalt application (t/ha)
    pub bulk_basalt_t_ha: f64,
    /// Fraction of applied basalt that weathers per year at multiplier 1
    pub weathering_efficiency: f64,
    /// MgO mass fraction of the rock
    pub basalt_mgo_fraction: f64,
    /// CaO mass fraction of the rock
    pub basalt_cao_fraction: f64,
    /// Unit costs and carbon-credit price
    pub costs: CostParameters,
    /// Weathering-rate model parameters
    pub weathering: WeatheringRateParameters,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            annual_rainfall_mm: 1750.0,
            mean_temperature_c: 18.0,
            recurring_basalt_t_ha_yr: 2.7,
            lime_displaced_t_ha_yr: 3.0,
            bulk_basalt_t_ha: 50.0,
            weathering_efficiency: 0.45,
            basalt_mgo_fraction: 0.08,
            basalt_cao_fraction: 0.10,
            costs: CostParameters::default(),
            weathering: WeatheringRateParameters::default(),
        }
    }
}

impl SurveyConfig {
    /// Parse a configuration from TOML, filling omitted fields with the
    /// campaign defaults.
    pub fn from_toml_str(source: &str) -> ErwResult<Self> {
        toml::from_str(source)
            .map_err(|e| ErwError::Error(format!("invalid survey configuration: {e}")))
    }

    /// The configured site climate.
    pub fn climate(&self) -> ClimateContext {
        ClimateContext::new(self.annual_rainfall_mm, self.mean_temperature_c)
    }
}

/// Assessment outcome for a single plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotAssessment {
    /// Plot identifier
    pub plot_id: String,
    /// Soil pH
    pub ph: f64,
    /// Organic matter (%)
    pub organic_matter: f64,
    /// Mg shortfall below the agronomic optimum (cmol(+)/kg)
    pub mg_deficit: f64,
    /// Plot area (ha)
    pub area_ha: f64,
    /// Component viability scores
    pub viability: ViabilityScore,
    /// Rating band for the total score
    pub rating: Rating,
    /// Dimensionless weathering-rate multiplier
    pub weathering_multiplier: f64,
    /// Net-of-nothing CO₂ removal under the recurring scheme (t/ha/yr)
    pub recurring_co2_t_ha_yr: f64,
    /// Average CO₂ removal under the bulk scheme over its amortisation
    /// horizon (t/ha/yr)
    pub bulk_co2_t_ha_yr: f64,
    /// Farmer economics of the recurring scheme
    pub recurring_benefit: EconomicBenefit,
    /// Farmer economics of the bulk scheme
    pub bulk_benefit: EconomicBenefit,
}

/// Gross CO₂ (t/ha/yr) from weathering `basalt_kg_ha_yr` of rock, scaled by
/// the plot's rate multiplier.
fn plot_co2_t_ha_yr(basalt_kg_ha_yr: f64, config: &SurveyConfig, multiplier: f64) -> f64 {
    let weathered = basalt_kg_ha_yr * config.weathering_efficiency;
    let per_kg = config.basalt_mgo_fraction * CO2_PER_KG_MGO
        + config.basalt_cao_fraction * CO2_PER_KG_CAO;
    weathered * per_kg * multiplier / 1000.0
}

/// Assess a single plot under a survey configuration.
pub fn assess_plot(plot: &SoilPlot, config: &SurveyConfig) -> ErwResult<PlotAssessment> {
    let climate = config.climate();
    let viability = score(plot, &climate)?;
    let model = WeatheringRateModel::from_parameters(config.weathering);
    let multiplier = model.rate_multiplier(plot, &climate)?;

    let recurring_co2_t_ha_yr =
        plot_co2_t_ha_yr(config.recurring_basalt_t_ha_yr * 1000.0, config, multiplier);
    // Bulk: the whole application weathers over the amortisation horizon
    let bulk_co2_t_ha_yr = plot_co2_t_ha_yr(config.bulk_basalt_t_ha * 1000.0, config, multiplier)
        / BULK_AMORTISATION_YEARS;

    let recurring_scheme = ApplicationScheme::Recurring {
        lime_displaced_t_ha_yr: config.lime_displaced_t_ha_yr,
        basalt_t_ha_yr: config.recurring_basalt_t_ha_yr,
    };
    let bulk_scheme = ApplicationScheme::OneTimeBulk {
        basalt_t_ha: config.bulk_basalt_t_ha,
    };
    let recurring_benefit = evaluate(&recurring_scheme, recurring_co2_t_ha_yr, &config.costs)?;
    let bulk_benefit = evaluate(&bulk_scheme, bulk_co2_t_ha_yr, &config.costs)?;

    Ok(PlotAssessment {
        plot_id: plot.plot_id.clone(),
        ph: plot.ph,
        organic_matter: plot.organic_matter,
        mg_deficit: plot.mg_deficit(),
        area_ha: plot.area_ha,
        rating: viability.rating(),
        viability,
        weathering_multiplier: multiplier,
        recurring_co2_t_ha_yr,
        bulk_co2_t_ha_yr,
        recurring_benefit,
        bulk_benefit,
    })
}

/// Survey-wide aggregation over the assessed plots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveySummary {
    /// Per-plot assessments, in survey order
    pub assessments: Vec<PlotAssessment>,
}

impl SurveySummary {
    /// Number of assessed plots.
    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    /// Mean total viability score (0 for an empty survey).
    pub fn mean_viability(&self) -> f64 {
        mean(self.assessments.iter().map(|a| a.viability.total()))
    }

    /// Sample standard deviation of the total viability score
    /// (0 when fewer than two plots).
    pub fn std_viability(&self) -> f64 {
        sample_std(self.assessments.iter().map(|a| a.viability.total()))
    }

    /// Mean weathering-rate multiplier.
    pub fn mean_multiplier(&self) -> f64 {
        mean(self.assessments.iter().map(|a| a.weathering_multiplier))
    }

    /// Total surveyed area (ha).
    pub fn total_area_ha(&self) -> f64 {
        self.assessments.iter().map(|a| a.area_ha).sum()
    }

    /// Area-weighted total CO₂ removal under the recurring scheme (t/yr).
    pub fn total_recurring_co2_t_yr(&self) -> f64 {
        self.assessments
            .iter()
            .map(|a| a.recurring_co2_t_ha_yr * a.area_ha)
            .sum()
    }

    /// Area-weighted total farmer benefit under the recurring scheme
    /// (EUR/yr).
    pub fn total_recurring_benefit_eur_yr(&self) -> f64 {
        self.assessments
            .iter()
            .map(|a| a.recurring_benefit.total_benefit_eur_ha_yr * a.area_ha)
            .sum()
    }

    /// The plot with the highest total viability score.
    pub fn best_plot(&self) -> Option<&PlotAssessment> {
        self.assessments.iter().max_by(|a, b| {
            a.viability
                .total()
                .partial_cmp(&b.viability.total())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn sample_std(values: impl Iterator<Item = f64>) -> f64 {
    let collected: Vec<f64> = values.collect();
    if collected.len() < 2 {
        return 0.0;
    }
    let m = collected.iter().sum::<f64>() / collected.len() as f64;
    let variance = collected.iter().map(|v| (v - m).powi(2)).sum::<f64>()
        / (collected.len() - 1) as f64;
    variance.sqrt()
}

/// Assess every plot in a survey.
///
/// Plots that fail validation are logged and skipped rather than failing
/// the whole survey.
pub fn survey(plots: &[SoilPlot], config: &SurveyConfig) -> SurveySummary {
    let assessments = plots
        .iter()
        .filter_map(|plot| match assess_plot(plot, config) {
            Ok(assessment) => Some(assessment),
            Err(e) => {
                warn!("skipping plot {}: {}", plot.plot_id, e);
                None
            }
        })
        .collect();
    SurveySummary { assessments }
}
