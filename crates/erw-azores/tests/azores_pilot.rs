//! End-to-end assessment of the Sao Miguel pilot, from survey data to
//! island-scale context.

use approx::assert_relative_eq;
use erw_azores::island::{AgriculturalIntegration, EmissionsContext};
use erw_azores::parameters::{
    full_erw_scenario, lime_replacement_scenario, sao_miguel_climate,
};
use erw_azores::plots::sanguinho_plots;
use erw_azores::resource::{assess_resource, default_extraction_scenarios, ResourceParameters};
use erw_azores::survey::{survey, SurveyConfig};
use erw_core::mass_balance::compute_balance;
use erw_core::scoring::Rating;
use erw_core::sensitivity::SensitivitySweep;
use erw_core::uncertainty::{propagate, UncertaintyComponents, Z_95};

#[test]
fn pilot_mass_balance_golden_numbers() {
    // Lime-replacement scenario over a decade on a 2 ha plot
    let result = compute_balance(&lime_replacement_scenario(), 10.0, 2.0).unwrap();
    assert_relative_eq!(result.gross_co2_t_ha_yr, 0.020238, epsilon = 5e-7);
    assert_relative_eq!(result.upstream_t_ha_yr, 0.0162, max_relative = 1e-12);
    assert_relative_eq!(result.net_co2_t_ha_yr, 0.004038, epsilon = 5e-7);
    // Upstream emissions eat most of the gross at this application rate
    assert!(result.upstream_pct_of_gross > 75.0);
}

#[test]
fn pilot_full_erw_outperforms_lime_replacement() {
    let recurring = compute_balance(&lime_replacement_scenario(), 10.0, 2.0).unwrap();
    let bulk = compute_balance(&full_erw_scenario(), 10.0, 2.0).unwrap();
    assert!(bulk.net_co2_t_ha_yr > recurring.net_co2_t_ha_yr);
    assert_relative_eq!(
        bulk.gross_co2_t_ha_yr,
        recurring.gross_co2_t_ha_yr * 50.0 / 2.7,
        max_relative = 1e-12
    );
}

#[test]
fn pilot_uncertainty_interval() {
    let result = compute_balance(&lime_replacement_scenario(), 10.0, 2.0).unwrap();
    let interval = propagate(&result, &UncertaintyComponents::default()).unwrap();
    assert_relative_eq!(
        interval.combined_uncertainty,
        0.1925_f64.sqrt(),
        max_relative = 1e-12
    );
    assert_relative_eq!(
        interval.upper_bound_t_ha_yr,
        result.net_co2_t_ha_yr * (1.0 + 0.1925_f64.sqrt() * Z_95),
        max_relative = 1e-12
    );
    assert!(interval.lower_bound_t_ha_yr < interval.central_estimate_t_ha_yr);
}

#[test]
fn pilot_sensitivity_sweep() {
    let sweep = SensitivitySweep::new(
        lime_replacement_scenario(),
        vec![0.20, 0.30, 0.45, 0.60, 0.70],
        vec![1500.0, 1650.0, 1750.0, 1850.0, 2000.0],
        vec![2.7, 5.0, 10.0, 25.0, 50.0],
        10.0,
        2.0,
    )
    .unwrap();
    assert_eq!(sweep.len(), 125);

    // The best corner of the grid is the wettest, most efficient, heaviest
    // application
    let best = sweep
        .iter()
        .max_by(|(_, a), (_, b)| a.net_co2_t_ha_yr.partial_cmp(&b.net_co2_t_ha_yr).unwrap())
        .unwrap();
    assert_relative_eq!(best.0.weathering_efficiency, 0.70);
    assert_relative_eq!(best.0.annual_rainfall_mm, 2000.0);
    assert_relative_eq!(best.0.application_rate_t_ha, 50.0);

    let matrix = sweep.matrix(2.7).unwrap();
    assert_eq!(matrix.shape(), &[5, 5]);
}

#[test]
fn sanguinho_survey_ranks_plot_seven_highest() {
    let summary = survey(&sanguinho_plots(), &SurveyConfig::default());
    assert_eq!(summary.len(), 11);

    let best = summary.best_plot().unwrap();
    assert_eq!(best.plot_id, "J. Moleiro 7");
    assert_relative_eq!(best.viability.total(), 92.0);
    assert_eq!(best.rating, Rating::Exceptional);

    // The whole survey sits in viable territory (worst is plot 11 at 77)
    for assessment in &summary.assessments {
        assert!(
            assessment.viability.total() >= 70.0,
            "plot {} scored {}",
            assessment.plot_id,
            assessment.viability.total()
        );
    }
}

#[test]
fn sanguinho_survey_economics_favour_recurring_scheme() {
    let summary = survey(&sanguinho_plots(), &SurveyConfig::default());
    for assessment in &summary.assessments {
        // Displacing the lime programme pays on every plot
        assert!(
            assessment.recurring_benefit.total_benefit_eur_ha_yr > 0.0,
            "plot {} recurring benefit {}",
            assessment.plot_id,
            assessment.recurring_benefit.total_benefit_eur_ha_yr
        );
        assert!(assessment.recurring_benefit.cost_savings_eur_ha_yr > 0.0);
    }
    assert!(summary.total_recurring_benefit_eur_yr() > 0.0);
}

#[test]
fn island_resource_outlasts_any_plausible_programme() {
    let parameters = ResourceParameters::default();
    let assessment = assess_resource(&parameters).unwrap();
    assert_relative_eq!(assessment.in_situ_mt, 7486.5, max_relative = 1e-12);
    assert_relative_eq!(assessment.accessible_mt, 3743.25, max_relative = 1e-12);

    for scenario in default_extraction_scenarios() {
        let outlook = scenario.outlook(&assessment, &parameters).unwrap();
        assert!(
            outlook.depletion_years > 10_000.0,
            "{} depletes in {} years",
            outlook.name,
            outlook.depletion_years
        );
    }
}

#[test]
fn island_scale_context() {
    let emissions = EmissionsContext::default();
    let integration = AgriculturalIntegration::default();

    let annual_cdr = integration.annual_cdr_t_co2().unwrap();
    assert_relative_eq!(annual_cdr, 60_000.0);

    // Full agricultural deployment offsets under a tenth of island emissions
    let share = emissions.erw_share_pct(annual_cdr).unwrap();
    assert_relative_eq!(share, 60.0 / 7.0, max_relative = 1e-12);
    assert!(share < 10.0);

    // But demands more basalt than the conservative quarrying rate supplies
    let demand = integration.annual_basalt_demand_t().unwrap();
    assert!(demand > default_extraction_scenarios()[0].extraction_t_yr);
}

#[test]
fn survey_config_round_trips_through_toml() {
    let config = SurveyConfig::default();
    let serialised = toml::to_string(&config).expect("serialization failed");
    let parsed = SurveyConfig::from_toml_str(&serialised).unwrap();
    assert_eq!(config, parsed);
}

#[test]
fn climate_matches_scenario_rainfall() {
    let climate = sao_miguel_climate();
    assert_relative_eq!(climate.annual_rainfall_mm, 1750.0);
    assert_relative_eq!(
        lime_replacement_scenario().annual_rainfall_mm,
        climate.annual_rainfall_mm
    );
}
