//! Sanguinho soil-survey dataset
//!
//! Eleven pasture plots sampled in the Sanguinho area. Concentrations are
//! exchangeable cations in cmol(+)/kg, P and K are Olsen-extractable in
//! mg/kg; each plot covers 2 ha.

use erw_core::soil::SoilPlot;

/// The eleven surveyed Sanguinho plots.
pub fn sanguinho_plots() -> Vec<SoilPlot> {
    let records: [(&str, f64, f64, f64, f64, f64, f64, f64, f64, f64); 11] = [
        ("J. Moleiro 1", 5.6, 10.0, 7.2, 0.6, 0.7, 14.4, 58.0, 45.0, 180.0),
        ("J. Moleiro 2", 5.7, 9.0, 9.1, 0.8, 0.9, 17.9, 60.0, 38.0, 210.0),
        ("J. Moleiro 3", 5.5, 11.0, 6.5, 0.7, 0.6, 13.5, 59.0, 52.0, 170.0),
        ("J. Moleiro 4", 5.5, 10.0, 10.3, 0.9, 1.0, 19.2, 64.0, 41.0, 240.0),
        ("J. Moleiro 5", 5.2, 8.0, 6.0, 0.5, 0.5, 12.0, 58.0, 60.0, 150.0),
        ("J. Moleiro 6", 5.2, 7.0, 5.8, 0.6, 0.5, 11.8, 59.0, 65.0, 145.0),
        ("J. Moleiro 7", 5.3, 12.0, 7.9, 0.7, 0.8, 16.4, 59.0, 48.0, 200.0),
        ("J. Moleiro 8", 5.4, 9.0, 8.4, 0.8, 0.8, 16.0, 63.0, 43.0, 195.0),
        ("J. Moleiro 9", 5.9, 8.0, 11.2, 0.9, 1.1, 20.2, 65.0, 35.0, 260.0),
        ("J. Moleiro 10", 5.7, 9.0, 8.7, 0.7, 0.9, 16.3, 62.0, 40.0, 215.0),
        ("J. Moleiro 11", 6.0, 6.0, 9.8, 1.0, 1.0, 18.8, 63.0, 33.0, 235.0),
    ];
    records
        .into_iter()
        .map(
            |(plot_id, ph, om, ca, mg, k, cec, base_sat, p, k_ext)| SoilPlot {
                plot_id: plot_id.to_string(),
                ph,
                organic_matter: om,
                exchangeable_ca: ca,
                exchangeable_mg: mg,
                exchangeable_k: k,
                cec,
                base_saturation: base_sat,
                p_extractable: p,
                k_extractable: k_ext,
                area_ha: 2.0,
            },
        )
        .collect()
}
