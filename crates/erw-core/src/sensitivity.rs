//! Sensitivity sweeps over mass-balance parameters
//!
//! A [`SensitivitySweep`] evaluates the CO₂ mass balance over the full
//! Cartesian product of three parameter grids: weathering efficiency,
//! annual rainfall and application rate. Grids are validated when the sweep
//! is constructed, so iteration itself is infallible, lazy and restartable.
//!
//! Each evaluation is independent of every other, so a sweep can also be
//! driven in parallel ([`SensitivitySweep::evaluate_par`]); results keep the
//! same deterministic ordering either way.

use crate::errors::{ErwError, ErwResult};
use crate::mass_balance::{balance_unchecked, ErwScenario, MassBalanceResult};
use log::debug;
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One grid point of a sweep; uniquely identifies its evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Weathering efficiency (0-1)
    pub weathering_efficiency: f64,
    /// Annual rainfall (mm/yr)
    pub annual_rainfall_mm: f64,
    /// Basalt application rate (t/ha)
    pub application_rate_t_ha: f64,
}

/// A validated Cartesian sweep over (efficiency, rainfall, rate) grids.
#[derive(Debug, Clone)]
pub struct SensitivitySweep {
    base: ErwScenario,
    efficiencies: Vec<f64>,
    rainfalls: Vec<f64>,
    rates: Vec<f64>,
    years: f64,
    plot_area_ha: f64,
}

impl SensitivitySweep {
    /// Create a sweep from a base scenario and three parameter grids.
    ///
    /// The base scenario supplies everything the grids do not vary (rock
    /// composition, emission intensities, secondary loss). Every grid value
    /// is validated here; empty grids are permitted and yield an empty
    /// sweep.
    pub fn new(
        base: ErwScenario,
        efficiencies: Vec<f64>,
        rainfalls: Vec<f64>,
        rates: Vec<f64>,
        years: f64,
        plot_area_ha: f64,
    ) -> ErwResult<Self> {
        base.validate()?;
        if !years.is_finite() || years <= 0.0 {
            return Err(ErwError::invalid_input("years", years, "> 0"));
        }
        if !plot_area_ha.is_finite() || plot_area_ha <= 0.0 {
            return Err(ErwError::invalid_input("plot_area_ha", plot_area_ha, "> 0"));
        }
        for &efficiency in &efficiencies {
            if !efficiency.is_finite() || !(0.0..=1.0).contains(&efficiency) {
                return Err(ErwError::invalid_input(
                    "weathering_efficiency",
                    efficiency,
                    "within [0, 1]",
                ));
            }
        }
        for &rainfall in &rainfalls {
            if !rainfall.is_finite() || rainfall < 0.0 {
                return Err(ErwError::invalid_input("annual_rainfall_mm", rainfall, ">= 0"));
            }
        }
        for &rate in &rates {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ErwError::invalid_input("application_rate_t_ha", rate, ">= 0"));
            }
        }
        Ok(Self {
            base,
            efficiencies,
            rainfalls,
            rates,
            years,
            plot_area_ha,
        })
    }

    /// Number of grid points in the sweep.
    pub fn len(&self) -> usize {
        self.efficiencies.len() * self.rainfalls.len() * self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate the grid point at a flat index (row-major in
    /// efficiency, rainfall, rate order).
    fn point(&self, index: usize) -> (SweepPoint, MassBalanceResult) {
        let per_efficiency = self.rainfalls.len() * self.rates.len();
        let efficiency = self.efficiencies[index / per_efficiency];
        let rainfall = self.rainfalls[(index / self.rates.len()) % self.rainfalls.len()];
        let rate = self.rates[index % self.rates.len()];

        let mut scenario = self.base.clone();
        scenario.weathering_efficiency = efficiency;
        scenario.annual_rainfall_mm = rainfall;
        scenario.application_rate_t_ha = rate;

        let point = SweepPoint {
            weathering_efficiency: efficiency,
            annual_rainfall_mm: rainfall,
            application_rate_t_ha: rate,
        };
        (point, balance_unchecked(&scenario, self.years, self.plot_area_ha))
    }

    /// Lazy iterator over all grid points. Calling `iter` again restarts
    /// the sweep from the beginning.
    pub fn iter(&self) -> SweepIter<'_> {
        SweepIter {
            sweep: self,
            index: 0,
        }
    }

    /// Evaluate every grid point across the rayon thread pool.
    ///
    /// Results come back in the same order as [`SensitivitySweep::iter`].
    pub fn evaluate_par(&self) -> Vec<(SweepPoint, MassBalanceResult)> {
        debug!("evaluating {} sweep points in parallel", self.len());
        (0..self.len())
            .into_par_iter()
            .map(|index| self.point(index))
            .collect()
    }

    /// 2-D sensitivity matrix of net CO₂ (t/ha/yr) at a fixed application
    /// rate: rows follow the rainfall grid, columns the efficiency grid.
    pub fn matrix(&self, application_rate_t_ha: f64) -> ErwResult<Array2<f64>> {
        if !application_rate_t_ha.is_finite() || application_rate_t_ha < 0.0 {
            return Err(ErwError::invalid_input(
                "application_rate_t_ha",
                application_rate_t_ha,
                ">= 0",
            ));
        }
        debug!(
            "building {}x{} sensitivity matrix at {} t/ha",
            self.rainfalls.len(),
            self.efficiencies.len(),
            application_rate_t_ha
        );
        Ok(Array2::from_shape_fn(
            (self.rainfalls.len(), self.efficiencies.len()),
            |(row, col)| {
                let mut scenario = self.base.clone();
                scenario.weathering_efficiency = self.efficiencies[col];
                scenario.annual_rainfall_mm = self.rainfalls[row];
                scenario.application_rate_t_ha = application_rate_t_ha;
                balance_unchecked(&scenario, self.years, self.plot_area_ha).net_co2_t_ha_yr
            },
        ))
    }
}

impl<'a> IntoIterator for &'a SensitivitySweep {
    type Item = (SweepPoint, MassBalanceResult);
    type IntoIter = SweepIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator state for a sweep; see [`SensitivitySweep::iter`].
pub struct SweepIter<'a> {
    sweep: &'a SensitivitySweep,
    index: usize,
}

impl Iterator for SweepIter<'_> {
    type Item = (SweepPoint, MassBalanceResult);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.sweep.len() {
            return None;
        }
        let item = self.sweep.point(self.index);
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.sweep.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SweepIter<'_> {}
