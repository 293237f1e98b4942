//! Core components for modelling enhanced rock weathering (ERW) on
//! agricultural soils
//!
//! ERW spreads crushed silicate rock (here, basalt) on farmland; the rock
//! dissolves in soil water and draws down atmospheric CO₂ as bicarbonate.
//! This crate provides the building blocks of that assessment as small,
//! pure components:
//!
//! - [`soil`] and [`climate`]: the input data model (soil survey records and
//!   site climate)
//! - [`scoring`]: a 0-100 viability score ranking plots for ERW suitability
//! - [`weathering`]: a dimensionless multiplier on the baseline dissolution
//!   rate from pH, organic matter and rainfall
//! - [`mass_balance`]: gross CO₂ capture from rock stoichiometry, minus
//!   upstream (grinding and transport) emissions, to a net removal
//! - [`uncertainty`]: quadrature propagation of the dominant error sources
//!   to a 95 % confidence interval
//! - [`economics`]: farmer-side costs, savings and carbon-credit revenue
//! - [`sensitivity`]: Cartesian sweeps of the mass balance over parameter
//!   grids
//!
//! Every component validates its inputs and returns
//! [`errors::ErwResult`]; none of them perform I/O.

pub mod climate;
pub mod economics;
pub mod errors;
pub mod mass_balance;
pub mod scoring;
pub mod sensitivity;
pub mod soil;
pub mod uncertainty;
pub mod weathering;
