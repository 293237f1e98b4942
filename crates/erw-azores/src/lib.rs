//! Sao Miguel (Azores) case study for enhanced rock weathering
//!
//! Applies the `erw-core` components to a concrete setting: volcanic
//! pasture soils around Sanguinho on Sao Miguel island, where basalt is
//! quarried locally and annual rainfall is high enough to sustain fast
//! weathering.
//!
//! # Module Organisation
//!
//! - `parameters`: island climate and the reference application scenarios
//! - `plots`: the Sanguinho soil-survey dataset
//! - `survey`: per-plot viability assessment and survey-wide aggregation
//! - `resource`: island-scale basalt resource assessment and extraction
//!   outlooks
//! - `island`: island emissions context and agricultural integration
//!   ceilings

pub mod island;
pub mod parameters;
pub mod plots;
pub mod resource;
pub mod survey;
