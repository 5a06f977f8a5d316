//! Shared data types

pub mod visualisation;

pub use visualisation::{PlotlyChart, PlotlyLayout, PlotlyTrace};
