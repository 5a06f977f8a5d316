//! Mempool fee analysis
//!
//! Turns raw mempool metadata into the fee-rate distribution handed to the
//! reporting layer:
//!
//! - **fee_distribution** - normalisation, descending fee-rate sort and the
//!   cumulative virtual-size aggregation
//! - **reports** - console, JSON and Plotly renderings of a distribution

pub mod fee_distribution;
pub mod reports;

pub use fee_distribution::{FeeDistribution, MempoolEntry, VSIZE_BIN_WIDTH};
pub use reports::{format_distribution, parse_format, OutputFormat};
