//! Currency formatting utilities for TPC and tapyrus values
//!
//! Provides standardised formatting for displaying amounts in both TPC
//! and tapyrus units for better readability and precision.

/// Tapyrus per TPC
const TAPYRUS_PER_TPC: f64 = 100_000_000.0;

/// Format a tapyrus amount as dual TPC + tapyrus display
///
/// # Examples
/// ```
/// use tapyrus_node_tools::utils::currency::format_tapyrus_as_tpc;
///
/// assert_eq!(
///     format_tapyrus_as_tpc(150000000),
///     "1.50000000 TPC (150000000 tapyrus)"
/// );
/// assert_eq!(
///     format_tapyrus_as_tpc(5471),
///     "0.00005471 TPC (5471 tapyrus)"
/// );
/// ```
pub fn format_tapyrus_as_tpc(tapyrus: u64) -> String {
    let tpc = tapyrus as f64 / TAPYRUS_PER_TPC;
    format!("{:.8} TPC ({} tapyrus)", tpc, tapyrus)
}
