//! Fee-rate distribution over the pending-transaction pool
//!
//! The distribution answers "how much chain-space is occupied by
//! transactions paying at least this rate": entries sorted by fee rate
//! descending, paired index-for-index with a running virtual-size total.

use serde::Serialize;
use std::cmp::Ordering;
use tracing::warn;

use crate::rpc::RawMempoolEntry;

/// Histogram bin width in vbytes
pub const VSIZE_BIN_WIDTH: u64 = 50_000;

/// One pending transaction, normalised for analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MempoolEntry {
    pub txid: String,
    /// Fee in tapyrus
    pub fee: u64,
    /// Virtual size in vbytes
    pub vsize: u64,
    /// Derived: fee / vsize, in tapyrus per vbyte
    pub fee_rate: f64,
}

/// Fee-rate distribution of one mempool snapshot
///
/// Invariants: `entries` is sorted by `fee_rate` descending (ties keep
/// fetch order) and `cumulative_vsize[i]` is the vsize sum of
/// `entries[0..=i]`, so the cumulative sequence is non-decreasing.
#[derive(Debug, Clone, Serialize)]
pub struct FeeDistribution {
    pub entries: Vec<MempoolEntry>,
    pub cumulative_vsize: Vec<u64>,
    /// Zero-vsize entries excluded from the distribution
    pub skipped_degenerate: usize,
}

impl FeeDistribution {
    /// Build the distribution from raw node replies
    ///
    /// Fees arrive in display units and are converted to tapyrus with the
    /// configured units-per-coin ratio. Entries with zero virtual size are
    /// degenerate: they are skipped with a warning and counted, never
    /// aborting the analysis.
    pub fn build<I>(raw: I, units_per_coin: f64) -> Self
    where
        I: IntoIterator<Item = (String, RawMempoolEntry)>,
    {
        let mut skipped = 0;
        let mut entries: Vec<MempoolEntry> = raw
            .into_iter()
            .filter_map(|(txid, entry)| {
                if entry.vsize == 0 {
                    warn!("skipping zero-vsize mempool entry {}", txid);
                    skipped += 1;
                    return None;
                }
                let fee = (entry.fee * units_per_coin).round() as u64;
                Some(MempoolEntry {
                    txid,
                    fee,
                    vsize: entry.vsize,
                    fee_rate: fee as f64 / entry.vsize as f64,
                })
            })
            .collect();

        // sort_by is stable, so equal rates keep their fetch order
        entries.sort_by(|a, b| {
            b.fee_rate
                .partial_cmp(&a.fee_rate)
                .unwrap_or(Ordering::Equal)
        });

        let mut cumulative_vsize = Vec::with_capacity(entries.len());
        let mut total = 0u64;
        for entry in &entries {
            total += entry.vsize;
            cumulative_vsize.push(total);
        }

        Self {
            entries,
            cumulative_vsize,
            skipped_degenerate: skipped,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fee-rate sequence in sorted (non-increasing) order
    pub fn fee_rates(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.fee_rate).collect()
    }

    /// Cumulative sizes scaled to megabytes for the chart sink, which
    /// performs no further unit conversion
    pub fn cumulative_megabytes(&self) -> Vec<f64> {
        self.cumulative_vsize
            .iter()
            .map(|&v| v as f64 / 1e6)
            .collect()
    }

    /// Total virtual size of the distribution in vbytes
    pub fn total_vsize(&self) -> u64 {
        self.cumulative_vsize.last().copied().unwrap_or(0)
    }

    /// Bin the sorted entries into (lowest rate in bin, bin vsize) pairs
    ///
    /// Walking from the highest rate down, a bin closes once it exceeds
    /// `bin_width` vbytes and the rate changes; each pair reads as "this
    /// much vsize pays at least this rate".
    pub fn histogram(&self, bin_width: u64) -> Vec<(f64, u64)> {
        let mut histogram = Vec::new();
        let mut bin_size = 0u64;
        let mut last_fee_rate = 0.0;
        for entry in &self.entries {
            if bin_size > bin_width && last_fee_rate != entry.fee_rate {
                histogram.push((last_fee_rate, bin_size));
                bin_size = 0;
            }
            last_fee_rate = entry.fee_rate;
            bin_size += entry.vsize;
        }
        if bin_size > 0 {
            histogram.push((last_fee_rate, bin_size));
        }
        histogram
    }
}
