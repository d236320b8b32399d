//! Derived metrics for report tables.
//!
//! Percentages and the estimated peak are computed into fresh values; the
//! summary they come from is only ever borrowed.

use std::collections::BTreeMap;

/// Heuristic multiplier for the estimated peak flowrate
pub const PEAK_FLOW_FACTOR: f64 = 1.2;

/// One row of the equipment distribution table
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionShare {
    pub label: String,
    pub count: u64,
    /// 0.0..=100.0, unrounded
    pub percentage: f64,
}

/// Share of `count` in `total` as a percentage; 0.0 when `total` is zero.
pub fn percentage(count: u64, total: u128) -> f64 {
    if total == 0 { 0.0 } else { count as f64 / total as f64 * 100.0 }
}

/// Calculate distribution shares, sorted ascending by label.
///
/// The denominator is the sum of all counts, so the shares add up to 100
/// whenever any equipment was counted. Summed in `u128` so that any set of
/// `u64` counts fits.
pub fn distribution_shares(distribution: &BTreeMap<String, u64>) -> Vec<DistributionShare> {
    let total: u128 = distribution.values().map(|&c| u128::from(c)).sum();
    distribution
        .iter()
        .map(|(label, &count)| DistributionShare { label: label.clone(), count, percentage: percentage(count, total) })
        .collect()
}

/// Placeholder peak estimate: average scaled by [`PEAK_FLOW_FACTOR`].
pub fn estimated_peak_flowrate(avg_flowrate: f64) -> f64 {
    avg_flowrate * PEAK_FLOW_FACTOR
}

/// Two-decimal fixed display used for every measured value
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

/// One-decimal display with percent sign, for distribution shares
pub fn percent1(value: f64) -> String {
    format!("{:.1}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(entries: &[(&str, u64)]) -> BTreeMap<String, u64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_three_seven_split() {
        let shares = distribution_shares(&dist(&[("B", 7), ("A", 3)]));
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].label, "A");
        assert_eq!(percent1(shares[0].percentage), "30.0%");
        assert_eq!(percent1(shares[1].percentage), "70.0%");
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_distribution_has_no_shares() {
        assert!(distribution_shares(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_zero_total_yields_zero_percent() {
        assert_eq!(percentage(0, 0), 0.0);
        let shares = distribution_shares(&dist(&[("Pump", 0), ("Valve", 0)]));
        assert!(shares.iter().all(|s| s.percentage == 0.0));
    }

    #[test]
    fn test_thirds_sum_within_rounding() {
        let shares = distribution_shares(&dist(&[("A", 1), ("B", 1), ("C", 1)]));
        let displayed: Vec<String> = shares.iter().map(|s| percent1(s.percentage)).collect();
        assert_eq!(displayed, vec!["33.3%", "33.3%", "33.3%"]);
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let shares = distribution_shares(&dist(&[("A", u64::MAX), ("B", 1)]));
        assert_eq!(percent1(shares[0].percentage), "100.0%");
        assert_eq!(percent1(shares[1].percentage), "0.0%");
        let sum: f64 = shares.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_estimated_peak() {
        assert_eq!(fixed2(estimated_peak_flowrate(100.0)), "120.00");
        assert_eq!(fixed2(estimated_peak_flowrate(0.0)), "0.00");
        assert_eq!(fixed2(estimated_peak_flowrate(-10.0)), "-12.00");
    }

    #[test]
    fn test_fixed2_formatting() {
        assert_eq!(fixed2(12.345678), "12.35");
        assert_eq!(fixed2(7.0), "7.00");
    }
}
