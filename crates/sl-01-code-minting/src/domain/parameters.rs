//! Bloom filter sizing math
//!
//! - FPR = (1 - e^(-kn/m))^k
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal hash functions

use std::f64::consts::LN_2;

/// Upper bound on derived hash counts
pub const MAX_HASH_COUNT: usize = 32;

/// Derived filter sizing
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    /// Number of bits in the filter
    pub size_bits: u64,
    /// Number of hash functions
    pub hash_count: usize,
    /// False positive rate at the sizing capacity
    pub expected_fpr: f64,
}

/// Optimal parameters for `num_items` minted codes at `target_fpr`
///
/// With zero items the smallest legal filter is returned.
pub fn calculate_optimal_parameters(num_items: u64, target_fpr: f64) -> FilterParams {
    if num_items == 0 {
        return FilterParams {
            size_bits: 1,
            hash_count: 1,
            expected_fpr: 1.0,
        };
    }

    let n = num_items as f64;
    let m = ((-n * target_fpr.ln() / (LN_2 * LN_2)).ceil() as u64).max(1);
    let k = optimal_k(m, num_items);

    FilterParams {
        size_bits: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, num_items, k),
    }
}

/// False positive rate of a filter with `m` bits, `k` hashes and `n` items
pub fn calculate_fpr(m: u64, n: u64, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Optimal k for given m and n, clamped to `1..=MAX_HASH_COUNT`
pub fn optimal_k(m: u64, n: u64) -> usize {
    if n == 0 {
        return 1;
    }
    (((m as f64 / n as f64) * LN_2).round() as usize).clamp(1, MAX_HASH_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_parameters_n100_fpr001() {
        // n=100, FPR=0.01 -> k~7, m~959
        let params = calculate_optimal_parameters(100, 0.01);

        assert!(
            (5..=9).contains(&params.hash_count),
            "Expected k~7, got k={}",
            params.hash_count
        );
        assert!(
            (800..=1200).contains(&params.size_bits),
            "Expected m~959, got m={}",
            params.size_bits
        );
        assert!(params.expected_fpr <= 0.01 * 1.1);
    }

    #[test]
    fn test_default_deployment_sizing() {
        // 10^7 bits, 7 hashes: ~1M codes at under 1%
        let fpr = calculate_fpr(10_000_000, 1_000_000, 7);
        assert!(fpr < 0.01, "Expected FPR < 1%, got {}", fpr);
    }

    #[test]
    fn test_fpr_calculation() {
        // m=1000, n=100, k=7 -> ~0.008
        let fpr = calculate_fpr(1000, 100, 7);
        assert!(fpr > 0.005 && fpr < 0.02, "Expected FPR~0.008, got {}", fpr);
        assert_eq!(calculate_fpr(1000, 0, 7), 0.0);
    }

    #[test]
    fn test_zero_items() {
        let params = calculate_optimal_parameters(0, 0.01);
        assert_eq!(params.size_bits, 1);
        assert_eq!(params.hash_count, 1);
    }

    #[test]
    fn test_k_clamped() {
        let params = calculate_optimal_parameters(10, 0.000_000_1);
        assert!(params.hash_count <= MAX_HASH_COUNT);
        assert!(params.hash_count >= 1);
        assert_eq!(optimal_k(1, 1_000_000), 1);
    }

    #[test]
    fn test_more_items_or_lower_fpr_need_more_bits() {
        let base = calculate_optimal_parameters(100, 0.01);
        assert!(calculate_optimal_parameters(1000, 0.01).size_bits > base.size_bits);
        assert!(calculate_optimal_parameters(100, 0.001).size_bits > base.size_bits);
    }
}
