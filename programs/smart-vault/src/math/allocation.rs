use anchor_lang::prelude::*;

use crate::constants::{DEPOSIT_TOLERANCE_BPS, FULL_PERCENT, MAX_ASSETS};
use crate::errors::ErrorCode;
use crate::math::{fraction, PRECISION};

/// Cap applied to ideal-ratio vectors before they enter factor math so the
/// weight * ratio * rate product stays well inside u128.
const RATIO_SCALE: u128 = 1_000_000;

/// Splits a flushed deposit across strategies in proportion to allocation
/// weight and each strategy's ideal asset ratio. Per-asset sums equal the
/// input exactly; rounding dust goes to a designated strategy, never lost.
pub fn distribute_deposit(
    amounts: &[u64],
    weights: &[u64],
    ratios: &[[u64; MAX_ASSETS]],
    rates: &[u64],
) -> Result<Vec<[u64; MAX_ASSETS]>> {
    if weights.is_empty() || weights.len() != ratios.len() {
        return Err(ErrorCode::InvalidStrategySet.into());
    }
    if amounts.is_empty() || amounts.len() != rates.len() || amounts.len() > MAX_ASSETS {
        return Err(ErrorCode::InvalidAssetList.into());
    }

    if amounts.len() == 1 {
        return distribute_single_asset(amounts[0], weights);
    }

    let factors = flush_factors(weights, ratios, rates)?;
    let mut distribution = vec![[0u64; MAX_ASSETS]; weights.len()];

    for (a, amount) in amounts.iter().enumerate() {
        let ideal: u128 = factors.iter().map(|f| f[a]).sum();
        if ideal == 0 {
            if *amount > 0 {
                return Err(ErrorCode::InvalidStrategySet.into());
            }
            continue;
        }

        let mut assigned = 0u64;
        for (s, factor) in factors.iter().enumerate() {
            let part = (*amount as u128 * factor[a] / ideal) as u64;
            distribution[s][a] = part;
            assigned += part;
        }
        // first strategy absorbs the per-asset rounding dust
        distribution[0][a] += amount - assigned;
    }

    Ok(distribution)
}

/// Rejects caller-supplied deposits whose asset ratio strays more than
/// DEPOSIT_TOLERANCE_BPS (relative) from the vault's ideal ratio. Exactly on
/// the boundary passes.
pub fn check_deposit_ratio(
    amounts: &[u64],
    weights: &[u64],
    ratios: &[[u64; MAX_ASSETS]],
    rates: &[u64],
) -> Result<()> {
    if amounts.len() == 1 {
        return Ok(());
    }
    if amounts.iter().all(|a| *a == 0) {
        return Err(ErrorCode::ZeroValue.into());
    }

    let factors = flush_factors(weights, ratios, rates)?;
    let ideal_total: u128 = factors.iter().flat_map(|f| &f[..amounts.len()]).sum();

    let usd: Vec<u128> = amounts
        .iter()
        .zip(rates.iter())
        .map(|(amount, rate)| *amount as u128 * *rate as u128)
        .collect();
    let usd_total: u128 = usd.iter().sum();

    for (a, usd_amount) in usd.iter().enumerate() {
        let ideal: u128 = factors.iter().map(|f| f[a]).sum();

        let deposit_share = fraction(*usd_amount, usd_total);
        let ideal_share = fraction(ideal, ideal_total);

        let deviation = deposit_share.abs_diff(ideal_share);
        if deviation * FULL_PERCENT as u128 > ideal_share * DEPOSIT_TOLERANCE_BPS as u128 {
            return Err(ErrorCode::DepositRatioViolation.into());
        }
    }

    Ok(())
}

fn distribute_single_asset(amount: u64, weights: &[u64]) -> Result<Vec<[u64; MAX_ASSETS]>> {
    let total_weight: u64 = weights.iter().sum();
    if total_weight == 0 {
        return Err(ErrorCode::InvalidAllocation.into());
    }

    let mut distribution = vec![[0u64; MAX_ASSETS]; weights.len()];
    let mut assigned = 0u64;

    for (s, weight) in weights.iter().enumerate() {
        distribution[s][0] = (amount as u128 * *weight as u128 / total_weight as u128) as u64;
        assigned += distribution[s][0];
    }
    // last strategy absorbs the rounding dust
    if let Some(last) = distribution.last_mut() {
        last[0] += amount - assigned;
    }

    Ok(distribution)
}

/// Flush factor per (strategy, asset): the PRECISION-scaled USD fraction of
/// the overall deposit that strategy wants in that asset, i.e.
/// `weight * idealRatio * rate / usdValueOfOneIdealBasket`.
fn flush_factors(
    weights: &[u64],
    ratios: &[[u64; MAX_ASSETS]],
    rates: &[u64],
) -> Result<Vec<[u128; MAX_ASSETS]>> {
    let num_assets = rates.len();
    let mut factors = vec![[0u128; MAX_ASSETS]; weights.len()];

    for (s, weight) in weights.iter().enumerate() {
        let scaled = scale_ratio(&ratios[s][..num_assets]);
        let norm: u128 = scaled
            .iter()
            .zip(rates.iter())
            .map(|(ratio, rate)| ratio * *rate as u128)
            .sum();
        if norm == 0 {
            return Err(ErrorCode::InvalidStrategySet.into());
        }

        for a in 0..num_assets {
            factors[s][a] = *weight as u128 * scaled[a] * rates[a] as u128 * PRECISION
                / norm
                / FULL_PERCENT as u128;
        }
    }

    Ok(factors)
}

fn scale_ratio(ratio: &[u64]) -> Vec<u128> {
    let max = ratio.iter().copied().max().unwrap_or(0) as u128;
    if max <= RATIO_SCALE {
        return ratio.iter().map(|r| *r as u128).collect();
    }

    ratio
        .iter()
        .map(|r| *r as u128 * RATIO_SCALE / max)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::USD_UNIT;

    const RATE: u64 = USD_UNIT;

    #[test]
    fn two_strategy_fair_distribution() {
        let distribution = distribute_deposit(
            &[1_000],
            &[7_000, 3_000],
            &[[1, 0, 0, 0], [1, 0, 0, 0]],
            &[RATE],
        )
        .unwrap();

        assert_eq!(distribution[0][0], 700);
        assert_eq!(distribution[1][0], 300);
    }

    #[test]
    fn single_asset_dust_goes_to_last_strategy() {
        let distribution = distribute_deposit(
            &[100],
            &[3_333, 3_333, 3_334],
            &[[1, 0, 0, 0]; 3],
            &[RATE],
        )
        .unwrap();

        let total: u64 = distribution.iter().map(|d| d[0]).sum();
        assert_eq!(total, 100);
        // 33 + 33 + (33 dust-adjusted to 34)
        assert_eq!(distribution[2][0], 34);
    }

    #[test]
    fn conservation_holds_for_arbitrary_weights() {
        let weight_vectors: [&[u64]; 4] = [
            &[10_000],
            &[1, 9_999],
            &[2_500, 2_500, 5_000],
            &[123, 4_567, 890, 4_420],
        ];
        let amounts = [1_000_000_007u64];

        for weights in weight_vectors {
            let ratios = vec![[1, 0, 0, 0]; weights.len()];
            let distribution =
                distribute_deposit(&amounts, weights, &ratios, &[RATE]).unwrap();
            let total: u64 = distribution.iter().map(|d| d[0]).sum();
            assert_eq!(total, amounts[0]);
        }
    }

    #[test]
    fn multi_asset_conservation_is_exact_per_asset() {
        let amounts = [1_000_003u64, 777_777];
        let weights = [6_000, 4_000];
        let ratios = [[1, 1, 0, 0], [1, 3, 0, 0]];
        let rates = [RATE, 2 * RATE];

        let distribution = distribute_deposit(&amounts, &weights, &ratios, &rates).unwrap();

        for a in 0..2 {
            let total: u64 = distribution.iter().map(|d| d[a]).sum();
            assert_eq!(total, amounts[a]);
        }
    }

    #[test]
    fn equal_ratio_splits_by_weight_in_both_assets() {
        let distribution = distribute_deposit(
            &[1_000, 500],
            &[7_000, 3_000],
            &[[2, 1, 0, 0], [2, 1, 0, 0]],
            &[RATE, 2 * RATE],
        )
        .unwrap();

        assert_eq!(distribution[0][0], 700);
        assert_eq!(distribution[1][0], 300);
        assert_eq!(distribution[0][1], 350);
        assert_eq!(distribution[1][1], 150);
    }

    #[test]
    fn ratio_check_boundary_is_inclusive() {
        let weights = [10_000];
        let ratios = [[1, 1, 0, 0]];
        let rates = [RATE, RATE];

        assert!(check_deposit_ratio(&[1_000, 1_000], &weights, &ratios, &rates).is_ok());
        // ~50 bps off the ideal 50/50 split still passes
        assert!(check_deposit_ratio(&[1_010, 1_000], &weights, &ratios, &rates).is_ok());
        // one more unit crosses the tolerance
        assert!(check_deposit_ratio(&[1_011, 1_000], &weights, &ratios, &rates).is_err());
    }

    #[test]
    fn single_asset_ratio_is_always_acceptable() {
        assert!(check_deposit_ratio(&[123], &[10_000], &[[1, 0, 0, 0]], &[RATE]).is_ok());
    }

    #[test]
    fn large_ratio_vectors_do_not_overflow() {
        let amounts = [u64::MAX / 2, u64::MAX / 2];
        let weights = [5_000, 5_000];
        let ratios = [[u64::MAX / 3, u64::MAX / 5, 0, 0]; 2];
        let rates = [1_000 * RATE, 3 * RATE];

        let distribution = distribute_deposit(&amounts, &weights, &ratios, &rates).unwrap();
        for a in 0..2 {
            let total: u64 = distribution.iter().map(|d| d[a]).sum();
            assert_eq!(total, amounts[a]);
        }
    }
}
