pub mod allocation;

/// Fixed-point scale shared by the proportional math in this module.
pub const PRECISION: u128 = 1_000_000_000_000;

/// PRECISION-scaled part/total that cannot overflow for any u128 inputs.
pub fn fraction(part: u128, total: u128) -> u128 {
    if total == 0 {
        0
    } else if total >= PRECISION {
        part / (total / PRECISION)
    } else {
        part * PRECISION / total
    }
}

/// `amount * part / total`, rounded down, safe for any u128 part/total.
pub fn proportion(amount: u64, part: u128, total: u128) -> u64 {
    (amount as u128 * fraction(part, total) / PRECISION) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportion_is_exact_for_round_fractions() {
        assert_eq!(proportion(1_000_000, 400, 1_000), 400_000);
        assert_eq!(proportion(1_000_000, 0, 1_000), 0);
        assert_eq!(proportion(1_000_000, 1_000, 1_000), 1_000_000);
    }

    #[test]
    fn proportion_survives_huge_usd_totals() {
        let total = u128::MAX / 2;
        let part = total / 4;
        assert_eq!(proportion(1_000_000, part, total), 250_000);
    }
}
