/// Length of the accrual year in seconds (365 days, no leap handling).
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// APY is stored as a whole percentage, so `1` means 1 %.
pub const PERCENT_DENOMINATOR: u64 = 100;

/// Rate a freshly initialized ledger starts with.
pub const DEFAULT_APY: u32 = 1;

// ── Core accrual ────────────────────────────────────────────────────────────

/// Simple interest earned by `balance` over `elapsed` seconds at
/// `apy_percent`:
///
/// ```text
/// floor(balance × apy_percent × elapsed / (SECONDS_PER_YEAR × 100))
/// ```
///
/// The product is evaluated exactly in `u128`. The balance is split into
/// `q × D + r` against the denominator `D`, so
/// `floor(b × n / D) = q × n + floor(r × n / D)` and the `r × n` term always
/// fits (`r < D ≈ 3.2e9`, `n ≤ u32::MAX × u64::MAX ≈ 7.9e28`).
///
/// Returns `None` only when the true result does not fit an `i128`.
/// Non-positive balances, a zero rate and a zero interval all earn nothing.
#[allow(clippy::arithmetic_side_effects)]
pub fn accrue(balance: i128, apy_percent: u32, elapsed: u64) -> Option<i128> {
    if balance <= 0 || apy_percent == 0 || elapsed == 0 {
        return Some(0);
    }

    let denominator = u128::from(SECONDS_PER_YEAR) * u128::from(PERCENT_DENOMINATOR);
    let rate_time = u128::from(apy_percent) * u128::from(elapsed);

    // balance > 0 was checked above, so the cast is lossless.
    let principal = balance as u128;
    let whole = principal / denominator;
    let rest = principal % denominator;

    let exact = whole
        .checked_mul(rate_time)?
        .checked_add(rest * rate_time / denominator)?;

    i128::try_from(exact).ok()
}

/// Interest owed since `last_settled_at`, with the interval clamped at zero
/// when `now` lies before the last settlement.
pub fn accrue_since(
    balance: i128,
    apy_percent: u32,
    last_settled_at: u64,
    now: u64,
) -> Option<i128> {
    accrue(balance, apy_percent, now.saturating_sub(last_settled_at))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    const TOKEN: i128 = 1_000_000_000_000_000_000;
    const SIX_MONTHS: u64 = 6 * 30 * 86_400;

    #[test]
    fn zero_inputs_earn_nothing() {
        assert_eq!(accrue(0, 10, SIX_MONTHS), Some(0));
        assert_eq!(accrue(1_000, 0, SIX_MONTHS), Some(0));
        assert_eq!(accrue(1_000, 10, 0), Some(0));
        assert_eq!(accrue(-5, 10, SIX_MONTHS), Some(0));
    }

    #[test]
    fn full_year_at_one_percent() {
        assert_eq!(accrue(1_000, 1, SECONDS_PER_YEAR), Some(10));
        assert_eq!(accrue(100 * TOKEN, 1, SECONDS_PER_YEAR), Some(TOKEN));
    }

    #[test]
    fn six_months_at_ten_percent_on_ninety_tokens() {
        // 90e18 × 10 × 15_552_000 / 3_153_600_000
        assert_eq!(
            accrue(90 * TOKEN, 10, SIX_MONTHS),
            Some(4_438_356_164_383_561_643)
        );
    }

    #[test]
    fn division_truncates() {
        // 1 × 100 × 1 / 3_153_600_000 rounds down to zero.
        assert_eq!(accrue(1, 100, 1), Some(0));
        // 99 units for a year at 1 % is 0.99 → 0.
        assert_eq!(accrue(99, 1, SECONDS_PER_YEAR), Some(0));
        assert_eq!(accrue(199, 1, SECONDS_PER_YEAR), Some(1));
    }

    #[test]
    fn matches_naive_formula_when_it_fits() {
        let cases: [(i128, u32, u64); 4] = [
            (90 * TOKEN, 10, SIX_MONTHS),
            (123_456_789, 7, 3_600),
            (TOKEN, 250, 86_400 * 17),
            (3_153_599_999, 3, 1),
        ];
        for (balance, apy, elapsed) in cases {
            let naive = balance * i128::from(apy) * i128::from(elapsed)
                / (i128::from(SECONDS_PER_YEAR) * 100);
            assert_eq!(accrue(balance, apy, elapsed), Some(naive));
        }
    }

    #[test]
    fn large_operands_do_not_panic() {
        // The naive product would overflow i128 here, but the result fits.
        let balance = i128::MAX / 1_000;
        let earned = accrue(balance, 1, SECONDS_PER_YEAR).unwrap();
        assert_eq!(earned, balance / 100);
    }

    #[test]
    fn unrepresentable_result_is_none() {
        assert_eq!(accrue(i128::MAX, u32::MAX, u64::MAX), None);
    }

    #[test]
    fn interval_before_last_settlement_is_clamped() {
        assert_eq!(accrue_since(1_000, 10, 500, 100), Some(0));
        assert_eq!(
            accrue_since(1_000, 100, 100, 100 + SECONDS_PER_YEAR),
            Some(1_000)
        );
    }
}
