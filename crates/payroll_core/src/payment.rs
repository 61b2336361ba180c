//! Tiered container payment calculation.
//!
//! # Responsibility
//! - Map a container's package count to the total payment for the team.
//! - Split that payment between the two team members.
//!
//! # Invariants
//! - Pure and deterministic: no I/O, no clock, no configuration.
//! - Non-decreasing in `package_count`.
//! - Teams always have exactly two members, so the split is always by two.

/// Number of workers sharing one container payment.
pub const TEAM_SIZE: u32 = 2;

/// Payment below the first tier boundary.
const BASE_PAYMENT: f64 = 60.0;
/// Payment for 1000..=1999 packages.
const SECOND_TIER_PAYMENT: f64 = 85.0;
/// Payment for 2000..=2999 packages, and the floor above 3000.
const THIRD_TIER_PAYMENT: f64 = 100.0;
/// Added for every full thousand packages beyond 3000.
const PER_THOUSAND_BONUS: f64 = 25.0;

/// Returns the total payment (EUR) for one container.
///
/// | packages    | payment                               |
/// |-------------|---------------------------------------|
/// | < 1000      | 60                                    |
/// | 1000..=1999 | 85                                    |
/// | 2000..=2999 | 100                                   |
/// | >= 3000     | 100 + 25 * floor((packages - 3000) / 1000) |
pub fn calculate_payment(package_count: u32) -> f64 {
    match package_count {
        0..=999 => BASE_PAYMENT,
        1_000..=1_999 => SECOND_TIER_PAYMENT,
        2_000..=2_999 => THIRD_TIER_PAYMENT,
        _ => {
            let extra_thousands = (package_count - 3_000) / 1_000;
            THIRD_TIER_PAYMENT + PER_THOUSAND_BONUS * f64::from(extra_thousands)
        }
    }
}

/// Returns one worker's share of a container payment.
pub fn payment_per_worker(payment: f64) -> f64 {
    payment / f64::from(TEAM_SIZE)
}

#[cfg(test)]
mod tests {
    use super::{calculate_payment, payment_per_worker};

    #[test]
    fn tier_boundaries() {
        assert_eq!(calculate_payment(1), 60.0);
        assert_eq!(calculate_payment(500), 60.0);
        assert_eq!(calculate_payment(999), 60.0);
        assert_eq!(calculate_payment(1000), 85.0);
        assert_eq!(calculate_payment(1500), 85.0);
        assert_eq!(calculate_payment(1999), 85.0);
        assert_eq!(calculate_payment(2000), 100.0);
        assert_eq!(calculate_payment(2999), 100.0);
        assert_eq!(calculate_payment(3000), 100.0);
        assert_eq!(calculate_payment(3999), 100.0);
        assert_eq!(calculate_payment(4000), 125.0);
        assert_eq!(calculate_payment(4500), 125.0);
        assert_eq!(calculate_payment(10_000), 275.0);
    }

    #[test]
    fn payment_is_non_decreasing() {
        let mut previous = calculate_payment(1);
        for count in (2..20_000).step_by(7) {
            let current = calculate_payment(count);
            assert!(current >= previous, "payment dropped at {count}");
            previous = current;
        }
    }

    #[test]
    fn extreme_counts_do_not_overflow() {
        let payment = calculate_payment(u32::MAX);
        assert!(payment.is_finite());
        assert!(payment > 100.0);
    }

    #[test]
    fn split_is_exactly_half() {
        for count in [1, 999, 1000, 2500, 3000, 4500, 7321] {
            let payment = calculate_payment(count);
            assert_eq!(payment_per_worker(payment) * 2.0, payment);
        }
        assert_eq!(payment_per_worker(85.0), 42.5);
    }
}
