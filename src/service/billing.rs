//! Billing calculator: volume → monetary amount under a fixed tariff.
//!
//! The tariff is quoted per cubic meter; the per-liter price is derived
//! once at construction and reused for every computation. The two
//! report types round their amounts differently (4 decimals for the
//! live-usage report, 3 for the monthly consumption report); both
//! precisions are part of the external contract and are kept distinct.

/// Converts volume totals into monetary amounts.
///
/// Constructed from an explicit per-cubic-meter tariff so tests can
/// inject alternate tariffs; there is no module-wide constant.
#[derive(Debug, Clone, Copy)]
pub struct BillingCalculator {
    tariff_per_cubic_meter: f64,
    price_per_liter: f64,
}

impl BillingCalculator {
    /// Creates a calculator for the given tariff (currency per m³).
    /// 1 m³ = 1000 L, so the per-liter price is `tariff / 1000`.
    #[must_use]
    pub fn new(tariff_per_cubic_meter: f64) -> Self {
        Self {
            tariff_per_cubic_meter,
            price_per_liter: tariff_per_cubic_meter / 1000.0,
        }
    }

    /// The configured tariff in currency units per cubic meter.
    #[must_use]
    pub const fn tariff_per_cubic_meter(&self) -> f64 {
        self.tariff_per_cubic_meter
    }

    /// Precomputed price in currency units per liter.
    #[must_use]
    pub const fn price_per_liter(&self) -> f64 {
        self.price_per_liter
    }

    /// Amount for the live-usage report: 4-decimal rounding.
    #[must_use]
    pub fn live_amount(&self, liters: f64) -> f64 {
        round_to(liters * self.price_per_liter, 4)
    }

    /// Amount for the monthly consumption report: 3-decimal rounding.
    /// Callers pass the already 2-rounded month total.
    #[must_use]
    pub fn monthly_amount(&self, liters: f64) -> f64 {
        round_to(liters * self.price_per_liter, 3)
    }
}

/// Rounds `value` to `digits` decimal places (half away from zero).
#[must_use]
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10_f64.powi(digits.min(12) as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn per_liter_price_is_tariff_over_1000() {
        let billing = BillingCalculator::new(480.0);
        assert!(approx(billing.price_per_liter(), 0.48));
        assert!(approx(billing.tariff_per_cubic_meter(), 480.0));
    }

    #[test]
    fn monthly_amount_rounds_to_three_decimals() {
        // 1500.00 L at 480/m³ ⇒ 720.000
        let billing = BillingCalculator::new(480.0);
        assert!(approx(billing.monthly_amount(1500.00), 720.000));
        assert!(approx(billing.monthly_amount(1.234), 0.592));
    }

    #[test]
    fn live_amount_rounds_to_four_decimals() {
        let billing = BillingCalculator::new(480.0);
        assert!(approx(billing.live_amount(12.345), 5.9256));
        assert!(approx(billing.live_amount(0.0), 0.0));
    }

    #[test]
    fn alternate_tariffs_are_injectable() {
        let billing = BillingCalculator::new(1000.0);
        assert!(approx(billing.price_per_liter(), 1.0));
        assert!(approx(billing.monthly_amount(2.5), 2.5));
    }

    #[test]
    fn round_to_truncates_trailing_precision() {
        assert!(approx(round_to(1.23456, 2), 1.23));
        assert!(approx(round_to(1.235, 2), 1.24));
        assert!(approx(round_to(-1.235, 2), -1.24));
    }
}
