use super::money::{non_negative, round_cents};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const DEFAULT_LEVY_RATE: Decimal = dec!(0.02);
/// Single-person low income threshold below which no levy is payable
pub const DEFAULT_LOW_INCOME_THRESHOLD: Decimal = dec!(27222);

/// Rule used to attribute Medicare levy to a capital gain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicarePolicy {
    /// Levy is a fixed share of the income tax attributable to the gain
    OnTaxDelta { rate: Decimal },
    /// Levy applies to taxable income; the gain bears the difference between
    /// the levy with and without it
    OnTaxableIncome {
        rate: Decimal,
        low_income_threshold: Decimal,
    },
}

impl Default for MedicarePolicy {
    fn default() -> Self {
        MedicarePolicy::OnTaxDelta {
            rate: DEFAULT_LEVY_RATE,
        }
    }
}

impl MedicarePolicy {
    pub fn on_taxable_income() -> Self {
        MedicarePolicy::OnTaxableIncome {
            rate: DEFAULT_LEVY_RATE,
            low_income_threshold: DEFAULT_LOW_INCOME_THRESHOLD,
        }
    }

    /// Levy attributable to the gain, in cents.
    pub fn levy_on_gain(
        &self,
        tax_on_gain: Decimal,
        income_without_gain: Decimal,
        income_with_gain: Decimal,
    ) -> Decimal {
        match *self {
            MedicarePolicy::OnTaxDelta { rate } => round_cents(tax_on_gain * rate),
            MedicarePolicy::OnTaxableIncome {
                rate,
                low_income_threshold,
            } => {
                let levy = |income: Decimal| {
                    if income <= low_income_threshold {
                        Decimal::ZERO
                    } else {
                        round_cents(income * rate)
                    }
                };
                non_negative(levy(income_with_gain) - levy(income_without_gain))
            }
        }
    }

    pub fn display(&self) -> String {
        match self {
            MedicarePolicy::OnTaxDelta { rate } => {
                format!("{}% of tax on gain", (rate * dec!(100)).normalize())
            }
            MedicarePolicy::OnTaxableIncome { rate, .. } => {
                format!("{}% of taxable income", (rate * dec!(100)).normalize())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_policy_is_default() {
        assert_eq!(
            MedicarePolicy::default(),
            MedicarePolicy::OnTaxDelta { rate: dec!(0.02) }
        );
    }

    #[test]
    fn delta_levy_is_share_of_tax_on_gain() {
        let policy = MedicarePolicy::default();
        assert_eq!(policy.levy_on_gain(dec!(24600), dec!(90000), dec!(165000)), dec!(492));
        assert_eq!(policy.levy_on_gain(dec!(0.25), dec!(0), dec!(0)), dec!(0.01));
        assert_eq!(policy.levy_on_gain(Decimal::ZERO, dec!(90000), dec!(90000)), Decimal::ZERO);
    }

    #[test]
    fn income_levy_on_both_sides_of_threshold() {
        let policy = MedicarePolicy::on_taxable_income();
        // 165000 * 2% - 90000 * 2%
        assert_eq!(policy.levy_on_gain(dec!(24600), dec!(90000), dec!(165000)), dec!(1500));
    }

    #[test]
    fn income_levy_when_gain_crosses_threshold() {
        let policy = MedicarePolicy::on_taxable_income();
        assert_eq!(policy.levy_on_gain(dec!(1000), dec!(20000), dec!(30000)), dec!(600));
    }

    #[test]
    fn income_levy_below_threshold() {
        let policy = MedicarePolicy::on_taxable_income();
        assert_eq!(policy.levy_on_gain(dec!(100), dec!(10000), dec!(27222)), Decimal::ZERO);
    }
}
