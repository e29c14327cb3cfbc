use super::money::round_cents;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A marginal rate that applies to income above `threshold`, up to the
/// threshold of the next bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    const fn new(threshold: Decimal, rate: Decimal) -> Self {
        TaxBracket { threshold, rate }
    }
}

/// Progressive resident income tax schedule. Income up to the first
/// threshold is tax free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketTable {
    pub name: &'static str,
    pub brackets: &'static [TaxBracket],
}

/// Resident rates from 1 July 2024.
pub const STAGE_3: BracketTable = BracketTable {
    name: "Stage 3",
    brackets: &[
        TaxBracket::new(dec!(18200), dec!(0.16)),
        TaxBracket::new(dec!(45000), dec!(0.30)),
        TaxBracket::new(dec!(135000), dec!(0.37)),
        TaxBracket::new(dec!(190000), dec!(0.45)),
    ],
};

/// Resident rates for 2023-24.
pub const PRE_STAGE_3: BracketTable = BracketTable {
    name: "Pre Stage 3",
    brackets: &[
        TaxBracket::new(dec!(18200), dec!(0.19)),
        TaxBracket::new(dec!(45000), dec!(0.325)),
        TaxBracket::new(dec!(120000), dec!(0.37)),
        TaxBracket::new(dec!(180000), dec!(0.45)),
    ],
};

impl BracketTable {
    /// Tax on `income`, summing each band's span times its rate.
    pub fn income_tax(&self, income: Decimal) -> Decimal {
        let mut tax = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            if income <= bracket.threshold {
                break;
            }
            let upper = match self.brackets.get(i + 1) {
                Some(next) => income.min(next.threshold),
                None => income,
            };
            tax += (upper - bracket.threshold) * bracket.rate;
        }
        round_cents(tax)
    }

    /// Rate applying to the next dollar earned above `income`.
    pub fn marginal_rate(&self, income: Decimal) -> Decimal {
        self.brackets
            .iter()
            .rev()
            .find(|b| income >= b.threshold)
            .map_or(Decimal::ZERO, |b| b.rate)
    }

    /// `(from, to, rate)` rows including the tax-free band. `to` is `None`
    /// for the top band.
    pub fn bands(&self) -> Vec<(Decimal, Option<Decimal>, Decimal)> {
        let mut bands = Vec::with_capacity(self.brackets.len() + 1);
        if let Some(first) = self.brackets.first() {
            bands.push((Decimal::ZERO, Some(first.threshold), Decimal::ZERO));
        }
        for (i, bracket) in self.brackets.iter().enumerate() {
            let to = self.brackets.get(i + 1).map(|next| next.threshold);
            bands.push((bracket.threshold, to, bracket.rate));
        }
        bands
    }
}
