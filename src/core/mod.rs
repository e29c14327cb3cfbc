pub mod brackets;
pub mod cgt;
pub mod medicare;
pub mod money;
pub mod warnings;
pub mod year;

// Flat public surface for domain types and functions.
pub use brackets::{BracketTable, TaxBracket, PRE_STAGE_3, STAGE_3};
pub use cgt::{
    calculate, calculate_with, Asset, AssetBreakdown, CalculationOptions, CgtInputs, CgtResults,
    CGT_DISCOUNT_FACTOR,
};
pub use medicare::MedicarePolicy;
pub use money::{bounded, format_money, non_negative, round_cents, CurrencyFormat, AUD, MAX_AMOUNT};
pub use warnings::{AssetField, Warning};
pub use year::{BracketPolicy, IncomeYear};
