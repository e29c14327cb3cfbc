use super::money::{format_money, AUD, MAX_AMOUNT};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Non-fatal notes attached to a calculation. They never change the numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum Warning {
    /// An asset amount was negative and treated as zero.
    NegativeAmountClamped { asset_id: String, field: AssetField },
    /// An asset amount was beyond `MAX_AMOUNT` and capped.
    AssetAmountCapped { asset_id: String, field: AssetField },
    /// Annual taxable income was beyond `MAX_AMOUNT` and capped.
    IncomeCapped,
    /// Prior unapplied losses were beyond `MAX_AMOUNT` and capped.
    PriorLossesCapped,
    /// Annual taxable income was negative and treated as zero.
    NegativeIncomeClamped,
    /// Prior unapplied losses were negative and treated as zero.
    NegativePriorLossesClamped,
    /// Losses were supplied without the unapplied-losses flag and ignored.
    UnappliedLossesIgnored,
    /// All assets were acquired before 20 September 1985 and are exempt.
    PreCgtExemptionApplied { asset_count: usize },
    /// The request contained no assets.
    NoAssets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AssetField {
    PurchasePrice,
    AdditionalCosts,
    SalePrice,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::NegativeAmountClamped { asset_id, field } => {
                write!(f, "{asset_id}: negative {field} treated as zero")
            }
            Warning::AssetAmountCapped { asset_id, field } => {
                write!(f, "{asset_id}: {field} capped at {}", max_amount())
            }
            Warning::IncomeCapped => write!(f, "taxable income capped at {}", max_amount()),
            Warning::PriorLossesCapped => write!(f, "prior losses capped at {}", max_amount()),
            Warning::NegativeIncomeClamped => write!(f, "negative taxable income treated as zero"),
            Warning::NegativePriorLossesClamped => {
                write!(f, "negative prior losses treated as zero")
            }
            Warning::UnappliedLossesIgnored => {
                write!(f, "unapplied losses amount ignored because the flag is not set")
            }
            Warning::PreCgtExemptionApplied { asset_count } => {
                write!(f, "{asset_count} asset(s) treated as pre-CGT and exempt")
            }
            Warning::NoAssets => write!(f, "no assets supplied"),
        }
    }
}

fn max_amount() -> String {
    format_money(MAX_AMOUNT, &AUD, 0)
}

impl std::fmt::Display for AssetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssetField::PurchasePrice => "purchase price",
            AssetField::AdditionalCosts => "additional costs",
            AssetField::SalePrice => "sale price",
        };
        write!(f, "{name}")
    }
}
