use super::medicare::MedicarePolicy;
use super::money::{bounded, non_negative, round_cents, MAX_AMOUNT};
use super::warnings::{AssetField, Warning};
use super::year::{BracketPolicy, IncomeYear};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Share of an eligible gain that is taxable under the discount method
pub const CGT_DISCOUNT_FACTOR: Decimal = dec!(0.5);

/// A disposed capital asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Identifier used to correlate breakdown rows with inputs
    #[serde(default)]
    pub id: String,
    /// Held for at least 12 months before disposal
    #[serde(default = "default_true")]
    pub owned_more_than_12_months: bool,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub purchase_price: Decimal,
    /// Incidental acquisition, holding and disposal costs
    #[serde(default)]
    #[schemars(with = "f64")]
    pub additional_costs: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub sale_price: Decimal,
}

fn default_true() -> bool {
    true
}

impl Asset {
    /// An asset with no amounts, held for more than 12 months
    pub fn zeroed(id: impl Into<String>) -> Self {
        Asset {
            id: id.into(),
            owned_more_than_12_months: true,
            purchase_price: Decimal::ZERO,
            additional_costs: Decimal::ZERO,
            sale_price: Decimal::ZERO,
        }
    }
}

/// Everything needed to estimate the tax on one income year's disposals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CgtInputs {
    /// Taxable income before any capital gain
    #[schemars(with = "f64")]
    pub annual_taxable_income: Decimal,
    pub income_year: IncomeYear,
    pub has_unapplied_losses: bool,
    /// Net capital losses from earlier years, used only with `hasUnappliedLosses`
    #[schemars(with = "f64")]
    pub unapplied_losses_amount: Decimal,
    /// Treat every asset as acquired before 20 September 1985
    pub assets_purchased_before_1985: bool,
    pub foreign_or_temporary_resident: bool,
    pub assets: Vec<Asset>,
}

impl Default for CgtInputs {
    fn default() -> Self {
        CgtInputs {
            annual_taxable_income: Decimal::ZERO,
            income_year: IncomeYear::default(),
            has_unapplied_losses: false,
            unapplied_losses_amount: Decimal::ZERO,
            assets_purchased_before_1985: false,
            foreign_or_temporary_resident: false,
            assets: vec![Asset::zeroed("asset-1")],
        }
    }
}

/// Engine policies which are not part of a request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculationOptions {
    pub medicare: MedicarePolicy,
    pub brackets: BracketPolicy,
}

/// Outcome for a single asset, before losses are netted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBreakdown {
    pub asset_id: String,
    pub proceeds: Decimal,
    pub cost_base: Decimal,
    /// Gain before discount, zero for a loss
    pub capital_gain: Decimal,
    /// Gain after any discount
    pub discounted_gain: Decimal,
    pub is_loss: bool,
}

impl AssetBreakdown {
    fn exempt(asset_id: &str) -> Self {
        AssetBreakdown {
            asset_id: asset_id.to_string(),
            proceeds: Decimal::ZERO,
            cost_base: Decimal::ZERO,
            capital_gain: Decimal::ZERO,
            discounted_gain: Decimal::ZERO,
            is_loss: false,
        }
    }
}

/// Tax attributable to the year's capital gains
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CgtResults {
    pub income_year: IncomeYear,
    pub asset_breakdown: Vec<AssetBreakdown>,
    pub discounted_gains_total: Decimal,
    pub current_year_losses: Decimal,
    pub prior_unapplied_losses: Decimal,
    pub losses_available: Decimal,
    pub losses_applied_this_year: Decimal,
    pub net_capital_gain: Decimal,
    pub loss_carry_forward: Decimal,
    pub taxable_income_with_gain: Decimal,
    pub tax_without_gain: Decimal,
    pub tax_with_gain: Decimal,
    /// Income tax attributable to the net capital gain
    pub cgt_payable: Decimal,
    /// Medicare levy attributable to the net capital gain
    pub medicare_levy: Decimal,
    pub total_tax_liability: Decimal,
    pub warnings: Vec<Warning>,
}

/// Estimate tax on the gains with the default policies.
pub fn calculate(inputs: &CgtInputs) -> CgtResults {
    calculate_with(inputs, &CalculationOptions::default())
}

/// Estimate tax on the gains.
///
/// The tax on the gain is the difference between income tax on
/// `annual_taxable_income + net_capital_gain` and income tax on
/// `annual_taxable_income` alone. Every monetary value is rounded to cents
/// before it is combined further.
pub fn calculate_with(inputs: &CgtInputs, options: &CalculationOptions) -> CgtResults {
    let mut warnings = Vec::new();
    let discount_allowed = !inputs.foreign_or_temporary_resident;

    if inputs.assets.is_empty() {
        warnings.push(Warning::NoAssets);
    } else if inputs.assets_purchased_before_1985 {
        warnings.push(Warning::PreCgtExemptionApplied {
            asset_count: inputs.assets.len(),
        });
    }

    let mut asset_breakdown = Vec::with_capacity(inputs.assets.len());
    let mut discounted_gains_total = Decimal::ZERO;
    let mut current_year_losses = Decimal::ZERO;

    for asset in &inputs.assets {
        if inputs.assets_purchased_before_1985 {
            asset_breakdown.push(AssetBreakdown::exempt(&asset.id));
            continue;
        }
        let (breakdown, raw_gain) = assess_asset(asset, discount_allowed, &mut warnings);
        if raw_gain < Decimal::ZERO {
            current_year_losses = round_cents(current_year_losses + raw_gain.abs());
        }
        discounted_gains_total = round_cents(discounted_gains_total + breakdown.discounted_gain);
        asset_breakdown.push(breakdown);
    }

    let prior_unapplied_losses = if inputs.has_unapplied_losses {
        if inputs.unapplied_losses_amount < Decimal::ZERO {
            warnings.push(Warning::NegativePriorLossesClamped);
        } else if inputs.unapplied_losses_amount > MAX_AMOUNT {
            warnings.push(Warning::PriorLossesCapped);
        }
        round_cents(non_negative(bounded(inputs.unapplied_losses_amount)))
    } else {
        if inputs.unapplied_losses_amount > Decimal::ZERO {
            warnings.push(Warning::UnappliedLossesIgnored);
        }
        Decimal::ZERO
    };
    let losses_available = round_cents(prior_unapplied_losses + current_year_losses);

    let losses_applied_this_year = round_cents(discounted_gains_total.min(losses_available));
    let net_capital_gain = non_negative(round_cents(discounted_gains_total - losses_available));
    let loss_carry_forward = if net_capital_gain.is_zero() {
        round_cents(losses_available - discounted_gains_total)
    } else {
        Decimal::ZERO
    };
    log::debug!(
        "Netting: gains={}, current losses={}, prior losses={}, applied={}, net={}, carry forward={}",
        discounted_gains_total,
        current_year_losses,
        prior_unapplied_losses,
        losses_applied_this_year,
        net_capital_gain,
        loss_carry_forward
    );

    if inputs.annual_taxable_income < Decimal::ZERO {
        warnings.push(Warning::NegativeIncomeClamped);
    } else if inputs.annual_taxable_income > MAX_AMOUNT {
        warnings.push(Warning::IncomeCapped);
    }
    let base_income = round_cents(non_negative(bounded(inputs.annual_taxable_income)));
    let taxable_income_with_gain = round_cents(base_income + net_capital_gain);

    let table = inputs.income_year.brackets(options.brackets);
    let tax_without_gain = table.income_tax(base_income);
    let tax_with_gain = table.income_tax(taxable_income_with_gain);
    let cgt_payable = round_cents(tax_with_gain - tax_without_gain);
    let medicare_levy =
        options
            .medicare
            .levy_on_gain(cgt_payable, base_income, taxable_income_with_gain);
    let total_tax_liability = cgt_payable + medicare_levy;
    log::debug!(
        "{} ({}): tax without gain={}, with gain={}, on gain={}, levy={}",
        inputs.income_year,
        table.name,
        tax_without_gain,
        tax_with_gain,
        cgt_payable,
        medicare_levy
    );

    CgtResults {
        income_year: inputs.income_year,
        asset_breakdown,
        discounted_gains_total,
        current_year_losses,
        prior_unapplied_losses,
        losses_available,
        losses_applied_this_year,
        net_capital_gain,
        loss_carry_forward,
        taxable_income_with_gain,
        tax_without_gain,
        tax_with_gain,
        cgt_payable,
        medicare_levy,
        total_tax_liability,
        warnings,
    }
}

/// Breakdown row for one asset, plus its undiscounted gain (negative for a loss)
fn assess_asset(
    asset: &Asset,
    discount_allowed: bool,
    warnings: &mut Vec<Warning>,
) -> (AssetBreakdown, Decimal) {
    for (field, amount) in [
        (AssetField::PurchasePrice, asset.purchase_price),
        (AssetField::AdditionalCosts, asset.additional_costs),
        (AssetField::SalePrice, asset.sale_price),
    ] {
        if amount < Decimal::ZERO {
            warnings.push(Warning::NegativeAmountClamped {
                asset_id: asset.id.clone(),
                field,
            });
        }
        if amount.abs() > MAX_AMOUNT {
            warnings.push(Warning::AssetAmountCapped {
                asset_id: asset.id.clone(),
                field,
            });
        }
    }

    let proceeds = round_cents(non_negative(bounded(asset.sale_price)));
    let cost_base = round_cents(non_negative(
        bounded(asset.purchase_price) + bounded(asset.additional_costs),
    ));
    let raw_gain = proceeds - cost_base;
    let is_loss = raw_gain < Decimal::ZERO;

    let discounted_gain = if raw_gain > Decimal::ZERO {
        if asset.owned_more_than_12_months && discount_allowed {
            round_cents(raw_gain * CGT_DISCOUNT_FACTOR)
        } else {
            raw_gain
        }
    } else {
        Decimal::ZERO
    };

    log::debug!(
        "Asset {}: proceeds={}, cost base={}, gain={}, discounted={}",
        asset.id,
        proceeds,
        cost_base,
        raw_gain,
        discounted_gain
    );

    let breakdown = AssetBreakdown {
        asset_id: asset.id.clone(),
        proceeds,
        cost_base,
        capital_gain: non_negative(raw_gain),
        discounted_gain,
        is_loss,
    };
    (breakdown, raw_gain)
}
