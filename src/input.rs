//! Reading calculation requests and asset lists.
//!
//! Amounts typed by people arrive as text (`"1,250.00"`, `"$900"`, `""`), so
//! the CSV reader sanitizes them with [`parse_amount`] rather than rejecting
//! them. JSON requests carry numbers and are deserialized directly.

use crate::core::{Asset, CgtInputs, IncomeYear};
use cgtcalc_derive::CsvSchema;
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid JSON request: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid assets CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: sale date {sale} is before purchase date {purchase}")]
    SaleBeforePurchase {
        row: usize,
        purchase: NaiveDate,
        sale: NaiveDate,
    },
    #[error("unsupported income year '{0}', expected one of 2023-2024, 2024-2025, 2025-2026")]
    UnknownIncomeYear(String),
}

/// Column metadata generated by `#[derive(CsvSchema)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvField {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// One row of an assets CSV file
#[derive(Debug, Clone, Default, Serialize, Deserialize, CsvSchema)]
pub struct AssetRecord {
    /// Identifier shown in the breakdown, defaults to asset-N
    #[serde(default)]
    pub id: Option<String>,
    /// Purchase price, thousands separators allowed
    pub purchase_price: String,
    /// Incidental costs added to the cost base
    #[serde(default)]
    pub additional_costs: Option<String>,
    /// Sale price (capital proceeds)
    pub sale_price: String,
    /// true if held 12 months or more, derived from the dates when empty
    #[serde(default)]
    pub held_over_12_months: Option<bool>,
    /// Acquisition date (YYYY-MM-DD)
    #[serde(default)]
    pub purchase_date: Option<String>,
    /// Disposal date (YYYY-MM-DD)
    #[serde(default)]
    pub sale_date: Option<String>,
}

impl AssetRecord {
    /// Convert a 1-based CSV row into an engine asset
    pub fn into_asset(self, row: usize) -> Result<Asset, InputError> {
        let id = non_empty(self.id).unwrap_or_else(|| format!("asset-{row}"));
        let purchase_date = parse_date(self.purchase_date, row)?;
        let sale_date = parse_date(self.sale_date, row)?;

        let owned_more_than_12_months = match (self.held_over_12_months, purchase_date, sale_date) {
            (Some(held), _, _) => held,
            (None, Some(purchase), Some(sale)) => {
                if sale < purchase {
                    return Err(InputError::SaleBeforePurchase {
                        row,
                        purchase,
                        sale,
                    });
                }
                held_more_than_12_months(purchase, sale)
            }
            (None, _, _) => true,
        };

        Ok(Asset {
            id,
            owned_more_than_12_months,
            purchase_price: parse_amount(&self.purchase_price),
            additional_costs: self
                .additional_costs
                .as_deref()
                .map_or(Decimal::ZERO, parse_amount),
            sale_price: parse_amount(&self.sale_price),
        })
    }
}

/// Turn typed amount text into a number.
///
/// Thousands separators and any character other than a digit or `.` are
/// dropped. Empty or unparsable text counts as zero.
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// The discount requires the asset to be owned for at least 12 months,
/// not counting the days of acquisition and disposal.
pub fn held_more_than_12_months(purchase: NaiveDate, sale: NaiveDate) -> bool {
    purchase
        .checked_add_months(Months::new(12))
        .is_some_and(|anniversary| sale > anniversary)
}

pub fn parse_income_year(s: &str) -> Result<IncomeYear, InputError> {
    IncomeYear::from_str(s).map_err(InputError::UnknownIncomeYear)
}

/// Read a JSON request. Missing fields take their defaults and assets
/// without an id are numbered `asset-1`, `asset-2`, ...
pub fn read_request_json<R: Read>(reader: R) -> Result<CgtInputs, InputError> {
    let mut inputs: CgtInputs = serde_json::from_reader(reader)?;
    number_unnamed_assets(&mut inputs.assets);
    log::debug!(
        "Read request for {} with {} asset(s)",
        inputs.income_year,
        inputs.assets.len()
    );
    Ok(inputs)
}

/// Read assets from CSV, keeping file order.
pub fn read_assets_csv<R: Read>(reader: R) -> Result<Vec<Asset>, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut assets = Vec::new();
    for (i, record) in rdr.deserialize::<AssetRecord>().enumerate() {
        assets.push(record?.into_asset(i + 1)?);
    }
    log::debug!("Read {} asset(s) from CSV", assets.len());
    Ok(assets)
}

fn number_unnamed_assets(assets: &mut [Asset]) {
    for (i, asset) in assets.iter_mut().enumerate() {
        if asset.id.trim().is_empty() {
            asset.id = format!("asset-{}", i + 1);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_date(value: Option<String>, row: usize) -> Result<Option<NaiveDate>, InputError> {
    match non_empty(value) {
        None => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| InputError::InvalidDate { row, value }),
    }
}
