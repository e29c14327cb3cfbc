//! Breakdown command - one row per disposed asset

use super::{format_aud, log_warnings, RequestArgs};
use cgtcalc::core::{calculate_with, AssetBreakdown, CgtResults};
use clap::Args;
use rust_decimal::Decimal;
use std::io;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BreakdownCommand {
    #[command(flatten)]
    request: RequestArgs,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

impl BreakdownCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (inputs, options) = self.request.load()?;
        let results = calculate_with(&inputs, &options);
        log_warnings(&results);

        if self.csv {
            write_csv(&results)
        } else {
            print_table(&results);
            Ok(())
        }
    }
}

/// Row for the breakdown table and CSV output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
struct BreakdownRow {
    #[tabled(rename = "#")]
    row_num: usize,
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Proceeds")]
    proceeds: String,
    #[tabled(rename = "Cost Base")]
    cost_base: String,
    #[tabled(rename = "Capital Gain")]
    capital_gain: String,
    #[tabled(rename = "Discounted Gain")]
    discounted_gain: String,
    #[tabled(rename = "Loss")]
    loss: String,
}

impl BreakdownRow {
    fn new(row_num: usize, row: &AssetBreakdown, as_csv: bool) -> Self {
        let amount = |value: Decimal| {
            if as_csv {
                format!("{:.2}", value)
            } else {
                format_aud(value)
            }
        };
        let loss = if row.is_loss {
            // losses are pooled at the raw amount
            amount(row.cost_base - row.proceeds)
        } else {
            String::new()
        };
        BreakdownRow {
            row_num,
            asset: row.asset_id.clone(),
            proceeds: amount(row.proceeds),
            cost_base: amount(row.cost_base),
            capital_gain: amount(row.capital_gain),
            discounted_gain: amount(row.discounted_gain),
            loss,
        }
    }
}

fn rows(results: &CgtResults, as_csv: bool) -> Vec<BreakdownRow> {
    results
        .asset_breakdown
        .iter()
        .enumerate()
        .map(|(i, row)| BreakdownRow::new(i + 1, row, as_csv))
        .collect()
}

fn print_table(results: &CgtResults) {
    let rows = rows(results, false);
    if rows.is_empty() {
        println!("No assets");
        return;
    }

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!(
        "Discounted gains: {} | Losses available: {} | Net capital gain: {}",
        format_aud(results.discounted_gains_total),
        format_aud(results.losses_available),
        format_aud(results.net_capital_gain)
    );
}

fn write_csv(results: &CgtResults) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in rows(results, true) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
