//! Brackets command - the resident income tax schedule used for the estimate

use super::{format_aud, format_pct, BracketsArg};
use cgtcalc::core::{BracketPolicy, IncomeYear};
use cgtcalc::input::parse_income_year;
use clap::Args;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BracketsCommand {
    /// Income year (e.g. 2025-2026)
    #[arg(short, long, value_parser = parse_income_year)]
    year: Option<IncomeYear>,

    /// Which income tax brackets apply
    #[arg(long, value_enum, default_value_t = BracketsArg::Fixed)]
    brackets: BracketsArg,
}

#[derive(Debug, Clone, Tabled)]
struct BandRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax to Top of Band")]
    cumulative_tax: String,
}

impl BracketsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let year = self.year.unwrap_or_default();
        let policy: BracketPolicy = self.brackets.into();
        let table = year.brackets(policy);

        let rows: Vec<BandRow> = table
            .bands()
            .into_iter()
            .map(|(from, to, rate)| BandRow {
                from: format_aud(from),
                to: to.map_or("and over".to_string(), format_aud),
                rate: format_pct(rate),
                cumulative_tax: to
                    .map_or(String::new(), |to| format_aud(table.income_tax(to))),
            })
            .collect();

        println!();
        println!("INCOME TAX BRACKETS {} ({} rates)", year, table.name);
        println!("  {}", year.period());
        if policy == BracketPolicy::Fixed && table != year.historical_brackets() {
            println!(
                "  Note: {} rates applied; legislated rates for {} differ (use --brackets per-year)",
                table.name, year
            );
        }
        println!();
        let table = Table::new(&rows)
            .with(Style::rounded())
            .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
        Ok(())
    }
}
