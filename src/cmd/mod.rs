pub mod breakdown;
pub mod brackets;
pub mod calculate;
pub mod schema;

use anyhow::Context;
use cgtcalc::core::{BracketPolicy, CalculationOptions, CgtInputs, CgtResults, IncomeYear, MedicarePolicy};
use cgtcalc::input::{self, parse_amount, parse_income_year};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use std::convert::Infallible;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Where a calculation request comes from. Flags override the request file.
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// JSON request file, or "-" to read from stdin
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// CSV file of disposed assets, replacing any assets in the request
    #[arg(short, long)]
    assets: Option<PathBuf>,

    /// Annual taxable income before the gain (e.g. 90,000)
    #[arg(short, long, value_parser = amount_arg)]
    income: Option<Decimal>,

    /// Income year (e.g. 2025-2026)
    #[arg(short, long, value_parser = parse_income_year)]
    year: Option<IncomeYear>,

    /// Net capital losses from earlier years not yet applied
    #[arg(long, value_parser = amount_arg)]
    prior_losses: Option<Decimal>,

    /// All assets were acquired before 20 September 1985
    #[arg(long = "pre-1985")]
    pre_1985: bool,

    /// Foreign or temporary resident (no CGT discount)
    #[arg(long)]
    foreign: bool,

    /// How the Medicare levy on the gain is worked out
    #[arg(long, value_enum, default_value_t = MedicareArg::Delta)]
    medicare: MedicareArg,

    /// Which income tax brackets apply
    #[arg(long, value_enum, default_value_t = BracketsArg::Fixed)]
    brackets: BracketsArg,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum MedicareArg {
    /// 2% of the income tax on the gain
    #[default]
    Delta,
    /// 2% of taxable income above the low income threshold
    Income,
}

impl From<MedicareArg> for MedicarePolicy {
    fn from(arg: MedicareArg) -> Self {
        match arg {
            MedicareArg::Delta => MedicarePolicy::default(),
            MedicareArg::Income => MedicarePolicy::on_taxable_income(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum BracketsArg {
    /// Current resident rates for every income year
    #[default]
    Fixed,
    /// Rates legislated for the selected income year
    PerYear,
}

impl From<BracketsArg> for BracketPolicy {
    fn from(arg: BracketsArg) -> Self {
        match arg {
            BracketsArg::Fixed => BracketPolicy::Fixed,
            BracketsArg::PerYear => BracketPolicy::PerYear,
        }
    }
}

impl RequestArgs {
    /// Build the request from the file(s) given, then apply flag overrides
    pub fn load(&self) -> anyhow::Result<(CgtInputs, CalculationOptions)> {
        let mut inputs = match &self.request {
            Some(path) => read_request(path)?,
            None => CgtInputs::default(),
        };

        if let Some(path) = &self.assets {
            let file = File::open(path)
                .with_context(|| format!("Failed to open assets file {}", path.display()))?;
            inputs.assets = input::read_assets_csv(BufReader::new(file))
                .with_context(|| format!("Failed to read assets from {}", path.display()))?;
        }
        if let Some(income) = self.income {
            inputs.annual_taxable_income = income;
        }
        if let Some(year) = self.year {
            inputs.income_year = year;
        }
        if let Some(losses) = self.prior_losses {
            inputs.has_unapplied_losses = true;
            inputs.unapplied_losses_amount = losses;
        }
        if self.pre_1985 {
            inputs.assets_purchased_before_1985 = true;
        }
        if self.foreign {
            inputs.foreign_or_temporary_resident = true;
        }

        let options = CalculationOptions {
            medicare: self.medicare.into(),
            brackets: self.brackets.into(),
        };
        log::info!(
            "Calculating {} with {} asset(s), {:?} brackets",
            inputs.income_year,
            inputs.assets.len(),
            options.brackets
        );
        Ok((inputs, options))
    }
}

fn amount_arg(s: &str) -> Result<Decimal, Infallible> {
    Ok(parse_amount(s))
}

fn read_request(path: &Path) -> anyhow::Result<CgtInputs> {
    if path.as_os_str() == "-" {
        let mut buffer = Vec::new();
        BufReader::new(io::stdin().lock()).read_to_end(&mut buffer)?;
        if buffer.is_empty() {
            anyhow::bail!("No input received. Provide a request file or pipe JSON to stdin.");
        }
        Ok(input::read_request_json(io::Cursor::new(buffer))?)
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open request file {}", path.display()))?;
        input::read_request_json(BufReader::new(file))
            .with_context(|| format!("Failed to read request {}", path.display()))
    }
}

pub fn log_warnings(results: &CgtResults) {
    for warning in &results.warnings {
        log::warn!("{}", warning);
    }
}

fn format_aud(amount: Decimal) -> String {
    cgtcalc::core::format_money(amount, &cgtcalc::core::AUD, 2)
}

fn format_pct(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}
