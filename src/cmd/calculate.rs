//! Calculate command - the estimate with the intermediate figures behind it

use super::{format_aud, format_pct, log_warnings, RequestArgs};
use cgtcalc::core::{calculate_with, format_money, CalculationOptions, CgtInputs, CgtResults, AUD};
use clap::Args;

#[derive(Args, Debug)]
pub struct CalculateCommand {
    #[command(flatten)]
    request: RequestArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl CalculateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (inputs, options) = self.request.load()?;
        let results = calculate_with(&inputs, &options);
        log_warnings(&results);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            print_summary(&inputs, &options, &results);
        }
        Ok(())
    }
}

fn print_summary(inputs: &CgtInputs, options: &CalculationOptions, results: &CgtResults) {
    let table = inputs.income_year.brackets(options.brackets);
    let income_without_gain = results.taxable_income_with_gain - results.net_capital_gain;

    println!();
    println!("CAPITAL GAINS TAX ESTIMATE ({})", results.income_year);
    println!(
        "  {} | Amounts in {}",
        results.income_year.period(),
        AUD.code
    );
    println!();
    println!(
        "  Estimated tax on gain: {}",
        format_money(results.total_tax_liability, &AUD, 0)
    );
    println!();

    println!("CAPITAL GAINS");
    println!(
        "  Assets: {} | Discounted gains: {}",
        results.asset_breakdown.len(),
        format_aud(results.discounted_gains_total)
    );
    println!(
        "  Prior losses: {} | Current year losses: {} | Applied: {}",
        format_aud(results.prior_unapplied_losses),
        format_aud(results.current_year_losses),
        format_aud(results.losses_applied_this_year)
    );
    println!(
        "  Net capital gain: {} | Carried forward: {}",
        format_aud(results.net_capital_gain),
        format_aud(results.loss_carry_forward)
    );
    println!();

    println!("INCOME TAX ({} rates)", table.name);
    println!(
        "  Without gain: {} | Tax: {}",
        format_aud(income_without_gain),
        format_aud(results.tax_without_gain)
    );
    println!(
        "  With gain: {} | Tax: {} | Marginal rate: {}",
        format_aud(results.taxable_income_with_gain),
        format_aud(results.tax_with_gain),
        format_pct(table.marginal_rate(results.taxable_income_with_gain))
    );
    println!("  Income tax on gain: {}", format_aud(results.cgt_payable));
    println!(
        "  Medicare levy on gain ({}): {}",
        options.medicare.display(),
        format_aud(results.medicare_levy)
    );
    println!();

    println!(
        "TOTAL TAX LIABILITY: {}",
        format_aud(results.total_tax_liability)
    );
    println!();
}
