use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser, Debug)]
#[command(
    name = "cgtcalc",
    version,
    about = "Estimate Australian capital gains tax using the marginal tax method"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the tax attributable to the year's capital gains
    Calculate(cmd::calculate::CalculateCommand),
    /// Show the gain or loss on each asset
    Breakdown(cmd::breakdown::BreakdownCommand),
    /// Show the income tax brackets applied
    Brackets(cmd::brackets::BracketsCommand),
    /// Print the expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calculate(calculate) => calculate.exec(),
        Command::Breakdown(breakdown) => breakdown.exec(),
        Command::Brackets(brackets) => brackets.exec(),
        Command::Schema(schema) => schema.exec(),
    }
}
