//! Schema command - print expected input formats

use cgtcalc::core::CgtInputs;
use cgtcalc::input::AssetRecord;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for a calculation request
    JsonSchema,
    /// CSV header row for an assets file
    CsvHeader,
    /// Assets CSV column descriptions
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => self.print_json_schema(),
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields(),
        }
    }

    fn print_json_schema(&self) -> anyhow::Result<()> {
        let schema = schema_for!(CgtInputs);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        Ok(())
    }

    fn print_csv_header(&self) -> anyhow::Result<()> {
        println!("{}", AssetRecord::csv_header());
        Ok(())
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Assets CSV Format");
        println!("=================");
        println!();
        for field in AssetRecord::csv_schema() {
            let req = if field.required { "required" } else { "optional" };
            println!("{:22} ({:8})  {}", field.name, req, field.description);
        }
        println!();
        println!("Amounts may include thousands separators and currency symbols.");
        Ok(())
    }
}
