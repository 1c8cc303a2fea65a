use anyhow::{Result, bail};
use comfy_table::Table;

use framemap_cli::catalog;
use framemap_cli::pipeline::{RunReport, RunRequest, execute};

use crate::cli::RunArgs;
use crate::summary::apply_table_style;

pub fn run_mappings() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Mapping set", "Rules", "Description"]);
    apply_table_style(&mut table);
    for entry in catalog::entries() {
        table.add_row(vec![
            entry.name.to_string(),
            entry.mappings().len().to_string(),
            entry.description.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_mapping(args: &RunArgs) -> Result<RunReport> {
    if !args.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got '{}'", args.delimiter);
    }
    let request = RunRequest {
        mapping: args.mapping.clone(),
        input: args.input.clone(),
        output: args.output.clone(),
        delimiter: args.delimiter as u8,
        stats_json: args.stats_json.clone(),
    };
    execute(&request)
}
