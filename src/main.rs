use anyhow::Context;
use budget_ledger::Budget;
use budget_ledger::chart;
use budget_ledger::engine::InputRecord;
use csv::Trim;
use simple_logger::SimpleLogger;
use std::io::{self, Write};
use std::path::PathBuf;
use std::{env, error::Error, ffi::OsString, fs::File};

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new().env().init()?;

    log::debug!("Application started");

    log::debug!("Budget script processing: Starting");
    let budget = process_script()?;
    log::debug!("Budget script processing: Done");

    log::debug!("Writing category reports and spend chart to stdout: Started");
    write_to_std_out(&budget)?;
    log::debug!("Writing category reports and spend chart to stdout: Done");

    log::debug!("Application finished");

    Ok(())
}

fn get_first_arg() -> Result<OsString, Box<dyn Error>> {
    match env::args_os().nth(1) {
        None => Err(From::from("expected 1 argument, but got none")),
        Some(file_path) => Ok(file_path),
    }
}

fn process_script() -> Result<Budget, Box<dyn Error>> {
    let file_path = get_first_arg()?;
    let path = PathBuf::from(file_path);
    log::debug!("Extracted filepath from args: {path:?}");

    Ok(process_script_from_filepath(&path)?)
}

fn process_script_from_filepath(filepath: &PathBuf) -> anyhow::Result<Budget> {
    let file = File::open(filepath)
        .with_context(|| format!("cannot open budget script {}", filepath.display()))?;

    let mut rdr = csv::ReaderBuilder::new().trim(Trim::All).from_reader(file);

    let mut budget = Budget::new();

    log::debug!("Started deserialising records");
    for (line, result) in rdr.deserialize::<InputRecord>().enumerate() {
        log::debug!("Deserialising record into InputRecord: {result:?}");
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Error deserializing record:{e}");
                continue;
            }
        };
        log::debug!("Converting InputRecord into Operation: {record:?}");
        let op = match record.to_operation() {
            Ok(op) => op,
            Err(e) => {
                log::warn!("Skipping record {}: {e}", line + 1);
                continue;
            }
        };
        log::debug!("Applying operation to budget: {op:?}");
        if let Err(e) = budget.apply(&op) {
            log::warn!(
                "Error applying {:?} record {} for category={}: {}",
                record.typ,
                line + 1,
                record.category,
                e
            );
        }
    }
    Ok(budget)
}

pub fn write_to_std_out(budget: &Budget) -> Result<(), Box<dyn Error>> {
    let mut out = io::stdout().lock();

    log::debug!("Starting category report rendering");
    for category in budget.categories() {
        log::debug!("Rendering category report: {}", category.name());
        writeln!(out, "{category}")?;
        writeln!(out)?;
    }

    out.flush()?;
    drop(out);

    log::debug!("Category reports done -> Drawing spend chart");
    chart::create_spend_chart(budget.categories())?;

    Ok(())
}
