use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use msort::sort_by;
use records::{ALL_FIELDS, Record, SortOrder, comparator, field_name, load_records};

fn usage() -> ExitCode {
    eprintln!("Usage: ordered_records <file_name> <asc|desc> [--print]");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        return usage();
    }

    let order = match args[1].as_str() {
        "asc" => SortOrder::Ascending,
        "desc" => SortOrder::Descending,
        _ => return usage(),
    };
    let print_result = match args.get(2).map(String::as_str) {
        Some("--print") => true,
        Some(_) => return usage(),
        None => false,
    };

    match run(Path::new(&args[0]), order, print_result) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ordered_records: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &Path, order: SortOrder, print_result: bool) -> Result<(), Box<dyn Error>> {
    println!("Loading data from file...");
    let records = load_records(path)?;
    println!("Data loaded ({} records)", records.len());

    if records.is_empty() {
        return Ok(());
    }

    println!("\nStart sorting");
    let mut total = 0.0_f64;
    let mut last_sorted: Vec<&Record> = Vec::new();

    for field in ALL_FIELDS {
        // Each field sorts a fresh permutation of the loaded records.
        let mut refs: Vec<&Record> = records.iter().collect();

        let hi = refs.len() - 1;
        let start = Instant::now();
        sort_by(&mut refs, 0, hi, comparator(field, order))?;
        let elapsed = start.elapsed().as_secs_f64();

        println!("{}\t-> {elapsed:.6}s", field_name(field));
        total += elapsed;
        last_sorted = refs;
    }
    println!("total\t-> {total:.6}s");

    if print_result {
        println!();
        for record in &last_sorted {
            println!(
                "ID: {} {} {} {}",
                record.id, record.string_field, record.integer_field, record.float_field
            );
        }
    }
    Ok(())
}
