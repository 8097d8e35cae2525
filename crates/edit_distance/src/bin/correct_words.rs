use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use edit_distance::{DICTIONARY_DELIMITERS, TEXT_DELIMITERS, best_corrections, split_words};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [file, dictionary] = args.as_slice() else {
        eprintln!("Usage: correct_words <file to be corrected> <dictionary>");
        return ExitCode::FAILURE;
    };

    match run(Path::new(file), Path::new(dictionary)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("correct_words: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(file: &Path, dictionary_path: &Path) -> Result<(), Box<dyn Error>> {
    println!("Loading file...");
    let words = split_words(&fs::read_to_string(file)?, &TEXT_DELIMITERS);

    println!("Loading dictionary...");
    let dictionary = split_words(&fs::read_to_string(dictionary_path)?, &DICTIONARY_DELIMITERS);

    println!("\nCorrecting {} words against {} entries", words.len(), dictionary.len());
    let start = Instant::now();
    let corrections: Vec<_> = words
        .iter()
        .map(|word| best_corrections(word, &dictionary))
        .collect();
    let elapsed = start.elapsed().as_secs_f64();

    for found in &corrections {
        println!("{}", found.word);
        for candidate in &found.candidates {
            println!("|-- {candidate}");
        }
        println!("*-> edit distance: {}\n", found.min_distance);
    }
    println!("Execution time: {elapsed:.6}s");
    Ok(())
}
