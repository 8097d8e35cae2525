use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [first, second] = args.as_slice() else {
        eprintln!(
            "Usage: edit_distance <first string> <second string>\n\
             Use \"\" for strings that contain whitespace."
        );
        return ExitCode::FAILURE;
    };

    let start = Instant::now();
    let result = edit_distance::edit_distance(first, second);
    let elapsed = start.elapsed().as_secs_f64();

    println!("First string given: <{first}>");
    println!("Second string given: <{second}>");
    println!("edit distance: [{result}], time: {elapsed:.6}s");
    ExitCode::SUCCESS
}
