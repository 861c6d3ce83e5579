//! FILENAME: app/src/main.rs
// PURPOSE: Command-line entry point. Log lines go to stderr, the report path to stdout.
// FORMAT: seq|level|category|message

fn main() {
    if let Err(e) = sheetstage_lib::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
