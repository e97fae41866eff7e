use std::env;
use std::path::Path;

use revenue_report_rs::{RateTable, ReportBuilder, ReportSession, convert_to_usd};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: build_report <transactions-folder> <rates-file.xlsx> [start end]");
        std::process::exit(1);
    }

    let mut session = ReportSession::load(Path::new(&args[1]));
    if !session.has_data() {
        println!("No data was combined.");
        return Ok(());
    }
    println!("Loaded {} transactions.", session.dataset().len());

    if let [start, end] = &args[3..] {
        let filtered = session.apply_bounds(start, end)?;
        println!("Filtered down to {} transactions.", filtered.len());
    }

    let rates = RateTable::load_or_empty(Path::new(&args[2]));
    println!("Loaded {} conversion rates.", rates.len());

    let conversion = convert_to_usd(session.active_data(), &rates);
    if !conversion.missing_currencies.is_empty() {
        println!(
            "Missing rates for: {}",
            conversion
                .missing_currencies
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let path = ReportBuilder::new().write(session.active_data(), &conversion)?;
    println!("Report saved as '{}'.", path.display());

    Ok(())
}
