use std::env;
use std::path::Path;

use revenue_report_rs::ReportSession;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let folder = args.get(1).map(String::as_str).unwrap_or(".");

    let session = ReportSession::load(Path::new(folder));
    if !session.has_data() {
        println!("No data was combined.");
        return;
    }

    println!("Loaded {} transactions.", session.dataset().len());
    if let Some((min, max)) = session.dataset().date_span() {
        println!("Date span: {min} to {max}");
    }

    for record in session.dataset().records().iter().take(10) {
        println!(
            "{}  {:<20} {:<4} {:>12} {}",
            record.date, record.client, record.currency, record.transaction, record.country
        );
    }
}
