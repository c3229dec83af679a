use std::path::PathBuf;

use env_logger::Env;

use traffic_light_sim::global_variables::ENV_JOURNAL_PATH;
use traffic_light_sim::monitoring::traffic_journal::summarize_journal;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Journal path: first argument, else TRAFFIC_JOURNAL.
    let path = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ENV_JOURNAL_PATH).ok())
    {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("usage: traffic_report_main <journal.csv>  (or set {})", ENV_JOURNAL_PATH);
            std::process::exit(2);
        }
    };

    match summarize_journal(&path) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            log::error!("Could not read journal {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}
