mod categorize;
mod filter;
mod import;
mod logging;
mod models;
mod run;
mod summary;
mod util;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    logging::init(args.iter().any(|a| a == "--debug"));

    match args.len() {
        0 | 1 => {
            run::print_usage();
            Ok(())
        }
        _ => run::as_cli(&args),
    }
}
