use colored::Colorize;
use mdx_csv_inventory::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse_args();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}: {e}", "error".red());
            ExitCode::FAILURE
        }
    }
}
