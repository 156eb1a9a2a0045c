use std::{env, process};

use termsheet::{init, run_cli, utils::build_info};

fn main() {
    init();

    match env::args().nth(1).as_deref() {
        None => {}
        Some("--version" | "-V") => {
            println!("{}", build_info::current().describe());
            return;
        }
        Some("--help" | "-h") => {
            print_usage();
            return;
        }
        Some(other) => {
            eprintln!("Unknown argument: {other}");
            print_usage();
            process::exit(2);
        }
    }

    if let Err(err) = run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn print_usage() {
    println!(
        "termsheet {}\n\
         Keep providers, clients and invoices in a local database.\n\n\
         Usage: termsheet [--version | --help]\n\n\
         Without arguments the interactive menus start.\n\
         Type {} in any text field to abandon the form in progress.\n\n\
         Environment:\n  \
         TERMSHEET_HOME  directory for termsheet.db and config/config.json\n  \
         RUST_LOG        log filter (default: termsheet=warn), written to stderr",
        env!("CARGO_PKG_VERSION"),
        termsheet::cli::prompter::CANCEL_KEYWORD
    );
}
