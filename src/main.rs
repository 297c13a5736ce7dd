//! payroll-anomaly CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Any error is printed to
//! stderr and the process exits with status 1.

use payroll_anomaly::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
