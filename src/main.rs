//! projboard - terminal project board

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = projboard::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
