//! dpac standalone CGI binary.
//!
//! Reads the rule table named after the binary (or `--conf`), picks the
//! PAC file for the client address in `REMOTE_ADDR`, and writes the CGI
//! response to stdout.

use std::process::ExitCode;

use clap::Parser;
use dpac_cgi::{cli, CgiArgs};

fn main() -> ExitCode {
    cli::init_tracing();
    let args = CgiArgs::parse();

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
