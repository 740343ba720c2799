use std::process::ExitCode;

use clap::Parser;
use faultline::cli::{self, Cli};
use faultline::types::StdoutConsole;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(&cli.log_level);

    let mut console = StdoutConsole;
    match cli::run(&cli, &mut console) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("faultline: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
