use std::process::ExitCode;

use clap::Parser;
use vf2s::{FontationsIo, cli::Cli, config::AXIS_SPECS, run};

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&AXIS_SPECS, &cli.request(), &FontationsIo) {
        Ok(path) => {
            println!("[New instance]: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
