//! Binary entry point: set up logging, resolve the data directory, load the
//! saved recipes and fiber catalog, then run the requested command.
use std::process::ExitCode;

use clap::Parser;
use yarn_blend::cli::{self, Cli};
use yarn_blend::{logging, App};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut app = App::load(cli.data_files()?)?;
    cli::run(&cli, &mut app)
}
