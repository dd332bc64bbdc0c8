use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

fn main() -> ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    charsheet::logging::init(charsheet::logging::CLI_FILTER).context("init logging")?;

    let cli = charsheet::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        charsheet::cli::Command::Render(args) => {
            charsheet::convert::run(args).context("render")?;
        }
        charsheet::cli::Command::Inspect(args) => {
            charsheet::convert::inspect(args).context("inspect")?;
        }
    }

    Ok(())
}
