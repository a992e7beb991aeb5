use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    chulbitso::logging::init().context("init logging")?;

    let cli = chulbitso::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        chulbitso::cli::Command::Search(args) => {
            chulbitso::search::run(args).await.context("search")?;
        }
        chulbitso::cli::Command::Normalize(args) => {
            chulbitso::search::normalize_file(args).context("normalize")?;
        }
        chulbitso::cli::Command::Review { command } => {
            chulbitso::review::run(command).context("review")?;
        }
        chulbitso::cli::Command::Paper { command } => {
            chulbitso::app::shelf::run_paper(command).context("paper")?;
        }
        chulbitso::cli::Command::Tape { command } => {
            chulbitso::app::shelf::run_tape(command).context("tape")?;
        }
    }

    Ok(())
}
