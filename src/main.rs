//! Taskdeck - local task tracker

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use taskdeck::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    if std::env::var("TASKDECK_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("taskdeck=debug")
            .init();
    }

    let Cli { file, command } = Cli::parse();

    match command {
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "td", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Add(args)) => cli::add::run(file, args),
        Some(Commands::List(args)) => cli::list::run(file, args),
        Some(Commands::Update(args)) => cli::update::run(file, args),
        Some(Commands::Remove(args)) => cli::remove::run(file, args),
        Some(Commands::Toggle(args)) => cli::toggle::run(file, args),
        Some(Commands::Search(args)) => cli::search::run(file, args),
        Some(Commands::Stats(args)) => cli::stats::run(file, args),
        Some(Commands::Export(args)) => cli::export::run(file, args),
        None => cli::menu::run(file),
    }
}
