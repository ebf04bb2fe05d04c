use std::io::Write;

use clap::{error::ErrorKind, Parser, Subcommand};
use colored::Colorize;
use commands::{
    add::AddCommand, delete::DeleteCommand, list::ListCommand, sync::SyncCommand, Context,
};
use gsync_core::{config::GsyncConfig, executor::ProcessExecutor, Direction, GsyncError};
use log::error;

mod commands;
mod usage;

/// Keep a set of local folders in sync with Google drive folders through gdrive
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Add(AddCommand),
    Delete(DeleteCommand),
    Push(SyncCommand),
    Pull(SyncCommand),
    List(ListCommand),
    /// Print the list of methods
    Help,
}

impl Cli {
    /// Parses the process arguments. The method name is matched without
    /// regard to case and an unknown method falls back to help.
    fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args: Vec<String> = args.into_iter().collect();
        if let Some(method) = args.get_mut(1) {
            *method = method.to_lowercase();
        }
        match Cli::try_parse_from(&args) {
            Ok(cli) => cli,
            Err(err)
                if matches!(
                    err.kind(),
                    ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument
                ) =>
            {
                error!(
                    "Unrecognized method {}",
                    args.get(1).map(String::as_str).unwrap_or_default()
                );
                Cli { command: None }
            }
            Err(err) => err.exit(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    pretty_env_logger::init();

    let cli = Cli::from_args(std::env::args());
    let mut stdout = std::io::stdout();

    if let Err(err) = run(cli, &mut stdout).await {
        match err.downcast_ref::<GsyncError>() {
            Some(GsyncError::Usage { message, usage }) => {
                error!("{} {}", "Error:".bright_red(), message);
                writeln!(stdout, "{}", usage)?;
                std::process::exit(2);
            }
            _ => {
                error!("{} {}", "Error:".bright_red(), err);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match cli.command {
        None | Some(Commands::Help) => writeln!(out, "{}", usage::GENERAL)?,
        Some(Commands::Add(add)) => add.run(&context()?, out).await?,
        Some(Commands::Delete(delete)) => delete.run(&context()?, out).await?,
        Some(Commands::Push(push)) => push.run(Direction::Push, &context()?, out).await?,
        Some(Commands::Pull(pull)) => pull.run(Direction::Pull, &context()?, out).await?,
        Some(Commands::List(list)) => list.run(&context()?, out).await?,
    }
    Ok(())
}

fn context() -> Result<Context<ProcessExecutor>, GsyncError> {
    Ok(Context::new(GsyncConfig::from_env()?, ProcessExecutor))
}
