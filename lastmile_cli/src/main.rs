use clap::{Parser, Subcommand};

use crate::{generate::GenerateArgs, solve::SolveArgs};

mod generate;
mod parsers;
mod solve;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan routes for a dispatch snapshot
    Solve {
        #[command(flatten)]
        args: SolveArgs,
    },
    /// Emit a random dispatch snapshot for experimentation
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Solve { args } => solve::run(args)?,
        Commands::Generate { args } => generate::run(args)?,
    }

    Ok(())
}
