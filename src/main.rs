use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use pullcheck::cli::check::CheckArgs;
use pullcheck::cli::run::RunArgs;
use pullcheck::Result;
use std::io;

#[derive(Parser)]
#[command(name = "pullcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pull request description checker", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the pull request that triggered the current GitHub Actions run
    Run(RunArgs),

    /// Check a local Markdown description against a repository
    Check(CheckArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    match runtime.block_on(run_async(cli)) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            std::process::exit(1);
        }
    }
}

/// Returns whether the checked description passed
async fn run_async(cli: Cli) -> Result<bool> {
    match cli.command {
        Commands::Run(args) => pullcheck::cli::run::run(args).await,

        Commands::Check(args) => {
            println!("{}", format!("🔍 Checking {}", args.file.display()).cyan());
            pullcheck::cli::check::run(args).await
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "pullcheck", &mut io::stdout());
            Ok(true)
        }
    }
}
