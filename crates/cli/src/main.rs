mod api;
mod commands;
mod config;
mod ui;

use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use shared::api::Period;

use crate::{commands::catering::CateringArgs, config::Config};

#[derive(Parser)]
#[command(name = "droppy")]
#[command(about = "Droppy Dash leaderboard and café tools")]
#[command(version)]
#[command(after_help = "Examples:
  droppy leaderboard                 This week's top 10
  droppy leaderboard -p monthly      This month's top 10
  droppy admin -p all -l 50          Full entries for staff
  droppy visits                      Visit counters")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the public leaderboard
    #[command(after_help = "Examples:
  droppy leaderboard
  droppy leaderboard -p all -e 6f1c...  Show the rank of one entry")]
    Leaderboard {
        /// weekly, monthly or all
        #[arg(short, long, default_value = "weekly")]
        period: Period,
        /// Entry ID to look up the rank for
        #[arg(short, long)]
        entry: Option<String>,
    },

    /// List full entries with contact details (needs DROPPY_ADMIN_TOKEN)
    #[command(after_help = "Example: droppy admin -p monthly -l 20")]
    Admin {
        /// weekly, monthly or all
        #[arg(short, long, default_value = "weekly")]
        period: Period,
        /// Number of entries (1-50)
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// Request a game session
    #[command(after_help = "Example: droppy session")]
    Session,

    /// Send a catering request
    #[command(after_help = "Example:
  droppy catering -n 'Café Norte' -c 5512345678 -d 2026-11-20 -g 30 'Coffee bar'")]
    Catering {
        #[arg(short, long)]
        name: String,
        /// Phone or Instagram handle
        #[arg(short, long)]
        contact: String,
        /// Event date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..))]
        guests: i64,
        /// Anything else we should know
        #[arg(default_value = "")]
        details: String,
    },

    /// Show visit counters (needs DROPPY_VISIT_STATS_TOKEN)
    #[command(after_help = "Example: droppy visits --days 7")]
    Visits {
        /// Number of most recent days to list
        #[arg(long, default_value_t = 14)]
        days: usize,
    },

    /// Print the random sequence a session seed produces
    #[command(after_help = "Example: droppy rng 42 -n 5")]
    Rng {
        seed: u32,
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Generate shell completions
    #[command(after_help = "Examples:
  droppy completions bash > ~/.bash_completion.d/droppy
  droppy completions zsh > ~/.zfunc/_droppy
  droppy completions fish > ~/.config/fish/completions/droppy.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        ui::print_error(&err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = envy::prefixed("DROPPY_").from_env::<Config>()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Leaderboard { period, entry } => {
            commands::leaderboard::run(&config, period, entry.as_deref()).await
        }
        Commands::Admin { period, limit } => commands::admin::run(&config, period, limit).await,
        Commands::Session => commands::session::run(&config).await,
        Commands::Catering {
            name,
            contact,
            date,
            guests,
            details,
        } => {
            let args = CateringArgs {
                name,
                contact,
                date,
                guests,
                details,
            };
            commands::catering::run(&config, args).await
        }
        Commands::Visits { days } => commands::visits::run(&config, days).await,
        Commands::Rng { seed, count } => {
            commands::rng::run(seed, count);
            Ok(())
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "droppy", &mut std::io::stdout());
            Ok(())
        }
    }
}
