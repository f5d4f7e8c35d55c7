use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "svodka")]
#[command(about = "Keyword-filtered news aggregator with Telegram delivery")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect news from all sources once and store the results
    Run {
        /// Print what would be stored without touching the database
        #[arg(long)]
        dry_run: bool,
    },

    /// Start the Telegram bot and answer /news on demand
    Bot,

    /// Send the most recently stored news to the configured chat
    Send {
        /// How many stored items to send
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },

    /// List the configured news sources
    Sources,
}
