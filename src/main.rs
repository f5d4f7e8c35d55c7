use clap::Parser;
use tracing_subscriber::EnvFilter;

use svodka::aggregator::Aggregator;
use svodka::bot::{Messenger, NewsBot, TelegramClient};
use svodka::cli::{Cli, Commands};
use svodka::config::Config;
use svodka::errors::{SvodkaError, SvodkaResult};
use svodka::sources::SourceRegistry;
use svodka::storage::{save_all, NewsRepository, SqliteNewsRepository, SqliteStorage};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> SvodkaResult<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;

    let storage = SqliteStorage::new(&config.db_path)?;
    let news_repo = SqliteNewsRepository::new(storage);

    match cli.command {
        Commands::Run { dry_run } => cmd_run(&config, news_repo, dry_run).await,
        Commands::Bot => cmd_bot(&config).await,
        Commands::Send { limit } => cmd_send(&config, news_repo, limit).await,
        Commands::Sources => cmd_sources(&config),
    }
}

async fn cmd_run(
    config: &Config,
    news_repo: SqliteNewsRepository,
    dry_run: bool,
) -> SvodkaResult<()> {
    let aggregator = Aggregator::new(SourceRegistry::from_config(config));

    println!("Collecting news from {} sources...\n", aggregator.registry().len());

    let items = aggregator.collect_all().await;

    if items.is_empty() {
        println!("No matching news in the last 24 hours.");
        return Ok(());
    }

    for item in &items {
        println!("  [{}] {} {}", item.source, item.date, item.title);
        println!("      {}", item.link);
    }
    println!();

    if dry_run {
        println!("Dry run complete. Would store {} items.", items.len());
        return Ok(());
    }

    let inserted = save_all(&news_repo, &items)?;
    println!(
        "Stored {} new items ({} already known).",
        inserted,
        items.len() - inserted
    );

    Ok(())
}

async fn cmd_bot(config: &Config) -> SvodkaResult<()> {
    let aggregator = Aggregator::new(SourceRegistry::from_config(config));
    let client = TelegramClient::new(&config.telegram_token);

    NewsBot::new(client, aggregator).run().await
}

async fn cmd_send(
    config: &Config,
    news_repo: SqliteNewsRepository,
    limit: usize,
) -> SvodkaResult<()> {
    let chat_id = config
        .telegram_chat_id
        .ok_or_else(|| SvodkaError::MissingEnvVar("TELEGRAM_CHAT_ID".to_string()))?;

    let rows = news_repo.recent(limit)?;
    if rows.is_empty() {
        println!("Nothing stored yet; run `svodka run` first.");
        return Ok(());
    }

    let client = TelegramClient::new(&config.telegram_token);

    for row in &rows {
        let text = format!("{}\n{}", row.title, row.link);
        client.send_message(chat_id, &text).await?;
    }

    println!("Sent {} items to chat {}.", rows.len(), chat_id);
    Ok(())
}

fn cmd_sources(config: &Config) -> SvodkaResult<()> {
    let registry = SourceRegistry::from_config(config);

    println!("Configured sources:\n");
    for source in registry.sources() {
        println!("  {} ({})", source.name(), source.origin());
    }

    Ok(())
}
