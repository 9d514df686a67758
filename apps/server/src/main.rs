use anyhow::Context;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use messages_config::load as load_config;
use messages_domain::{MessageService, NewMessage};
use messages_gateway::{create_router, GatewayState};
use messages_runtime::{telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "messages-server")]
#[command(about = "Message storage service (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Print every stored message
    Dump,
    /// Store a handful of sample messages
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(&services, &config).await,
        Commands::Dump => dump_data(&services).await,
        Commands::Seed => seed_data(&services).await,
    };

    services.shutdown().await;
    result
}

async fn run_server(
    services: &BackendServices,
    config: &messages_config::AppConfig,
) -> anyhow::Result<()> {
    info!(backend = config.storage.backend.as_str(), "starting messages service");

    let state = GatewayState::new(services.store.clone());
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(messages_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("messages service shut down");
    Ok(())
}

async fn dump_data(services: &BackendServices) -> anyhow::Result<()> {
    services.ensure_persistent("dump")?;

    let messages = services
        .store
        .list()
        .await
        .context("failed to list messages")?;

    println!("=== MESSAGES ===");
    if messages.is_empty() {
        println!("No messages found");
        return Ok(());
    }

    println!("Found {} messages:", messages.len());
    println!(
        "{:<38} {:<16} {:<16} {:<32} {:<6} {}",
        "Message ID", "Room ID", "Sender ID", "Timestamp", "Read", "Message"
    );
    println!("{}", "-".repeat(140));

    for message in messages {
        println!(
            "{:<38} {:<16} {:<16} {:<32} {:<6} {}",
            message.message_id,
            message.room_id,
            message.sender_id,
            message.timestamp.to_rfc3339(),
            message.is_read,
            message.content
        );
    }

    Ok(())
}

async fn seed_data(services: &BackendServices) -> anyhow::Result<()> {
    services.ensure_persistent("seed")?;

    let service = MessageService::new(services.store.clone());
    let start = Utc::now() - Duration::minutes(10);

    let samples = [
        ("general", "alice", "Morning everyone"),
        ("general", "bob", "Hey Alice"),
        ("general", "alice", "Standup in five minutes"),
        ("random", "carol", "Anyone seen the new build?"),
    ];

    for (offset, (room_id, sender_id, content)) in samples.into_iter().enumerate() {
        let timestamp = start + Duration::minutes(offset as i64);
        service
            .create_message(NewMessage::new(content, room_id, sender_id, timestamp, false))
            .await
            .with_context(|| format!("failed to seed message for room {room_id}"))?;
    }

    info!(count = samples.len(), "seeded sample messages");
    println!("Seeded {} messages", samples.len());
    Ok(())
}
