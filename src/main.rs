use std::io::Write;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use celopay::{
    client::FarcasterClient,
    config::Settings,
    constants::{BALANCE_DISPLAY_DECIMALS, SEARCH_RESULT_LIMIT},
    domain::clip_places,
    state::{SendPhase, TransferOrchestrator},
    wallet::{NodeWallet, WalletProvider},
};

// Celopay version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

// ASCII art logo
const LOGO: &str = r#"
 ██████╗███████╗██╗      ██████╗ ██████╗  █████╗ ██╗   ██╗
██╔════╝██╔════╝██║     ██╔═══██╗██╔══██╗██╔══██╗╚██╗ ██╔╝
██║     █████╗  ██║     ██║   ██║██████╔╝███████║ ╚████╔╝
██║     ██╔══╝  ██║     ██║   ██║██╔═══╝ ██╔══██║  ╚██╔╝
╚██████╗███████╗███████╗╚██████╔╝██║     ██║  ██║   ██║
 ╚═════╝╚══════╝╚══════╝ ╚═════╝ ╚═╝     ╚═╝  ╚═╝   ╚═╝
"#;

/// Celopay - send CELO to Farcaster users from your terminal
#[derive(Parser)]
#[command(version = VERSION, about, long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search Farcaster users by username
    Search {
        /// Username prefix to search for
        query: String,
    },
    /// Send CELO to a Farcaster user
    Send {
        /// Recipient username (with or without the leading @)
        to: String,
        /// Amount in CELO, e.g. "1.5"
        amount: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the sending account's balance
    Balance,
    /// Display version with ASCII art
    Version,
}

/// Application entry point
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    color_eyre::install()?;

    let cli = Cli::parse();
    let settings = Settings::load();

    match cli.command {
        Commands::Search { query } => run_search(&settings, &query).await,
        Commands::Send { to, amount, yes } => run_send(&settings, &to, &amount, yes).await,
        Commands::Balance => run_balance(&settings).await,
        Commands::Version => {
            println!("{LOGO}");
            println!("Celopay v{VERSION}");
            println!("Send CELO to Farcaster users from your terminal");
            Ok(())
        }
    }
}

fn directory_client(settings: &Settings) -> Result<FarcasterClient> {
    let api_key = settings.api_key().map_err(|e| e.into_report())?;
    Ok(FarcasterClient::new(api_key))
}

fn node_wallet(settings: &Settings) -> Result<NodeWallet> {
    let sender = settings.sender().map_err(|e| e.into_report())?;
    Ok(NodeWallet::with_endpoint(settings.endpoint(), sender))
}

/// One-shot directory search.
async fn run_search(settings: &Settings, query: &str) -> Result<()> {
    let client = directory_client(settings)?;
    let users = client
        .search_users(query, SEARCH_RESULT_LIMIT)
        .await
        .map_err(|e| e.into_report())?;

    if users.is_empty() {
        println!("No users found for '{query}'.");
        return Ok(());
    }
    for user in &users {
        let address = user.payout_address().unwrap_or("no verified address");
        println!("@{:<20} {:<24} {address}", user.username, user.display_name);
    }
    Ok(())
}

/// Shows the sending account's native balance.
async fn run_balance(settings: &Settings) -> Result<()> {
    let sender = settings.sender().map_err(|e| e.into_report())?.to_string();
    let wallet = node_wallet(settings)?;
    wallet.connect().await.map_err(|e| e.into_report())?;

    let balance = wallet
        .get_balance(&sender, settings.network)
        .await
        .map_err(|e| e.into_report())?;
    println!(
        "Balance: {} {}",
        clip_places(&balance, BALANCE_DISPLAY_DECIMALS),
        settings.network.native_symbol()
    );
    Ok(())
}

/// Resolves the recipient, then drives a payment to completion.
async fn run_send(settings: &Settings, to: &str, amount: &str, yes: bool) -> Result<()> {
    let handle = to.trim_start_matches('@');
    let client = directory_client(settings)?;

    let users = client
        .search_users(handle, SEARCH_RESULT_LIMIT)
        .await
        .map_err(|e| e.into_report())?;
    let Some(recipient) = users
        .iter()
        .find(|user| user.username.eq_ignore_ascii_case(handle))
    else {
        if users.is_empty() {
            return Err(eyre!("No users found for '{handle}'"));
        }
        println!("No exact match for '@{handle}'. Did you mean:");
        for user in &users {
            println!("  @{} ({})", user.username, user.display_name);
        }
        return Ok(());
    };

    let target = recipient
        .payout_address()
        .ok_or_else(|| eyre!("@{} has no verified Celo address", recipient.username))?;

    if !yes && !confirm(&format!(
        "Send {amount} CELO to @{} ({target})? [y/N] ",
        recipient.username
    ))? {
        println!("Aborted.");
        return Ok(());
    }

    let wallet = Arc::new(node_wallet(settings)?);
    wallet.connect().await.map_err(|e| e.into_report())?;

    let (message_tx, mut message_rx) = mpsc::unbounded_channel();
    let mut orchestrator =
        TransferOrchestrator::new(Arc::clone(&wallet), settings.network, message_tx);

    orchestrator.send(Some(recipient), amount);
    if let Some(error) = orchestrator.error() {
        return Err(eyre!("{error}"));
    }
    println!("Waiting for approval...");

    loop {
        tokio::select! {
            message = message_rx.recv() => {
                let Some(message) = message else { break };
                orchestrator.handle_message(message);
                match orchestrator.phase() {
                    SendPhase::Confirming => {
                        if let Some(hash) = orchestrator.attempt().and_then(|a| a.hash.as_deref()) {
                            println!("Processing transaction {hash}...");
                        }
                    }
                    SendPhase::Confirmed => {
                        println!("Transaction confirmed!");
                        let explorer = orchestrator
                            .attempt()
                            .and_then(|a| a.hash.as_deref())
                            .and_then(|hash| settings.network.explorer_tx_url(hash));
                        if let Some(url) = explorer {
                            println!("View on explorer: {url}");
                        }
                        break;
                    }
                    SendPhase::Failed(message) => {
                        return Err(eyre!("{}", message.clone()));
                    }
                    _ => {}
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("Detached. A broadcast transaction continues on-chain.");
                break;
            }
        }
    }
    Ok(())
}

/// Prompts on stdout and reads a yes/no answer from stdin.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}
