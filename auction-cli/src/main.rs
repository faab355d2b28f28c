mod logging;
mod render;

use anyhow::{Context, Result};
use auction_client::config::{DEFAULT_API_BASE, DEFAULT_PAGE_SIZE};
use auction_client::notice::{LOGIN_FAILED, REGISTRATION_FAILED};
use auction_client::{AuctionClient, ClientConfig, FileTokenStore, Notice};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short = 's', long, env = "AUCTION_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    #[arg(long, env = "AUCTION_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    #[arg(long, env = "AUCTION_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the auction feed page by page
    Feed {
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        #[arg(long)]
        active_only: bool,
    },

    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    Logout,

    Status,

    View {
        #[arg(short, long)]
        id: i64,
    },

    Bid {
        #[arg(short, long)]
        id: i64,
    },
}

fn token_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => Ok(path),
        None => {
            let home = dirs::home_dir().context("Failed to get home directory")?;
            Ok(home.join(".auction_token"))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let active_only = matches!(cli.command, Commands::Feed { active_only: true, .. });
    let config = ClientConfig {
        api_base: cli.api_base.clone(),
        page_size: cli.page_size,
        active_only,
    };

    let store = FileTokenStore::new(token_path(cli.token_file.clone())?);
    let mut client =
        AuctionClient::new(&config, store).context("Failed to create auction client")?;

    if let Some(session) = client.restore_session() {
        tracing::debug!(username = %session.username, "Session restored from token file");
    }

    match &cli.command {
        Commands::Feed { pages, .. } => {
            println!(
                "📋 Auctions from {} (page size {})",
                config.api_base, config.page_size
            );
            println!();

            let first = client.load_first_page().await;
            render::print_cards(&first);

            for _ in 1..*pages {
                let more = client.load_more().await;
                render::print_cards(&more);
            }

            let feed = client.feed();
            if feed.listings().is_empty() {
                println!("   No auctions found");
            } else {
                println!(
                    "✅ {} auctions loaded (last page {})",
                    feed.listings().len(),
                    feed.cursor()
                );
            }
        }

        Commands::Login { username, password } => {
            println!("🔑 Logging in as: {}", username);

            let result = client
                .login(username, password)
                .await
                .map(|session| session.username.clone());

            match result {
                Ok(name) => {
                    tracing::debug!(username = %name, "Session established");
                    render::print_notice(&Notice::logged_in());
                    println!(
                        "   Token saved to {:?}",
                        client.gate().store().path()
                    );
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Login failed");
                    render::print_notice(&Notice::from_error(&e, LOGIN_FAILED));
                    std::process::exit(1);
                }
            }
        }

        Commands::Register {
            username,
            email,
            password,
        } => {
            println!("📝 Registering user: {}", username);

            match client.register(username, email, password).await {
                Ok(()) => {
                    render::print_notice(&Notice::registered());
                    println!(
                        "   Next: auction-cli login --username {} --password <password>",
                        username
                    );
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Registration failed");
                    render::print_notice(&Notice::from_error(&e, REGISTRATION_FAILED));
                    std::process::exit(1);
                }
            }
        }

        Commands::Logout => {
            client.logout().context("Failed to clear token")?;
            render::print_notice(&Notice::logged_out());
        }

        Commands::Status => match client.session() {
            Some(session) => {
                println!("🔑 Token file: {:?}", client.gate().store().path());
                println!("   Session: active (as {})", session.username);
                println!("   Note: the token is not checked with the server");
            }
            None => {
                println!("❌ No active session");
                println!("   Please login first: auction-cli login --username <username> --password <password>");
            }
        },

        Commands::View { id } => {
            render::print_notice(&Notice::view_coming_soon(*id));
        }

        Commands::Bid { id } => {
            if client.session().is_none() {
                println!("❌ Please login to place bids");
                std::process::exit(1);
            }
            render::print_notice(&Notice::bid_coming_soon(*id));
        }
    }

    Ok(())
}
