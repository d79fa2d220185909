//! # cas CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules. Ctrl-C closes
//! the client so a pending `request --wait` stops retrying at once.

use clap::Parser;

/// Anchor service CLI.
///
/// Discovers supported chains, submits anchor requests, and looks up their
/// status on a chain anchor service.
#[derive(Parser, Debug)]
#[command(name = "cas", version, about)]
struct Cli {
    #[command(flatten)]
    connection: cas_cli::connection::ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the chain the service anchors to.
    Chains(cas_cli::chains::ChainsArgs),
    /// Look up the anchor request for a stream tip.
    Status(cas_cli::status::StatusArgs),
    /// Submit an anchor request from a CAR file.
    Request(cas_cli::request::RequestArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = cli.connection.connect()?;

    tokio::spawn({
        let client = client.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, closing anchor service client");
                client.close();
            }
        }
    });

    let output = match &cli.command {
        Commands::Chains(args) => cas_cli::chains::run(&client, args).await,
        Commands::Status(args) => cas_cli::status::run(&client, args).await,
        Commands::Request(args) => cas_cli::request::run(&client, args).await,
    };
    client.close();

    println!("{}", output?);
    Ok(())
}
